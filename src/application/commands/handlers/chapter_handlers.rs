//! Chapter Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateChapter, DeleteChapter, UpdateChapter};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookRepositoryPort, ChapterRecord, ChapterRepositoryPort, ChapterStatus,
};

// ============================================================================
// CreateChapter
// ============================================================================

/// 创建章节响应
#[derive(Debug, Clone)]
pub struct CreateChapterResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub number: i64,
    pub title: Option<String>,
    pub original_content: Option<String>,
    pub generated_content: Option<String>,
    pub status: ChapterStatus,
}

/// CreateChapter Handler
pub struct CreateChapterHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl CreateChapterHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            chapter_repo,
        }
    }

    /// 在已存在的书籍下创建 pending 章节
    pub async fn handle(
        &self,
        command: CreateChapter,
    ) -> Result<CreateChapterResponse, ApplicationError> {
        let book_id = command.book_id;

        // 章节不能挂在不存在的书籍下
        self.book_repo
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", book_id))?;

        let chapter_id = Uuid::new_v4();
        let now = Utc::now();

        let chapter = ChapterRecord {
            id: chapter_id,
            book_id,
            number: command.number,
            title: None,
            original_content: Some(command.original_content),
            generated_content: None,
            status: ChapterStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.chapter_repo.save(&chapter).await?;

        tracing::info!(
            chapter_id = %chapter_id,
            book_id = %book_id,
            number = command.number,
            "Chapter created (pending)"
        );

        Ok(CreateChapterResponse {
            id: chapter.id,
            book_id: chapter.book_id,
            number: chapter.number,
            title: chapter.title,
            original_content: chapter.original_content,
            generated_content: chapter.generated_content,
            status: chapter.status,
        })
    }
}

// ============================================================================
// UpdateChapter
// ============================================================================

/// 更新章节响应
#[derive(Debug, Clone)]
pub struct UpdateChapterResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub number: i64,
    pub title: Option<String>,
    pub original_content: Option<String>,
    pub generated_content: Option<String>,
    pub status: ChapterStatus,
}

/// UpdateChapter Handler
pub struct UpdateChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl UpdateChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    /// 应用部分更新，(book_id, chapter_id) 不匹配时报 NotFound
    pub async fn handle(
        &self,
        command: UpdateChapter,
    ) -> Result<UpdateChapterResponse, ApplicationError> {
        let chapter = self
            .chapter_repo
            .apply_patch(command.book_id, command.chapter_id, &command.patch)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", command.chapter_id))?;

        tracing::info!(
            chapter_id = %chapter.id,
            book_id = %chapter.book_id,
            status = chapter.status.as_str(),
            "Chapter updated"
        );

        Ok(UpdateChapterResponse {
            id: chapter.id,
            book_id: chapter.book_id,
            number: chapter.number,
            title: chapter.title,
            original_content: chapter.original_content,
            generated_content: chapter.generated_content,
            status: chapter.status,
        })
    }
}

// ============================================================================
// DeleteChapter
// ============================================================================

/// DeleteChapter Handler
pub struct DeleteChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl DeleteChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    /// 删除章节，(book_id, chapter_id) 不匹配时报 NotFound
    pub async fn handle(&self, command: DeleteChapter) -> Result<(), ApplicationError> {
        let chapter = self
            .chapter_repo
            .find_by_book_and_id(command.book_id, command.chapter_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", command.chapter_id))?;

        self.chapter_repo
            .delete_by_book_and_id(command.book_id, command.chapter_id)
            .await?;

        tracing::info!(
            chapter_id = %chapter.id,
            book_id = %chapter.book_id,
            "Chapter deleted"
        );

        Ok(())
    }
}
