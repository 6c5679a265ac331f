//! Chapter Query Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChapterRecord, ChapterRepositoryPort, ChapterStatus, PendingChapterRecord,
};
use crate::application::queries::{ListChapters, ListPendingChapters};

// ============================================================================
// Response DTOs
// ============================================================================

/// 章节响应
#[derive(Debug, Clone)]
pub struct ChapterResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub number: i64,
    pub title: Option<String>,
    pub original_content: Option<String>,
    pub generated_content: Option<String>,
    pub status: ChapterStatus,
}

impl From<ChapterRecord> for ChapterResponse {
    fn from(record: ChapterRecord) -> Self {
        Self {
            id: record.id,
            book_id: record.book_id,
            number: record.number,
            title: record.title,
            original_content: record.original_content,
            generated_content: record.generated_content,
            status: record.status,
        }
    }
}

/// 待生成章节响应（含所属书籍元数据）
#[derive(Debug, Clone)]
pub struct PendingChapterResponse {
    pub chapter_id: Uuid,
    pub book_id: Uuid,
    pub book_title: String,
    pub book_style: String,
    pub book_description: Option<String>,
    pub chapter_number: i64,
    pub original_content: Option<String>,
    pub created_at: String,
}

impl From<PendingChapterRecord> for PendingChapterResponse {
    fn from(record: PendingChapterRecord) -> Self {
        // books.title 列非空，联查得到 NULL 即说明父书籍缺失
        let parent_found = record.book_title.is_some();

        Self {
            chapter_id: record.chapter_id,
            book_id: record.book_id,
            book_title: record.book_title.unwrap_or_else(|| "Unknown".to_string()),
            book_style: record
                .book_style
                .unwrap_or_else(|| "narrative-default".to_string()),
            book_description: if parent_found {
                record.book_description
            } else {
                Some(String::new())
            },
            chapter_number: record.chapter_number,
            original_content: record.original_content,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// ListChapters Handler
pub struct ListChaptersHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl ListChaptersHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    /// 列出某本书的章节
    ///
    /// 不校验书籍是否存在，未知 book_id 返回空列表
    pub async fn handle(
        &self,
        query: ListChapters,
    ) -> Result<Vec<ChapterResponse>, ApplicationError> {
        let chapters = self.chapter_repo.find_by_book(query.book_id).await?;
        Ok(chapters.into_iter().map(ChapterResponse::from).collect())
    }
}

/// ListPendingChapters Handler
pub struct ListPendingChaptersHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl ListPendingChaptersHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(
        &self,
        _query: ListPendingChapters,
    ) -> Result<Vec<PendingChapterResponse>, ApplicationError> {
        let pending = self.chapter_repo.find_pending().await?;

        tracing::debug!(count = pending.len(), "Pending chapters polled");

        Ok(pending
            .into_iter()
            .map(PendingChapterResponse::from)
            .collect())
    }
}
