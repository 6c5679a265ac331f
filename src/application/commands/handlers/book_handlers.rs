//! Book Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateBook, DeleteBook};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRecord, BookRepositoryPort};

// ============================================================================
// CreateBook
// ============================================================================

/// 创建书籍响应
#[derive(Debug, Clone)]
pub struct CreateBookResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub original_text: Option<String>,
    pub style: String,
    pub created_at: String,
    pub chapters_count: usize,
}

/// CreateBook Handler
pub struct CreateBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl CreateBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    /// 创建书籍，初始不含任何章节
    pub async fn handle(&self, command: CreateBook) -> Result<CreateBookResponse, ApplicationError> {
        let book_id = Uuid::new_v4();
        let now = Utc::now();

        let book = BookRecord {
            id: book_id,
            title: command.title,
            description: command.description,
            original_text: Some(command.original_text),
            style: command.style,
            created_at: now,
            updated_at: now,
        };

        self.book_repo.save(&book).await?;

        tracing::info!(
            book_id = %book_id,
            title = %book.title,
            style = %book.style,
            "Book created"
        );

        Ok(CreateBookResponse {
            id: book.id,
            title: book.title,
            description: book.description,
            original_text: book.original_text,
            style: book.style,
            created_at: now.to_rfc3339(),
            chapters_count: 0,
        })
    }
}

// ============================================================================
// DeleteBook
// ============================================================================

/// DeleteBook Handler
pub struct DeleteBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl DeleteBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    /// 删除书籍及其全部章节
    pub async fn handle(&self, command: DeleteBook) -> Result<(), ApplicationError> {
        let book_id = command.book_id;

        // 检查书籍是否存在
        let book = self
            .book_repo
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", book_id))?;

        let chapters_removed = self.book_repo.delete(book_id).await?;

        tracing::info!(
            book_id = %book_id,
            title = %book.title,
            chapters_removed = chapters_removed,
            "Book deleted"
        );

        Ok(())
    }
}
