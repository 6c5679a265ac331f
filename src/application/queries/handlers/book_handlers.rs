//! Book Query Handlers

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{BookRecord, BookRepositoryPort, ChapterRepositoryPort};
use crate::application::queries::{GetBook, ListBooks};

// ============================================================================
// Response DTOs
// ============================================================================

/// 书籍详情响应（含读取时派生的章节计数）
#[derive(Debug, Clone)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub original_text: Option<String>,
    pub style: String,
    pub created_at: String,
    pub chapters_count: usize,
}

impl BookResponse {
    fn from_record(record: BookRecord, chapters_count: usize) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            original_text: record.original_text,
            style: record.style,
            created_at: record.created_at.to_rfc3339(),
            chapters_count,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetBook Handler
pub struct GetBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl GetBookHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            chapter_repo,
        }
    }

    pub async fn handle(&self, query: GetBook) -> Result<BookResponse, ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))?;

        let chapters_count = self.chapter_repo.count_by_book(query.book_id).await?;

        Ok(BookResponse::from_record(book, chapters_count))
    }
}

/// ListBooks Handler
pub struct ListBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl ListBooksHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            chapter_repo,
        }
    }

    pub async fn handle(&self, _query: ListBooks) -> Result<Vec<BookResponse>, ApplicationError> {
        let books = self.book_repo.find_all().await?;

        // 一次分组统计代替逐本 COUNT
        let counts: HashMap<Uuid, usize> = self
            .chapter_repo
            .count_grouped_by_book()
            .await?
            .into_iter()
            .map(|c| (c.book_id, c.chapters))
            .collect();

        Ok(books
            .into_iter()
            .map(|book| {
                let chapters_count = counts.get(&book.id).copied().unwrap_or(0);
                BookResponse::from_record(book, chapters_count)
            })
            .collect())
    }
}
