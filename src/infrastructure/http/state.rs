//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateBookHandler, CreateChapterHandler, DeleteBookHandler, DeleteChapterHandler,
    UpdateChapterHandler,
    // Query handlers
    GetBookHandler, ListBooksHandler, ListChaptersHandler, ListPendingChaptersHandler,
    ListStylesHandler,
    // Ports
    BookRepositoryPort, ChapterRepositoryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub create_book_handler: CreateBookHandler,
    pub delete_book_handler: DeleteBookHandler,
    pub create_chapter_handler: CreateChapterHandler,
    pub update_chapter_handler: UpdateChapterHandler,
    pub delete_chapter_handler: DeleteChapterHandler,

    // ========== Query Handlers ==========
    pub get_book_handler: GetBookHandler,
    pub list_books_handler: ListBooksHandler,
    pub list_chapters_handler: ListChaptersHandler,
    pub list_pending_chapters_handler: ListPendingChaptersHandler,
    pub list_styles_handler: ListStylesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
    ) -> Self {
        Self {
            // Command handlers
            create_book_handler: CreateBookHandler::new(book_repo.clone()),
            delete_book_handler: DeleteBookHandler::new(book_repo.clone()),
            create_chapter_handler: CreateChapterHandler::new(
                book_repo.clone(),
                chapter_repo.clone(),
            ),
            update_chapter_handler: UpdateChapterHandler::new(chapter_repo.clone()),
            delete_chapter_handler: DeleteChapterHandler::new(chapter_repo.clone()),

            // Query handlers
            get_book_handler: GetBookHandler::new(book_repo.clone(), chapter_repo.clone()),
            list_books_handler: ListBooksHandler::new(book_repo, chapter_repo.clone()),
            list_chapters_handler: ListChaptersHandler::new(chapter_repo.clone()),
            list_pending_chapters_handler: ListPendingChaptersHandler::new(chapter_repo),
            list_styles_handler: ListStylesHandler::new(),
        }
    }
}
