//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（BookRepository、ChapterRepository）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Book commands
    CreateBook,
    DeleteBook,
    // Chapter commands
    CreateChapter,
    DeleteChapter,
    UpdateChapter,
    // Handlers
    handlers::{
        CreateBookHandler, CreateChapterHandler, DeleteBookHandler, DeleteChapterHandler,
        UpdateChapterHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    BookChapterCount, BookRecord, BookRepositoryPort, ChapterPatch, ChapterRecord,
    ChapterRepositoryPort, ChapterStatus, PendingChapterRecord, RepositoryError,
};

pub use queries::{
    // Book queries
    GetBook,
    ListBooks,
    // Chapter queries
    ListChapters,
    ListPendingChapters,
    // Style queries
    ListStyles,
    // Handlers
    handlers::{
        GetBookHandler, ListBooksHandler, ListChaptersHandler, ListPendingChaptersHandler,
        ListStylesHandler,
    },
};
