//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod book_repo;
mod chapter_repo;

pub use database::*;
pub use book_repo::*;
pub use chapter_repo::*;
