//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod book_handlers;
mod chapter_handlers;
mod style_handlers;

pub use book_handlers::*;
pub use chapter_handlers::*;
pub use style_handlers::*;
