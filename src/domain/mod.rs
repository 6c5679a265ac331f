//! Domain Layer - 领域层
//!
//! 目前只包含共享的风格目录：书籍/章节的持久化形态由
//! application 层的 ports 定义（Record 模式）

mod style_catalog;

pub use style_catalog::{all_styles, Style, STYLES};
