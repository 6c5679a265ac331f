//! Style Queries

/// 列出风格目录查询
#[derive(Debug, Clone)]
pub struct ListStyles;
