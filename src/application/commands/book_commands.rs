//! Book Commands

use uuid::Uuid;

/// 创建书籍命令
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub description: Option<String>,
    pub original_text: String,
    pub style: String,
}

/// 删除书籍命令（连同其全部章节）
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub book_id: Uuid,
}
