//! Chapter Queries

use uuid::Uuid;

/// 列出某本书全部章节的查询（按 number 升序）
#[derive(Debug, Clone)]
pub struct ListChapters {
    pub book_id: Uuid,
}

/// 跨所有书籍列出 pending 章节的查询
///
/// 生成 worker 的取活入口，无认领机制，每次轮询都返回全量 pending
#[derive(Debug, Clone)]
pub struct ListPendingChapters;
