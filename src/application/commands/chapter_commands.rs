//! Chapter Commands

use uuid::Uuid;

use crate::application::ports::ChapterPatch;

/// 创建章节命令（初始状态为 pending）
#[derive(Debug, Clone)]
pub struct CreateChapter {
    pub book_id: Uuid,
    pub number: i64,
    pub original_content: String,
}

/// 部分更新章节命令
///
/// 客户端与生成 worker 共用此入口，worker 回写时携带
/// generated_content 与 status=generated
#[derive(Debug, Clone)]
pub struct UpdateChapter {
    pub book_id: Uuid,
    pub chapter_id: Uuid,
    pub patch: ChapterPatch,
}

/// 删除章节命令
#[derive(Debug, Clone)]
pub struct DeleteChapter {
    pub book_id: Uuid,
    pub chapter_id: Uuid,
}
