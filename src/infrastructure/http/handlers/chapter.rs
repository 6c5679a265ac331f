//! Chapter HTTP Handlers
//!
//! 章节的增删改查，以及生成 worker 轮询的 pending 列表

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    ChapterPatch, CreateChapter, DeleteChapter, ListChapters, ListPendingChapters, UpdateChapter,
};
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateChapterRequest {
    pub book_id: Uuid,
    pub number: i64,
    /// 原始内容为必填项，缺失在反序列化时被拒绝
    pub original_content: String,
}

#[derive(Debug, Deserialize)]
pub struct ListChaptersRequest {
    pub book_id: Uuid,
}

/// 部分更新请求
///
/// 补丁字段展平在请求体顶层
/// 字段缺失与显式 null 含义不同，由 ChapterPatch 的三态反序列化区分
#[derive(Debug, Deserialize)]
pub struct UpdateChapterRequest {
    pub book_id: Uuid,
    pub chapter_id: Uuid,
    #[serde(flatten)]
    pub patch: ChapterPatch,
}

#[derive(Debug, Deserialize)]
pub struct DeleteChapterRequest {
    pub book_id: Uuid,
    pub chapter_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ChapterResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub number: i64,
    pub title: Option<String>,
    pub original_content: Option<String>,
    pub generated_content: Option<String>,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct PendingChapterResponse {
    pub chapter_id: Uuid,
    pub book_id: Uuid,
    pub book_title: String,
    pub book_style: String,
    pub book_description: Option<String>,
    pub chapter_number: i64,
    pub original_content: Option<String>,
    pub created_at: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// 创建章节（pending 状态）
pub async fn create_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateChapterRequest>,
) -> Result<Json<ApiResponse<ChapterResponse>>, ApiError> {
    let command = CreateChapter {
        book_id: req.book_id,
        number: req.number,
        original_content: req.original_content,
    };

    let result = state.create_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ChapterResponse {
        id: result.id,
        book_id: result.book_id,
        number: result.number,
        title: result.title,
        original_content: result.original_content,
        generated_content: result.generated_content,
        status: result.status.as_str().to_string(),
    })))
}

/// 列出某本书的全部章节（按 number 升序）
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListChaptersRequest>,
) -> Result<Json<ApiResponse<Vec<ChapterResponse>>>, ApiError> {
    let query = ListChapters {
        book_id: req.book_id,
    };

    let result = state.list_chapters_handler.handle(query).await?;

    let responses: Vec<ChapterResponse> = result
        .into_iter()
        .map(|c| ChapterResponse {
            id: c.id,
            book_id: c.book_id,
            number: c.number,
            title: c.title,
            original_content: c.original_content,
            generated_content: c.generated_content,
            status: c.status.as_str().to_string(),
        })
        .collect();

    Ok(Json(ApiResponse::success(responses)))
}

/// 部分更新章节
///
/// 生成 worker 通过此入口回写 generated_content 与 status
pub async fn update_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateChapterRequest>,
) -> Result<Json<ApiResponse<ChapterResponse>>, ApiError> {
    let command = UpdateChapter {
        book_id: req.book_id,
        chapter_id: req.chapter_id,
        patch: req.patch,
    };

    let result = state.update_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ChapterResponse {
        id: result.id,
        book_id: result.book_id,
        number: result.number,
        title: result.title,
        original_content: result.original_content,
        generated_content: result.generated_content,
        status: result.status.as_str().to_string(),
    })))
}

/// 删除章节
pub async fn delete_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteChapterRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = DeleteChapter {
        book_id: req.book_id,
        chapter_id: req.chapter_id,
    };

    state.delete_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}

/// 跨所有书籍列出 pending 章节（生成 worker 轮询入口）
pub async fn list_pending_chapters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PendingChapterResponse>>>, ApiError> {
    let result = state
        .list_pending_chapters_handler
        .handle(ListPendingChapters)
        .await?;

    let responses: Vec<PendingChapterResponse> = result
        .into_iter()
        .map(|p| PendingChapterResponse {
            chapter_id: p.chapter_id,
            book_id: p.book_id,
            book_title: p.book_title,
            book_style: p.book_style,
            book_description: p.book_description,
            chapter_number: p.chapter_number,
            original_content: p.original_content,
            created_at: p.created_at,
        })
        .collect();

    Ok(Json(ApiResponse::success(responses)))
}
