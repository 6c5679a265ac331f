//! Book HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{CreateBook, DeleteBook, GetBook, ListBooks};
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub description: Option<String>,
    /// 原文为必填项，缺失在反序列化时被拒绝
    pub original_text: String,
    /// 未指定时采用目录首项
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_style() -> String {
    "narratif".to_string()
}

#[derive(Debug, Deserialize)]
pub struct GetBookRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBookRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub original_text: Option<String>,
    pub style: String,
    pub created_at: String,
    pub chapters_count: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// 创建书籍
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookRequest>,
) -> Result<Json<ApiResponse<BookResponse>>, ApiError> {
    let command = CreateBook {
        title: req.title,
        description: req.description,
        original_text: req.original_text,
        style: req.style,
    };

    let result = state.create_book_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(BookResponse {
        id: result.id,
        title: result.title,
        description: result.description,
        original_text: result.original_text,
        style: result.style,
        created_at: result.created_at,
        chapters_count: result.chapters_count,
    })))
}

/// 获取书籍列表
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BookResponse>>>, ApiError> {
    let result = state.list_books_handler.handle(ListBooks).await?;

    let responses: Vec<BookResponse> = result
        .into_iter()
        .map(|b| BookResponse {
            id: b.id,
            title: b.title,
            description: b.description,
            original_text: b.original_text,
            style: b.style,
            created_at: b.created_at,
            chapters_count: b.chapters_count,
        })
        .collect();

    Ok(Json(ApiResponse::success(responses)))
}

/// 获取书籍详情
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetBookRequest>,
) -> Result<Json<ApiResponse<BookResponse>>, ApiError> {
    let query = GetBook { book_id: req.id };

    let result = state.get_book_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(BookResponse {
        id: result.id,
        title: result.title,
        description: result.description,
        original_text: result.original_text,
        style: result.style,
        created_at: result.created_at,
        chapters_count: result.chapters_count,
    })))
}

/// 删除书籍（连同其全部章节）
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteBookRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = DeleteBook { book_id: req.id };

    state.delete_book_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}
