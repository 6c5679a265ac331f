//! Style HTTP Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::ListStyles;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StyleResponse {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出风格目录（供创建书籍的表单使用）
pub async fn list_styles(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<StyleResponse>>> {
    let result = state.list_styles_handler.handle(ListStyles).await;

    let responses: Vec<StyleResponse> = result
        .into_iter()
        .map(|s| StyleResponse {
            id: s.id,
            name: s.name,
            description: s.description,
        })
        .collect();

    Json(ApiResponse::success(responses))
}
