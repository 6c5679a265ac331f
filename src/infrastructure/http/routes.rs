//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/style/list        GET   列出风格目录
//! - /api/book/create       POST  创建书籍
//! - /api/book/list         GET   列出所有书籍（含章节计数）
//! - /api/book/get          POST  获取书籍详情
//! - /api/book/delete       POST  删除书籍（级联删除章节）
//! - /api/chapter/create    POST  创建章节（pending 状态）
//! - /api/chapter/list      POST  列出某本书的章节
//! - /api/chapter/update    POST  部分更新章节（worker 回写入口）
//! - /api/chapter/delete    POST  删除章节
//! - /api/chapter/pending   GET   列出所有 pending 章节（worker 轮询入口）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/style", style_routes())
        .nest("/book", book_routes())
        .nest("/chapter", chapter_routes())
}

/// Style 路由
fn style_routes() -> Router<Arc<AppState>> {
    Router::new().route("/list", get(handlers::list_styles))
}

/// Book 路由
fn book_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_book))
        .route("/list", get(handlers::list_books))
        .route("/get", post(handlers::get_book))
        .route("/delete", post(handlers::delete_book))
}

/// Chapter 路由
fn chapter_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_chapter))
        .route("/list", post(handlers::list_chapters))
        .route("/update", post(handlers::update_chapter))
        .route("/delete", post(handlers::delete_chapter))
        .route("/pending", get(handlers::list_pending_chapters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{BookRepositoryPort, ChapterRepositoryPort};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteBookRepository, SqliteChapterRepository,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    async fn test_app() -> Router {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let book_repo: Arc<dyn BookRepositoryPort> =
            Arc::new(SqliteBookRepository::new(pool.clone()));
        let chapter_repo: Arc<dyn ChapterRepositoryPort> =
            Arc::new(SqliteChapterRepository::new(pool));

        create_routes().with_state(Arc::new(AppState::new(book_repo, chapter_repo)))
    }

    fn build_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        }
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Value {
        let response = app
            .clone()
            .oneshot(build_request(method, uri, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = test_app().await;
        let body = send_json(&app, Method::GET, "/api/ping", None).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_style_list_returns_catalog() {
        let app = test_app().await;
        let body = send_json(&app, Method::GET, "/api/style/list", None).await;

        assert_eq!(body["errno"], 0);
        let styles = body["data"].as_array().unwrap();
        assert_eq!(styles.len(), 8);
        assert_eq!(styles[0]["id"], "narratif");
        assert!(styles[0]["description"].as_str().unwrap().len() > 0);
    }

    #[tokio::test]
    async fn test_book_lifecycle() {
        let app = test_app().await;

        // 创建
        let created = send_json(
            &app,
            Method::POST,
            "/api/book/create",
            Some(json!({
                "title": "Les Marees",
                "description": "roman maritime",
                "original_text": "La mer etait calme.",
                "style": "suspense"
            })),
        )
        .await;
        assert_eq!(created["errno"], 0);
        assert_eq!(created["data"]["chapters_count"], 0);
        assert_eq!(created["data"]["style"], "suspense");
        let book_id = created["data"]["id"].as_str().unwrap().to_string();

        // 详情
        let fetched = send_json(
            &app,
            Method::POST,
            "/api/book/get",
            Some(json!({ "id": book_id })),
        )
        .await;
        assert_eq!(fetched["data"]["title"], "Les Marees");

        // 列表
        let listed = send_json(&app, Method::GET, "/api/book/list", None).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);

        // 删除
        let deleted = send_json(
            &app,
            Method::POST,
            "/api/book/delete",
            Some(json!({ "id": book_id })),
        )
        .await;
        assert_eq!(deleted["errno"], 0);

        // 再查报 404（errno 维度，HTTP 状态保持 200）
        let missing = send_json(
            &app,
            Method::POST,
            "/api/book/get",
            Some(json!({ "id": book_id })),
        )
        .await;
        assert_eq!(missing["errno"], 404);
        assert!(missing["data"].is_null());
    }

    #[tokio::test]
    async fn test_create_book_defaults_style() {
        let app = test_app().await;

        let created = send_json(
            &app,
            Method::POST,
            "/api/book/create",
            Some(json!({ "title": "Sans style", "original_text": "un manuscrit" })),
        )
        .await;
        assert_eq!(created["data"]["style"], "narratif");
    }

    #[tokio::test]
    async fn test_chapter_generation_workflow() {
        let app = test_app().await;

        let created = send_json(
            &app,
            Method::POST,
            "/api/book/create",
            Some(json!({ "title": "T", "original_text": "X", "style": "narratif" })),
        )
        .await;
        let book_id = created["data"]["id"].as_str().unwrap().to_string();

        // 创建 pending 章节
        let chapter = send_json(
            &app,
            Method::POST,
            "/api/chapter/create",
            Some(json!({
                "book_id": book_id,
                "number": 1,
                "original_content": "once upon a time"
            })),
        )
        .await;
        assert_eq!(chapter["errno"], 0);
        assert_eq!(chapter["data"]["status"], "pending");
        assert!(chapter["data"]["generated_content"].is_null());
        let chapter_id = chapter["data"]["id"].as_str().unwrap().to_string();

        // worker 轮询看到它，并带上书籍元数据
        let pending = send_json(&app, Method::GET, "/api/chapter/pending", None).await;
        let items = pending["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["book_title"], "T");
        assert_eq!(items[0]["book_style"], "narratif");
        assert_eq!(items[0]["chapter_number"], 1);
        assert_eq!(items[0]["original_content"], "once upon a time");

        // worker 回写生成结果
        let updated = send_json(
            &app,
            Method::POST,
            "/api/chapter/update",
            Some(json!({
                "book_id": book_id,
                "chapter_id": chapter_id,
                "status": "generated",
                "generated_content": "il etait une fois"
            })),
        )
        .await;
        assert_eq!(updated["errno"], 0);
        assert_eq!(updated["data"]["status"], "generated");
        // 补丁未提及的字段保持原值
        assert_eq!(updated["data"]["original_content"], "once upon a time");

        // 队列清空
        let pending = send_json(&app, Method::GET, "/api/chapter/pending", None).await;
        assert!(pending["data"].as_array().unwrap().is_empty());

        // 书籍计数跟进
        let fetched = send_json(
            &app,
            Method::POST,
            "/api/book/get",
            Some(json!({ "id": book_id })),
        )
        .await;
        assert_eq!(fetched["data"]["chapters_count"], 1);
    }

    #[tokio::test]
    async fn test_chapter_list_sorted_and_empty_for_unknown_book() {
        let app = test_app().await;

        let created = send_json(
            &app,
            Method::POST,
            "/api/book/create",
            Some(json!({ "title": "Melange", "original_text": "pages melangees" })),
        )
        .await;
        let book_id = created["data"]["id"].as_str().unwrap().to_string();

        for number in [3, 1, 2] {
            send_json(
                &app,
                Method::POST,
                "/api/chapter/create",
                Some(json!({
                    "book_id": book_id,
                    "number": number,
                    "original_content": format!("partie {}", number)
                })),
            )
            .await;
        }

        let listed = send_json(
            &app,
            Method::POST,
            "/api/chapter/list",
            Some(json!({ "book_id": book_id })),
        )
        .await;
        let numbers: Vec<i64> = listed["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["number"].as_i64().unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        // 未知书籍返回空列表而非 404
        let empty = send_json(
            &app,
            Method::POST,
            "/api/chapter/list",
            Some(json!({ "book_id": uuid::Uuid::new_v4() })),
        )
        .await;
        assert_eq!(empty["errno"], 0);
        assert!(empty["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chapter_ownership_is_scoped() {
        let app = test_app().await;

        let first = send_json(
            &app,
            Method::POST,
            "/api/book/create",
            Some(json!({ "title": "Proprietaire", "original_text": "texte A" })),
        )
        .await;
        let second = send_json(
            &app,
            Method::POST,
            "/api/book/create",
            Some(json!({ "title": "Intrus", "original_text": "texte B" })),
        )
        .await;
        let first_id = first["data"]["id"].as_str().unwrap().to_string();
        let second_id = second["data"]["id"].as_str().unwrap().to_string();

        let chapter = send_json(
            &app,
            Method::POST,
            "/api/chapter/create",
            Some(json!({ "book_id": first_id, "number": 1, "original_content": "debut" })),
        )
        .await;
        let chapter_id = chapter["data"]["id"].as_str().unwrap().to_string();

        // 用另一本书的 id 更新/删除，等同于不存在
        let update = send_json(
            &app,
            Method::POST,
            "/api/chapter/update",
            Some(json!({
                "book_id": second_id,
                "chapter_id": chapter_id,
                "title": "pirate"
            })),
        )
        .await;
        assert_eq!(update["errno"], 404);

        let delete = send_json(
            &app,
            Method::POST,
            "/api/chapter/delete",
            Some(json!({ "book_id": second_id, "chapter_id": chapter_id })),
        )
        .await;
        assert_eq!(delete["errno"], 404);
    }

    #[tokio::test]
    async fn test_create_chapter_under_unknown_book_is_not_found() {
        let app = test_app().await;

        let result = send_json(
            &app,
            Method::POST,
            "/api/chapter/create",
            Some(json!({
                "book_id": uuid::Uuid::new_v4(),
                "number": 1,
                "original_content": "orphelin"
            })),
        )
        .await;
        assert_eq!(result["errno"], 404);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_source_text() {
        let app = test_app().await;

        // original_text 为必填字段，缺失在反序列化时被拒绝
        let request = build_request(
            Method::POST,
            "/api/book/create",
            Some(json!({ "title": "Incomplet" })),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // original_content 同理
        let request = build_request(
            Method::POST,
            "/api/chapter/create",
            Some(json!({ "book_id": uuid::Uuid::new_v4(), "number": 1 })),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // 被拒的请求不落库
        let listed = send_json(&app, Method::GET, "/api/book/list", None).await;
        assert!(listed["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_status() {
        let app = test_app().await;

        let request = build_request(
            Method::POST,
            "/api/chapter/update",
            Some(json!({
                "book_id": uuid::Uuid::new_v4(),
                "chapter_id": uuid::Uuid::new_v4(),
                "status": "done"
            })),
        );

        // 状态枚举在反序列化时校验，未知值被传输层拒绝
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_distinguishes_clear_from_keep() {
        let app = test_app().await;

        let created = send_json(
            &app,
            Method::POST,
            "/api/book/create",
            Some(json!({ "title": "Nuances", "original_text": "esquisse" })),
        )
        .await;
        let book_id = created["data"]["id"].as_str().unwrap().to_string();

        let chapter = send_json(
            &app,
            Method::POST,
            "/api/chapter/create",
            Some(json!({ "book_id": book_id, "number": 1, "original_content": "brouillon" })),
        )
        .await;
        let chapter_id = chapter["data"]["id"].as_str().unwrap().to_string();

        // 先设置标题
        send_json(
            &app,
            Method::POST,
            "/api/chapter/update",
            Some(json!({ "book_id": book_id, "chapter_id": chapter_id, "title": "Depart" })),
        )
        .await;

        // 显式 null 清空标题，缺失的 original_content 保持原值
        let cleared = send_json(
            &app,
            Method::POST,
            "/api/chapter/update",
            Some(json!({ "book_id": book_id, "chapter_id": chapter_id, "title": null })),
        )
        .await;
        assert!(cleared["data"]["title"].is_null());
        assert_eq!(cleared["data"]["original_content"], "brouillon");
    }
}
