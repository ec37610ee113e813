/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /status, /blogs 系をまとめる
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    blogs::{get_blog, list_blogs, register_blog},
    health::health,
    status::status,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/blogs", get(list_blogs))
        .route("/blogs/register", post(register_blog))
        .route("/blogs/{blog_id}", get(get_blog))
}
