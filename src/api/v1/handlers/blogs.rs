/*
 * Responsibility
 * - POST /blogs/register (urlencoded form → 登録 → ページ再描画)
 * - GET /blogs, GET /blogs/{blog_id} (取得 → results 描画)
 * - 失敗は HTTP エラーにせず、ページ上の status / results に表示する
 */
use axum::{
    Form,
    extract::{Path, State},
    response::Html,
};

use super::console::render_page;
use crate::{api::v1::dto::form::BlogForm, state::AppState};

pub async fn register_blog(
    State(state): State<AppState>,
    Form(form): Form<BlogForm>,
) -> Html<String> {
    let outcome = state.console.submit(&form).await;
    render_page(&state, Some(&outcome.status), outcome.refreshed.as_ref())
}

pub async fn list_blogs(State(state): State<AppState>) -> Html<String> {
    let view = state.console.fetch_blogs().await;
    render_page(&state, None, Some(&view))
}

pub async fn get_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<String>,
) -> Html<String> {
    let view = state.console.fetch_blog(&blog_id).await;
    render_page(&state, None, Some(&view))
}
