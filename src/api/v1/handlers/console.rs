/*
 * Responsibility
 * - GET / (登録フォーム + 直近の status line)
 * - ページ描画の共通処理 (blogs handler からも使う)
 */
use axum::{extract::State, response::Html};

use crate::{
    api::v1::views::PageContext,
    services::render::{FetchView, StatusMessage},
    state::AppState,
};

/// Render the console page. Status lines not produced by the current request
/// fall back to the trackers' last known state.
pub(crate) fn render_page(
    state: &AppState,
    register_status: Option<&StatusMessage>,
    fetch: Option<&FetchView>,
) -> Html<String> {
    let console = &state.console;
    let last_register = StatusMessage::from_state(&console.registration_state());
    let last_fetch = StatusMessage::from_state(&console.retrieval_state());

    Html(state.views.console_page(PageContext {
        api_base: console.api_base_url(),
        schema: console.schema(),
        register_status: register_status.or(last_register.as_ref()),
        fetch_status: last_fetch.as_ref(),
        fetch,
    }))
}

pub async fn console_page(State(state): State<AppState>) -> Html<String> {
    render_page(&state, None, None)
}
