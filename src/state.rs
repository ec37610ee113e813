/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - console: 各フローと状態遷移, views: HTML template
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::api::v1::views::Views;
use crate::services::{blog_api::BlogApi, console::ConsoleService, payload::SchemaVariant};

#[derive(Clone)]
pub struct AppState {
    pub console: Arc<ConsoleService>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(api: Arc<dyn BlogApi>, schema: SchemaVariant) -> Result<Self, ramhorns::Error> {
        Ok(Self {
            console: Arc::new(ConsoleService::new(api, schema)),
            views: Arc::new(Views::new()?),
        })
    }
}
