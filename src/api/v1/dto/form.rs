/*
 * Responsibility
 * - 登録フォームの入力 (全て文字列、空もあり得る)
 * - validation は presence/emptiness のみ (形式チェックは API 側)
 */
use serde::Deserialize;

use super::blogs::BlogState;

/// Raw registration form fields, as submitted by the console page or the CLI.
///
/// Missing fields deserialize to `""` so a partially filled form never
/// rejects at the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlogForm {
    pub title: String,
    pub category: String,
    pub keywords: String,
    pub published_at: String,
    #[serde(alias = "content")]
    pub content_file: String,
    pub references: String,
    pub state: String,
    pub created_at: String,
    pub last_update: String,
}

impl BlogForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.category.trim().is_empty() {
            return Err("category is required");
        }
        if self.content_file.trim().is_empty() {
            return Err("content reference is required");
        }
        if !self.state.trim().is_empty() && self.state.parse::<BlogState>().is_err() {
            return Err("state must be \"published\" or \"drafted\"");
        }

        Ok(())
    }

    /// Empty state falls back to the API default.
    pub fn blog_state(&self) -> BlogState {
        self.state.parse().unwrap_or_default()
    }
}
