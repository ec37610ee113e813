/*
 * Responsibility
 * - フォーム入力 → 登録 payload への変換 (純粋関数、I/O なし)
 * - schema variant (flat / nested) の切り替えをここに閉じ込める
 * - 送信は呼び出し側 (BlogApi) の責務
 */
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::api::v1::dto::{
    blogs::{FlatRegisterRequest, NestedRegisterRequest, PayloadDates, RegisterBlogPayload},
    form::BlogForm,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("{0}")]
    Invalid(&'static str),
}

/// Which registration schema the target API speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaVariant {
    /// `content_file` + top-level `published_at`, posted to `blogs/register`.
    #[default]
    Flat,
    /// Legacy: `content` + `dates.{created_at,published_at,last_update}`,
    /// posted to `blog/register`.
    Nested,
}

impl SchemaVariant {
    /// Path relative to the API base URL.
    pub fn register_path(&self) -> &'static str {
        match self {
            SchemaVariant::Flat => "api/v1/blogs/register",
            SchemaVariant::Nested => "api/v1/blog/register",
        }
    }

    /// Name of the form field that carries the content reference.
    pub fn content_field(&self) -> &'static str {
        match self {
            SchemaVariant::Flat => "content_file",
            SchemaVariant::Nested => "content",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::Flat => "flat",
            SchemaVariant::Nested => "nested",
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(SchemaVariant::Flat),
            "nested" | "legacy" => Ok(SchemaVariant::Nested),
            other => Err(format!("unknown schema variant: {other}")),
        }
    }
}

/// Split a free-text field on commas and line breaks.
///
/// Pieces are trimmed and empty pieces dropped. Order is preserved and
/// duplicates are kept.
pub fn parse_delimited_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `""` becomes `None` so the API receives `null` instead of an unparsable date.
pub fn optional_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadBuilder {
    variant: SchemaVariant,
}

impl PayloadBuilder {
    pub fn new(variant: SchemaVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    pub fn build(&self, form: &BlogForm) -> Result<RegisterBlogPayload, PayloadError> {
        form.validate().map_err(PayloadError::Invalid)?;

        let title = form.title.trim().to_string();
        let category = form.category.trim().to_string();
        let keywords = parse_delimited_list(&form.keywords);
        let references = parse_delimited_list(&form.references);
        let content = form.content_file.trim().to_string();
        let state = form.blog_state();

        let payload = match self.variant {
            SchemaVariant::Flat => RegisterBlogPayload::Flat(FlatRegisterRequest {
                title,
                category,
                keywords,
                published_at: optional_date(&form.published_at),
                content_file: content,
                references,
                state,
            }),
            SchemaVariant::Nested => RegisterBlogPayload::Nested(NestedRegisterRequest {
                title,
                category,
                keywords,
                dates: PayloadDates {
                    created_at: optional_date(&form.created_at),
                    published_at: optional_date(&form.published_at),
                    last_update: optional_date(&form.last_update),
                },
                content,
                references,
                state,
            }),
        };

        Ok(payload)
    }
}
