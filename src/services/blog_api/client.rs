//! Blog API client interface and response interpretation.
//!
//! Transport implementations only move bytes; what a status code and body
//! *mean* is decided by the pure `interpret_*` functions below so they can be
//! tested without a server.
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::api::v1::dto::blogs::{BlogRecord, RegisterBlogPayload, RegisterBlogResponse};

/// Wrapper key holding the list in `GET /api/v1/blogs`.
pub const BLOGS_KEY: &str = "blogs";
/// Wrapper key holding the record in `GET /api/v1/blogs/{id}`.
pub const BLOG_KEY: &str = "blog";

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures surfaced to the user. None of these are fatal to the process.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never completed.
    #[error("{0}")]
    Network(String),
    /// Non-2xx status.
    #[error("{detail}")]
    Http { status: u16, detail: String },
    /// 2xx status but the body does not match the expected schema.
    #[error(
        "API returned malformed data ({reason}). Status: {} - {}",
        .status.as_deref().unwrap_or("unknown"),
        .message.as_deref().unwrap_or("unknown")
    )]
    Malformed {
        status: Option<String>,
        message: Option<String>,
        reason: String,
    },
    #[error("invalid endpoint url: {0}")]
    Endpoint(String),
}

impl ApiError {
    fn malformed(body: Option<&Value>, reason: impl Into<String>) -> Self {
        ApiError::Malformed {
            status: body.and_then(|b| string_field(b, "status")),
            message: body.and_then(|b| string_field(b, "message")),
            reason: reason.into(),
        }
    }
}

/// Outcome of a successful registration call.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationReceipt {
    pub response: RegisterBlogResponse,
    pub status_code: u16,
}

/// Answer of `GET /api/v1/blogs/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub enum BlogLookup {
    Found(BlogRecord),
    /// `blog: null`, with the server's `message` when it sent one.
    NotFound { message: Option<String> },
}

/// The blog REST API as seen by the console.
///
/// Implementations must be shareable across handlers (`Arc<dyn BlogApi>`).
#[async_trait]
pub trait BlogApi: Send + Sync + 'static {
    // Base URL the requests are sent to (for logging and the page header).
    fn base_url(&self) -> &str;

    async fn register(&self, payload: &RegisterBlogPayload) -> ApiResult<RegistrationReceipt>;

    async fn list_blogs(&self) -> ApiResult<Vec<BlogRecord>>;

    async fn get_blog(&self, id: &str) -> ApiResult<BlogLookup>;
}

fn string_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn parse_body(body: &[u8]) -> Option<Value> {
    serde_json::from_slice(body).ok()
}

/// Human-readable reason for a non-2xx response.
///
/// `detail` wins when present and non-empty (validation errors that carry a
/// structured `detail` are shown as compact JSON), then the status text, then
/// a generic label.
pub fn failure_detail(status: StatusCode, body: Option<&Value>) -> String {
    let detail = body.and_then(|b| match b.get("detail") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Null) | Some(Value::String(_)) | None => None,
        Some(other) => Some(other.to_string()),
    });

    detail
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Unknown error".to_string())
}

fn ensure_success(status: StatusCode, body: Option<&Value>) -> ApiResult<()> {
    if status.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: status.as_u16(),
        detail: failure_detail(status, body),
    })
}

pub fn interpret_registration(status: StatusCode, body: &[u8]) -> ApiResult<RegistrationReceipt> {
    let value = parse_body(body);
    ensure_success(status, value.as_ref())?;

    let value = value.ok_or_else(|| ApiError::malformed(None, "response body is not JSON"))?;
    if !value.is_object() {
        return Err(ApiError::malformed(None, "expected a JSON object"));
    }
    let response: RegisterBlogResponse = serde_json::from_value(value.clone())
        .map_err(|e| ApiError::malformed(Some(&value), e.to_string()))?;

    Ok(RegistrationReceipt {
        response,
        status_code: status.as_u16(),
    })
}

pub fn interpret_blog_list(status: StatusCode, body: &[u8]) -> ApiResult<Vec<BlogRecord>> {
    let value = parse_body(body);
    ensure_success(status, value.as_ref())?;

    let value = value.ok_or_else(|| ApiError::malformed(None, "response body is not JSON"))?;
    let Some(items) = value.get(BLOGS_KEY).filter(|v| v.is_array()) else {
        return Err(ApiError::malformed(
            Some(&value),
            format!("expected a list in the \"{BLOGS_KEY}\" key"),
        ));
    };

    serde_json::from_value(items.clone())
        .map_err(|e| ApiError::malformed(Some(&value), format!("invalid blog record: {e}")))
}

pub fn interpret_blog(status: StatusCode, body: &[u8]) -> ApiResult<BlogLookup> {
    let value = parse_body(body);
    ensure_success(status, value.as_ref())?;

    let value = value.ok_or_else(|| ApiError::malformed(None, "response body is not JSON"))?;
    match value.get(BLOG_KEY) {
        Some(Value::Null) => Ok(BlogLookup::NotFound {
            message: string_field(&value, "message").filter(|m| !m.trim().is_empty()),
        }),
        Some(record @ Value::Object(_)) => serde_json::from_value(record.clone())
            .map(BlogLookup::Found)
            .map_err(|e| ApiError::malformed(Some(&value), format!("invalid blog record: {e}"))),
        _ => Err(ApiError::malformed(
            Some(&value),
            format!("expected an object in the \"{BLOG_KEY}\" key"),
        )),
    }
}
