//! Pure response → view-model rendering.
//!
//! Nothing here touches HTML or the terminal: adapters (`api::v1::views`,
//! `blog-cli`) only display what these functions produce.
use std::fmt;

use serde::Serialize;

use crate::api::v1::dto::blogs::BlogRecord;
use crate::services::blog_api::{ApiError, ApiResult, BlogLookup, RegistrationReceipt};
use crate::services::payload::PayloadError;
use crate::services::submission::SubmissionState;

pub const SUBMITTING: &str = "Submitting...";
pub const LOADING: &str = "Loading...";
pub const NO_ENTRIES: &str = "No blog entries found in the database.";
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Pending,
    Success,
    Error,
}

impl Tone {
    pub fn color(&self) -> &'static str {
        match self {
            Tone::Pending => "#3498db",
            Tone::Success => "green",
            Tone::Error => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub tone: Tone,
    pub text: String,
}

impl StatusMessage {
    pub fn pending(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Pending,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.tone == Tone::Success
    }

    /// Status line for the last known state of a tracker. `Idle` shows nothing.
    pub fn from_state(state: &SubmissionState) -> Option<Self> {
        match state {
            SubmissionState::Idle => None,
            SubmissionState::Submitting { .. } => Some(Self::pending(SUBMITTING)),
            SubmissionState::Success { message, .. } => Some(Self::success(message.clone())),
            SubmissionState::Failed { message, .. } => Some(Self::error(message.clone())),
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One display block of the results area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub state: String,
    pub published: String,
    pub created: String,
    pub keywords: String,
}

impl From<&BlogRecord> for BlogCard {
    fn from(record: &BlogRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            category: record.category.clone(),
            state: record.state.clone(),
            published: record
                .dates
                .published_at
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            created: record.dates.created_at.clone(),
            keywords: record.keywords.join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Entries(Vec<BlogCard>),
    /// Zero records: an explicit notice, never an empty container.
    Empty,
    NotFound(String),
    Error(String),
}

/// What a retrieval action shows: the status line plus the results area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchView {
    pub status: StatusMessage,
    pub results: ResultsView,
}

pub fn invalid_form_status(err: &PayloadError) -> StatusMessage {
    StatusMessage::error(format!("❌ Submission failed: {err}"))
}

pub fn registration_status(result: &ApiResult<RegistrationReceipt>) -> StatusMessage {
    match result {
        Ok(receipt) => match receipt.response.id.as_ref().filter(|id| id.is_present()) {
            Some(id) => StatusMessage::success(format!("✅ Registered successfully! ID: {id}")),
            None => StatusMessage::success(format!(
                "✅ Registered, but ID was missing from response. Status: {}",
                receipt.response.status.as_deref().unwrap_or("unknown")
            )),
        },
        Err(ApiError::Http { detail, .. }) => StatusMessage::error(format!(
            "❌ Submission failed: Registration failed: {detail}"
        )),
        Err(e) => StatusMessage::error(format!("❌ Submission failed: {e}")),
    }
}

fn failed_fetch(reason: String) -> FetchView {
    FetchView {
        status: StatusMessage::error(format!("❌ Fetch failed: {reason}")),
        results: ResultsView::Error(format!("Error: {reason}")),
    }
}

fn fetch_failure_reason(what: &str, err: &ApiError) -> String {
    match err {
        ApiError::Http { status, detail } => {
            format!("Failed to fetch {what}. Status: {status}. Detail: {detail}")
        }
        other => other.to_string(),
    }
}

pub fn blog_list_view(result: &ApiResult<Vec<BlogRecord>>) -> FetchView {
    match result {
        Ok(blogs) if blogs.is_empty() => FetchView {
            status: StatusMessage::success("✅ Successfully retrieved 0 blogs."),
            results: ResultsView::Empty,
        },
        Ok(blogs) => FetchView {
            status: StatusMessage::success(format!(
                "✅ Successfully retrieved {} blogs.",
                blogs.len()
            )),
            results: ResultsView::Entries(blogs.iter().map(BlogCard::from).collect()),
        },
        Err(e) => failed_fetch(fetch_failure_reason("blogs", e)),
    }
}

pub fn single_blog_view(id: &str, result: &ApiResult<BlogLookup>) -> FetchView {
    match result {
        Ok(BlogLookup::Found(record)) => FetchView {
            status: StatusMessage::success(format!("✅ Retrieved blog {id}.")),
            results: ResultsView::Entries(vec![BlogCard::from(record)]),
        },
        Ok(BlogLookup::NotFound { message }) => {
            let notice = message
                .clone()
                .unwrap_or_else(|| format!("No blog found with ID ({id})."));
            FetchView {
                status: StatusMessage::error(format!("❌ {notice}")),
                results: ResultsView::NotFound(notice),
            }
        }
        Err(e) => failed_fetch(fetch_failure_reason(&format!("blog {id}"), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::v1::dto::blogs::{BlogDates, BlogId, RegisterBlogResponse};

    fn record(published_at: Option<&str>) -> BlogRecord {
        BlogRecord {
            id: BlogId::Text("b-1".into()),
            title: "Hello".into(),
            category: "tech".into(),
            state: "published".into(),
            keywords: vec!["rust".into(), "axum".into()],
            dates: BlogDates {
                created_at: "2024-05-01T10:00:00".into(),
                published_at: published_at.map(str::to_string),
                last_update: None,
            },
            content_file: None,
            references: vec![],
        }
    }

    fn receipt(body: RegisterBlogResponse) -> ApiResult<RegistrationReceipt> {
        Ok(RegistrationReceipt {
            response: body,
            status_code: 201,
        })
    }

    #[test]
    fn registration_echoes_id() {
        let status = registration_status(&receipt(RegisterBlogResponse {
            id: Some(BlogId::Number(42)),
            ..Default::default()
        }));
        assert!(status.is_success());
        assert!(status.text.contains("42"));
    }

    #[test]
    fn registration_without_id_reports_status() {
        let status = registration_status(&receipt(RegisterBlogResponse {
            id: Some(BlogId::Text(String::new())),
            status: Some("success".into()),
            message: None,
        }));
        assert!(status.is_success());
        assert_eq!(
            status.text,
            "✅ Registered, but ID was missing from response. Status: success"
        );
    }

    #[test]
    fn registration_http_failure_shows_detail() {
        let status = registration_status(&Err(ApiError::Http {
            status: 422,
            detail: "title required".into(),
        }));
        assert_eq!(status.tone, Tone::Error);
        assert!(status.text.contains("title required"));
    }

    #[test]
    fn registration_network_failure_shows_cause() {
        let status = registration_status(&Err(ApiError::Network("connection refused".into())));
        assert_eq!(status.text, "❌ Submission failed: connection refused");
    }

    #[test]
    fn card_uses_placeholder_for_missing_published_date() {
        let card = BlogCard::from(&record(None));
        assert_eq!(card.published, NOT_AVAILABLE);
        assert_eq!(card.created, "2024-05-01T10:00:00");
        assert_eq!(card.keywords, "rust, axum");

        let card = BlogCard::from(&record(Some("2024-05-02")));
        assert_eq!(card.published, "2024-05-02");
    }

    #[test]
    fn empty_list_renders_no_entries() {
        let view = blog_list_view(&Ok(vec![]));
        assert_eq!(view.results, ResultsView::Empty);
        assert!(view.status.is_success());
    }

    #[test]
    fn list_with_entries() {
        let view = blog_list_view(&Ok(vec![record(None), record(Some("2024-05-02"))]));
        match view.results {
            ResultsView::Entries(cards) => assert_eq!(cards.len(), 2),
            other => panic!("unexpected results: {other:?}"),
        }
        assert_eq!(view.status.text, "✅ Successfully retrieved 2 blogs.");
    }

    #[test]
    fn malformed_list_shows_error_in_results() {
        let err = ApiError::Malformed {
            status: Some("ok".into()),
            message: None,
            reason: "expected a list in the \"blogs\" key".into(),
        };
        let view = blog_list_view(&Err(err.clone()));

        assert_eq!(view.status.tone, Tone::Error);
        assert_eq!(view.results, ResultsView::Error(format!("Error: {err}")));
    }

    #[test]
    fn http_list_failure_mentions_status_code() {
        let view = blog_list_view(&Err(ApiError::Http {
            status: 503,
            detail: "Service Unavailable".into(),
        }));
        assert_eq!(
            view.status.text,
            "❌ Fetch failed: Failed to fetch blogs. Status: 503. Detail: Service Unavailable"
        );
    }

    #[test]
    fn single_blog_not_found() {
        let view = single_blog_view("zz", &Ok(BlogLookup::NotFound { message: None }));
        assert_eq!(
            view.results,
            ResultsView::NotFound("No blog found with ID (zz).".into())
        );

        let view = single_blog_view(
            "zz",
            &Ok(BlogLookup::NotFound {
                message: Some("Blog zz was archived".into()),
            }),
        );
        assert_eq!(view.results, ResultsView::NotFound("Blog zz was archived".into()));
        assert_eq!(view.status.text, "❌ Blog zz was archived");
        assert_eq!(view.status.tone, Tone::Error);
    }

    #[test]
    fn status_from_state() {
        assert_eq!(StatusMessage::from_state(&SubmissionState::Idle), None);
        let pending = StatusMessage::from_state(&SubmissionState::Submitting {
            attempt_id: uuid::Uuid::nil(),
        })
        .unwrap();
        assert_eq!(pending.text, SUBMITTING);
        assert_eq!(pending.tone.color(), "#3498db");
    }
}
