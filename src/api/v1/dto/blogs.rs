/*
 * Responsibility
 * - blog API の request/response DTO (wire format)
 * - 登録 payload は flat (canonical) / nested (legacy) の 2 形を持つ
 * - 取得系 response は read-only で描画にだけ使う
 */
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Publication state understood by the blog API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogState {
    #[default]
    Published,
    Drafted,
}

impl BlogState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogState::Published => "published",
            BlogState::Drafted => "drafted",
        }
    }
}

impl fmt::Display for BlogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlogState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "published" => Ok(BlogState::Published),
            "drafted" => Ok(BlogState::Drafted),
            other => Err(format!("unknown blog state: {other}")),
        }
    }
}

/// Canonical registration body (`POST /api/v1/blogs/register`).
///
/// Optional dates are serialized as `null`, never as `""`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRegisterRequest {
    pub title: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub published_at: Option<String>,
    pub content_file: String,
    pub references: Vec<String>,
    pub state: BlogState,
}

/// Legacy registration body (`POST /api/v1/blog/register`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedRegisterRequest {
    pub title: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub dates: PayloadDates,
    pub content: String,
    pub references: Vec<String>,
    pub state: BlogState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayloadDates {
    pub created_at: Option<String>,
    pub published_at: Option<String>,
    pub last_update: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegisterBlogPayload {
    Flat(FlatRegisterRequest),
    Nested(NestedRegisterRequest),
}

impl RegisterBlogPayload {
    pub fn title(&self) -> &str {
        match self {
            RegisterBlogPayload::Flat(p) => &p.title,
            RegisterBlogPayload::Nested(p) => &p.title,
        }
    }
}

/// Server-assigned identifier. The API has returned both strings and numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlogId {
    Number(i64),
    /// Numbers outside `i64` (large unsigned, fractional) kept as sent.
    OtherNumber(serde_json::Number),
    Text(String),
}

impl BlogId {
    /// Empty strings count as "no id", same as a missing field.
    pub fn is_present(&self) -> bool {
        match self {
            BlogId::Number(_) | BlogId::OtherNumber(_) => true,
            BlogId::Text(s) => !s.trim().is_empty(),
        }
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlogId::Number(n) => write!(f, "{n}"),
            BlogId::OtherNumber(n) => write!(f, "{n}"),
            BlogId::Text(s) => f.write_str(s),
        }
    }
}

/// Success body of a registration call. Every field is optional; the status
/// line renders whatever the server sent back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegisterBlogResponse {
    #[serde(default)]
    pub id: Option<BlogId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlogDates {
    pub created_at: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub last_update: Option<String>,
}

/// One item under the `blogs` wrapper key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlogRecord {
    pub id: BlogId,
    pub title: String,
    pub category: String,
    pub state: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub dates: BlogDates,
    #[serde(default)]
    pub content_file: Option<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_payload_keeps_null_dates() {
        let payload = RegisterBlogPayload::Flat(FlatRegisterRequest {
            title: "t".into(),
            category: "c".into(),
            keywords: vec![],
            published_at: None,
            content_file: "posts/t.md".into(),
            references: vec![],
            state: BlogState::Drafted,
        });

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["published_at"], serde_json::Value::Null);
        assert_eq!(value["state"], "drafted");
        assert!(value.get("dates").is_none());
    }

    #[test]
    fn nested_payload_has_dates_object() {
        let payload = RegisterBlogPayload::Nested(NestedRegisterRequest {
            title: "t".into(),
            category: "c".into(),
            keywords: vec!["rust".into()],
            dates: PayloadDates {
                created_at: Some("2024-01-01".into()),
                ..Default::default()
            },
            content: "posts/t.md".into(),
            references: vec![],
            state: BlogState::Published,
        });

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["dates"]["created_at"], "2024-01-01");
        assert_eq!(value["dates"]["published_at"], serde_json::Value::Null);
        assert_eq!(value["content"], "posts/t.md");
        assert!(value.get("content_file").is_none());
    }

    #[test]
    fn blog_id_accepts_numbers_and_strings() {
        let r: RegisterBlogResponse = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(r.id, Some(BlogId::Number(42)));

        let r: RegisterBlogResponse =
            serde_json::from_value(json!({"id": "a1b2", "status": "success"})).unwrap();
        assert_eq!(r.id.unwrap().to_string(), "a1b2");
        assert_eq!(r.status.as_deref(), Some("success"));

        assert!(!BlogId::Text("  ".into()).is_present());
    }

    #[test]
    fn blog_state_parsing() {
        assert_eq!("Drafted".parse::<BlogState>(), Ok(BlogState::Drafted));
        assert_eq!(" published ".parse::<BlogState>(), Ok(BlogState::Published));
        assert!("archived".parse::<BlogState>().is_err());
    }

    #[test]
    fn blog_record_tolerates_missing_optional_fields() {
        let record: BlogRecord = serde_json::from_value(json!({
            "id": "x1",
            "title": "Hello",
            "category": "tech",
            "state": "drafted",
            "dates": {"created_at": "2024-05-01T10:00:00"}
        }))
        .unwrap();

        assert!(record.keywords.is_empty());
        assert_eq!(record.dates.published_at, None);
    }
}
