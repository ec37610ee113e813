/*
 * Responsibility
 * - 登録 / 一覧取得 / 単体取得 の各フローを組み立てる
 *   (payload build → BlogApi 呼び出し → render → 状態遷移の記録)
 * - HTML や CLI には依存しない (adapter 側が表示だけ行う)
 */
use std::sync::Arc;

use crate::api::v1::dto::form::BlogForm;
use crate::services::blog_api::BlogApi;
use crate::services::payload::{PayloadBuilder, SchemaVariant};
use crate::services::render::{self, FetchView, StatusMessage};
use crate::services::submission::{SubmissionState, SubmissionTracker, Ticket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub status: StatusMessage,
    /// List refreshed after a successful registration.
    pub refreshed: Option<FetchView>,
}

pub struct ConsoleService {
    api: Arc<dyn BlogApi>,
    builder: PayloadBuilder,
    registration: SubmissionTracker,
    retrieval: SubmissionTracker,
}

impl ConsoleService {
    pub fn new(api: Arc<dyn BlogApi>, schema: SchemaVariant) -> Self {
        Self {
            api,
            builder: PayloadBuilder::new(schema),
            registration: SubmissionTracker::new("registration"),
            retrieval: SubmissionTracker::new("retrieval"),
        }
    }

    pub fn api_base_url(&self) -> &str {
        self.api.base_url()
    }

    pub fn schema(&self) -> SchemaVariant {
        self.builder.variant()
    }

    pub fn registration_state(&self) -> SubmissionState {
        self.registration.current()
    }

    pub fn retrieval_state(&self) -> SubmissionState {
        self.retrieval.current()
    }

    fn record(tracker: &SubmissionTracker, ticket: Ticket, status: &StatusMessage) {
        if status.is_success() {
            tracker.succeed(ticket, status.text.clone());
        } else {
            tracker.fail(ticket, status.text.clone());
        }
    }

    pub async fn submit(&self, form: &BlogForm) -> SubmitOutcome {
        let ticket = self.registration.begin();
        tracing::info!(
            attempt = %ticket.attempt_id(),
            schema = %self.schema(),
            "registration submitted"
        );

        let status = match self.builder.build(form) {
            Err(e) => {
                tracing::info!(attempt = %ticket.attempt_id(), error = %e, "registration form rejected");
                render::invalid_form_status(&e)
            }
            Ok(payload) => {
                let result = self.api.register(&payload).await;
                if let Err(e) = &result {
                    tracing::warn!(attempt = %ticket.attempt_id(), error = %e, "registration failed");
                }
                render::registration_status(&result)
            }
        };
        Self::record(&self.registration, ticket, &status);

        let refreshed = if status.is_success() {
            Some(self.fetch_blogs().await)
        } else {
            None
        };

        SubmitOutcome { status, refreshed }
    }

    pub async fn fetch_blogs(&self) -> FetchView {
        let ticket = self.retrieval.begin();
        tracing::info!(attempt = %ticket.attempt_id(), "fetching blogs");

        let result = self.api.list_blogs().await;
        if let Err(e) = &result {
            tracing::warn!(attempt = %ticket.attempt_id(), error = %e, "fetching blogs failed");
        }

        let view = render::blog_list_view(&result);
        Self::record(&self.retrieval, ticket, &view.status);
        view
    }

    pub async fn fetch_blog(&self, id: &str) -> FetchView {
        let ticket = self.retrieval.begin();
        tracing::info!(attempt = %ticket.attempt_id(), blog_id = id, "fetching blog");

        let result = self.api.get_blog(id).await;
        if let Err(e) = &result {
            tracing::warn!(attempt = %ticket.attempt_id(), blog_id = id, error = %e, "fetching blog failed");
        }

        let view = render::single_blog_view(id, &result);
        Self::record(&self.retrieval, ticket, &view.status);
        view
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::api::v1::dto::blogs::{BlogId, BlogRecord, RegisterBlogPayload, RegisterBlogResponse};
    use crate::services::blog_api::{ApiError, ApiResult, BlogLookup, RegistrationReceipt};
    use crate::services::render::ResultsView;

    #[derive(Default)]
    struct FakeApi {
        register_result: Option<ApiResult<RegistrationReceipt>>,
        list_result: Option<ApiResult<Vec<BlogRecord>>>,
        sent: Mutex<Vec<RegisterBlogPayload>>,
        list_calls: Mutex<usize>,
    }

    #[async_trait]
    impl BlogApi for FakeApi {
        fn base_url(&self) -> &str {
            "http://fake/"
        }

        async fn register(&self, payload: &RegisterBlogPayload) -> ApiResult<RegistrationReceipt> {
            self.sent.lock().unwrap().push(payload.clone());
            self.register_result.clone().expect("register not scripted")
        }

        async fn list_blogs(&self) -> ApiResult<Vec<BlogRecord>> {
            *self.list_calls.lock().unwrap() += 1;
            self.list_result.clone().unwrap_or_else(|| Ok(vec![]))
        }

        async fn get_blog(&self, id: &str) -> ApiResult<BlogLookup> {
            Ok(BlogLookup::NotFound {
                message: Some(format!("Blog {id} was archived")),
            })
        }
    }

    fn form() -> BlogForm {
        BlogForm {
            title: "Hello".into(),
            category: "tech".into(),
            keywords: "a, b".into(),
            content_file: "posts/hello.md".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn successful_submit_refreshes_list() {
        let api = Arc::new(FakeApi {
            register_result: Some(Ok(RegistrationReceipt {
                response: RegisterBlogResponse {
                    id: Some(BlogId::Number(7)),
                    ..Default::default()
                },
                status_code: 201,
            })),
            ..Default::default()
        });
        let console = ConsoleService::new(api.clone(), SchemaVariant::Flat);

        let outcome = console.submit(&form()).await;

        assert_eq!(outcome.status.text, "✅ Registered successfully! ID: 7");
        assert_eq!(outcome.refreshed.unwrap().results, ResultsView::Empty);
        assert_eq!(*api.list_calls.lock().unwrap(), 1);
        assert_eq!(api.sent.lock().unwrap()[0].title(), "Hello");
        assert!(matches!(
            console.registration_state(),
            SubmissionState::Success { .. }
        ));
    }

    #[tokio::test]
    async fn failed_submit_does_not_refresh() {
        let api = Arc::new(FakeApi {
            register_result: Some(Err(ApiError::Http {
                status: 422,
                detail: "title required".into(),
            })),
            ..Default::default()
        });
        let console = ConsoleService::new(api.clone(), SchemaVariant::Flat);

        let outcome = console.submit(&form()).await;

        assert!(outcome.status.text.contains("title required"));
        assert!(outcome.refreshed.is_none());
        assert_eq!(*api.list_calls.lock().unwrap(), 0);
        assert!(matches!(
            console.registration_state(),
            SubmissionState::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_api() {
        let api = Arc::new(FakeApi::default());
        let console = ConsoleService::new(api.clone(), SchemaVariant::Nested);

        let outcome = console.submit(&BlogForm::default()).await;

        assert_eq!(outcome.status.text, "❌ Submission failed: title is required");
        assert!(api.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_records_retrieval_state() {
        let api = Arc::new(FakeApi {
            list_result: Some(Err(ApiError::Network("connection refused".into()))),
            ..Default::default()
        });
        let console = ConsoleService::new(api, SchemaVariant::Flat);

        let view = console.fetch_blogs().await;

        assert_eq!(
            view.results,
            ResultsView::Error("Error: connection refused".into())
        );
        match console.retrieval_state() {
            SubmissionState::Failed { message, .. } => {
                assert_eq!(message, "❌ Fetch failed: connection refused")
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_blog_surfaces_server_message() {
        let console = ConsoleService::new(Arc::new(FakeApi::default()), SchemaVariant::Flat);

        let view = console.fetch_blog("x").await;

        assert_eq!(view.results, ResultsView::NotFound("Blog x was archived".into()));
        match console.retrieval_state() {
            SubmissionState::Failed { message, .. } => assert_eq!(message, "❌ Blog x was archived"),
            other => panic!("unexpected state: {other:?}"),
        }
    }
}
