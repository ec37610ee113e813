//! reqwest-backed `BlogApi`.
use async_trait::async_trait;
use reqwest::{
    RequestBuilder, StatusCode,
    header::{ACCEPT, HeaderValue},
};
use url::Url;

use super::client::{
    ApiError, ApiResult, BlogApi, BlogLookup, RegistrationReceipt, interpret_blog,
    interpret_blog_list, interpret_registration,
};
use crate::api::v1::dto::blogs::{BlogRecord, RegisterBlogPayload};
use crate::config::BlogApiConfig;
use crate::services::payload::SchemaVariant;

const BLOGS_PATH: &str = "api/v1/blogs";

const CLIENT_USER_AGENT: &str = concat!("blog-console/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct HttpBlogClient {
    http: reqwest::Client,
    base_url: Url,
    schema: SchemaVariant,
}

impl HttpBlogClient {
    pub fn new(config: &BlogApiConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(CLIENT_USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            schema: config.schema,
        })
    }

    pub fn schema(&self) -> SchemaVariant {
        self.schema
    }

    fn network_error(e: reqwest::Error) -> ApiError {
        // `{:#}` prints the whole source chain ("... tcp connect error: Connection refused").
        ApiError::Network(format!("{:#}", anyhow::Error::from(e)))
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Endpoint(format!("{}{path}: {e}", self.base_url)))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<(StatusCode, Vec<u8>)> {
        let response = request
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = ?e, "blog api request failed");
                Self::network_error(e)
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(Self::network_error)?;

        tracing::debug!(%status, bytes = body.len(), "blog api responded");
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl BlogApi for HttpBlogClient {
    fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    async fn register(&self, payload: &RegisterBlogPayload) -> ApiResult<RegistrationReceipt> {
        let url = self.endpoint(self.schema.register_path())?;
        tracing::debug!(%url, payload = ?payload, "sending registration payload");

        let (status, body) = self.send(self.http.post(url).json(payload)).await?;
        interpret_registration(status, &body)
    }

    async fn list_blogs(&self) -> ApiResult<Vec<BlogRecord>> {
        let url = self.endpoint(BLOGS_PATH)?;
        let (status, body) = self.send(self.http.get(url)).await?;
        interpret_blog_list(status, &body)
    }

    async fn get_blog(&self, id: &str) -> ApiResult<BlogLookup> {
        let mut url = self.endpoint(BLOGS_PATH)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Endpoint(self.base_url.to_string()))?
            .push(id);

        let (status, body) = self.send(self.http.get(url)).await?;
        interpret_blog(status, &body)
    }
}
