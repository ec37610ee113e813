#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use blog_console::config::BlogApiConfig;
use blog_console::services::blog_api::HttpBlogClient;
use blog_console::services::payload::SchemaVariant;
use serde_json::Value;
use tokio::net::TcpListener;

/// Request bodies received by the mock blog API, in arrival order.
#[derive(Clone, Default)]
pub struct Received(pub Arc<Mutex<Vec<Value>>>);

impl Received {
    pub fn push(&self, body: Value) {
        self.0.lock().unwrap().push(body);
    }

    pub fn all(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }
}

pub async fn spawn(app: Router) -> anyhow::Result<(String, tokio::task::JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });
    Ok((format!("http://{}", addr), server_handle))
}

/// A base URL nothing listens on.
pub async fn dead_base_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

pub fn client_for(base: &str, schema: SchemaVariant) -> HttpBlogClient {
    let mut config = BlogApiConfig::new(base).expect("valid base url");
    config.schema = schema;
    config.timeout = Duration::from_secs(2);
    HttpBlogClient::new(&config).expect("client")
}
