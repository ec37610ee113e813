/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, BLOG_API_BASE_URL, schema variant など)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - base URL は injected value として client に渡す (global 定数にしない)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::services::payload::SchemaVariant;

pub const DEFAULT_BLOG_API_BASE_URL: &str = "http://127.0.0.1:6969";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Everything the blog API client needs.
#[derive(Debug, Clone)]
pub struct BlogApiConfig {
    pub base_url: Url,
    pub schema: SchemaVariant,
    pub timeout: Duration,
}

impl BlogApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            schema: SchemaVariant::default(),
            timeout: Duration::from_secs(10),
        })
    }
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub blog_api: BlogApiConfig,
}

/// Parse an http(s) base URL and make sure it ends with `/` so that relative
/// endpoint paths join beneath it instead of replacing its last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid("BLOG_API_BASE_URL"))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::Invalid("BLOG_API_BASE_URL"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let base_url = normalize_base_url(
            &lookup("BLOG_API_BASE_URL").unwrap_or_else(|| DEFAULT_BLOG_API_BASE_URL.to_string()),
        )?;

        let schema = match lookup("BLOG_API_SCHEMA") {
            Some(raw) => raw
                .parse::<SchemaVariant>()
                .map_err(|_| ConfigError::Invalid("BLOG_API_SCHEMA"))?,
            None => SchemaVariant::default(),
        };

        let timeout_seconds = match lookup("BLOG_API_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::Invalid("BLOG_API_TIMEOUT_SECONDS"))?,
            None => 10,
        };

        Ok(Self {
            addr,
            app_env,
            blog_api: BlogApiConfig {
                base_url,
                schema,
                timeout: Duration::from_secs(timeout_seconds),
            },
        })
    }
}
