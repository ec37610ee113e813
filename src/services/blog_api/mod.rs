pub mod client;
pub mod http;

pub use client::{ApiError, ApiResult, BlogApi, BlogLookup, RegistrationReceipt};
pub use http::HttpBlogClient;
