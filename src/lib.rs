//! Blog registration console: builds registration payloads from form input,
//! talks to the blog REST API and renders its answers.
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
