/*
 * Responsibility
 * - Config読み込み → 依存生成 (blog API client, views) → Router 組み立て
 * - Middleware の適用 (request id / trace / security headers など)
 * - axum::serve() で起動、Ctrl-C で graceful shutdown
 */
use std::{panic, process, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, v1::handlers::console::console_page};
use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::services::blog_api::HttpBlogClient;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,blog_console=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,blog_console=debug,tower_http=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash loudly. production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<(), AppError> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting blog console in {:?} mode on {} (blog api: {}, schema: {})",
        config.app_env,
        config.addr,
        config.blog_api.base_url,
        config.blog_api.schema
    );

    let state = build_state(&config)?;
    let app = build_router(state, config.blog_api.timeout);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let client = HttpBlogClient::new(&config.blog_api)?;
    Ok(AppState::new(Arc::new(client), config.blog_api.schema)?)
}

pub fn build_router(state: AppState, upstream_timeout: Duration) -> Router {
    let router = Router::new()
        .route("/", get(console_page))
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    let router = middleware::http::apply(router, upstream_timeout);
    middleware::security_headers::apply(router)
}
