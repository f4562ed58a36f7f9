mod error;
mod handlers;
mod models;
mod reader;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use sms_reader_lib::ReaderConfig;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reader::SmsReader;

#[derive(Clone)]
pub struct AppState {
    pub reader: Arc<SmsReader>,
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/status", get(handlers::get_status))
        .route("/v1/permission", get(handlers::get_permission))
        .route("/v1/permission/request", post(handlers::request_permission))
        .route("/v1/permission/resolve", post(handlers::resolve_permission))
        .route("/v1/sms", get(handlers::list_sms))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn load_config() -> anyhow::Result<ReaderConfig> {
    match std::env::var("SMS_READER_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading config from {}", path);
            Ok(ReaderConfig::load(&path)?)
        }
        Err(_) => {
            let db_path = std::env::var("SMS_DB_PATH").unwrap_or_else(|_| "mmssms.db".to_string());
            Ok(ReaderConfig::new(db_path))
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config from env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sms_reader_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    let pre_granted = env_flag("SMS_ACCESS_GRANTED");
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    tracing::info!("Message store: {:?}", config.store.path);
    tracing::info!("Keywords: {:?}", config.filter.keywords);
    tracing::info!("SMS access pre-granted: {}", pre_granted);

    let reader = Arc::new(SmsReader::open(&config, pre_granted)?);
    let state = AppState { reader };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind to port {}", port))?;

    tracing::info!("Gateway listening on port {}", port);

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
