mod handlers;
mod state;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{Config, ConfigError};
use crate::location::ServiceResolver;
use state::AppState;

pub use handlers::{LocateResponse, TOKEN_HEADER};

const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

pub fn build_router(config: Config) -> Router {
    let resolver = ServiceResolver::from_config(&config);
    let state = Arc::new(AppState { config, resolver });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(TOKEN_HEADER)])
        .max_age(CORS_MAX_AGE);

    // Live position data; never worth caching.
    let no_store = SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );

    Router::new()
        .route("/locate", get(handlers::locate))
        .layer(cors)
        .layer(no_store)
        .with_state(state)
}

pub async fn start(config: Config, host: &str, port: u16) {
    if config.client_tokens.is_empty() {
        eprintln!("Error: {}", ConfigError::NoClientTokens);
        std::process::exit(1);
    }

    let app = build_router(config);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  ISS Locator server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        });
}
