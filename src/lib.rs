pub mod config;
pub mod error;
pub mod state;
pub mod db;
pub mod models;
pub mod routes;
pub mod spa;
pub mod submission;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: SqlitePool, config: Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let static_dir = config.static_dir.filter(|dir| {
        let exists = dir.is_dir();
        if !exists {
            tracing::warn!("Static asset directory {} not found", dir.display());
        }
        exists
    });

    let state: SharedState = Arc::new(AppState { pool });

    let mut app = Router::new()
        .merge(routes::api_routes())
        .route("/health", get(health));

    match static_dir {
        Some(dir) => {
            tracing::info!("Serving static assets from {}", dir.display());
            app = app.fallback_service(spa::service(&dir));
        }
        None => tracing::info!("No static asset directory, serving the API only"),
    }

    // CorsLayer answers every OPTIONS request itself with a bare 200.
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(DefaultBodyLimit::max(config.max_body_size));

    app.layer(layers).with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
