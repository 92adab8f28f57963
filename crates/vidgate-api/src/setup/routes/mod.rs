//! Route configuration and setup.
//!
//! Video routes are registered under both the classic paths (`/info`, `/mp3`, `/mp4`) and
//! the serverless aliases under `/api`. Health checks live in [health](health).

mod health;

use crate::constants::{API_DOCS_PATH, OPENAPI_JSON_PATH};
use crate::error::HttpAppError;
use crate::handlers::{docs, download, info};
use crate::middleware::{error_details_middleware, request_id_middleware, RequestId};
use crate::state::AppState;
use axum::{
    body::Body,
    http::{HeaderValue, Method, Request, Uri},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use vidgate_core::{AppError, Config};

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    let http_concurrency_limit = config.http_concurrency_limit();
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = service_routes()
        .merge(video_routes())
        .merge(health_routes())
        .route(
            OPENAPI_JSON_PATH,
            get(|| async { Json(crate::api_doc::ApiDoc::openapi()) }),
        )
        .merge(RapiDoc::new(OPENAPI_JSON_PATH).path(API_DOCS_PATH))
        .fallback(not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            error_details_middleware,
        ))
        // Router::layer wraps every route separately; the global layer shares one semaphore.
        .layer(GlobalConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(cors)
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|_| anyhow::anyhow!("Invalid CORS origin '{}'", o))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

fn service_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(docs::api_index))
        .route("/api", get(docs::service_index))
}

fn video_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/info", get(info::get_info))
        .route("/api/info", get(info::get_compact_info))
        .route("/api/youtube/info", get(info::get_compact_info))
        .route("/mp3", get(download::download_mp3))
        .route("/api/youtube/mp3", get(download::download_mp3))
        .route("/mp4", get(download::download_mp4))
        .route("/api/mp4", get(download::download_mp4))
        .route("/api/youtube/mp4", get(download::download_mp4))
}

fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
}

async fn not_found(uri: Uri) -> HttpAppError {
    HttpAppError(AppError::NotFound(format!(
        "No route matches '{}'",
        uri.path()
    )))
}
