pub mod proxy;
pub mod rewind;
pub mod share;

use axum::Json;
use axum::http::{HeaderValue, Request};
use axum::routing::get;
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

use crate::application::state::AppState;

/// 1 MB request body limit; every endpoint is a GET with query parameters.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn app_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/health", get(health))
        .route("/api/rewind", get(rewind::get_rewind))
        .route("/api/share", get(share::get_share))
        .route("/api/proxy", get(proxy::proxy_image))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(RewindMakeSpan)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                // The report UI is served from elsewhere; the API itself is open.
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new().gzip(true)),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

#[derive(Clone)]
struct RewindMakeSpan;

impl<B> MakeSpan<B> for RewindMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}
