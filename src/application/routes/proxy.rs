use axum::extract::{Query, State};
use axum::http::HeaderValue;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use url::Url;

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct ProxyQuery {
    #[serde(default)]
    url: Option<String>,
}

/// Fetch cover art on behalf of the browser, sidestepping the image CDN's
/// missing CORS headers. Pass-through only: the body and content type come
/// back unmodified.
#[tracing::instrument(skip(state, query))]
pub(crate) async fn proxy_image(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Result<Response, ApiError> {
    let raw = query
        .url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::validation("url is required"))?;

    let url = Url::parse(&raw).map_err(|_| AppError::validation("invalid url"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::validation("url must be http or https").into());
    }

    let upstream = state
        .http_client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::upstream(format!("proxy request failed: {e}")))?;

    if !upstream.status().is_success() {
        return Err(AppError::upstream(format!(
            "proxy origin returned status {}",
            upstream.status()
        ))
        .into());
    }

    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));

    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| AppError::upstream(format!("failed to read proxied body: {e}")))?;

    let mut response = bytes.into_response();
    response.headers_mut().insert(CONTENT_TYPE, content_type);
    Ok(response)
}
