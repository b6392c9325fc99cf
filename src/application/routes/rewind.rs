use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::rewind::{Report, build_report};
use crate::infrastructure::anilist::{fetch_anime, fetch_favorites, fetch_manga};
use crate::infrastructure::cache::{ReportCache, ShareStore};
use crate::infrastructure::share::generate_share_id;

#[derive(Debug, Deserialize)]
pub(crate) struct RewindQuery {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    year: Option<i32>,
}

/// The report as served: the engine's output wrapped with the request
/// identity and a share handle.
#[derive(Debug, Serialize)]
pub(crate) struct ReportEnvelope {
    #[serde(rename = "shareId")]
    pub share_id: String,
    pub username: String,
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
    #[serde(flatten)]
    pub report: Report,
}

#[tracing::instrument(skip(state, query))]
pub(crate) async fn get_rewind(
    State(state): State<AppState>,
    Query(query): Query<RewindQuery>,
) -> Result<Json<Value>, ApiError> {
    let username = query
        .username
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::validation("username is required"))?;
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    let cache_key = ReportCache::cache_key(&username, year);
    if let Some(cached) = state.report_cache.get(&cache_key) {
        info!(%username, year, "rewind served from cache");
        return Ok(Json(Value::clone(&cached)));
    }

    // All three collections are fully materialized before the engine runs;
    // a failure in any fetch abandons the build with no partial results.
    let (anime, manga, favorites) = tokio::try_join!(
        fetch_anime(&state.http_client, &state.anilist_url, &username),
        fetch_manga(&state.http_client, &state.anilist_url, &username),
        fetch_favorites(&state.http_client, &state.anilist_url, &username),
    )?;

    let report = build_report(&anime, &manga, favorites, year);

    let share_id = issue_share_id(&state.share_store, &username, year);
    let envelope = ReportEnvelope {
        share_id: share_id.clone(),
        username: username.clone(),
        generated_at: Utc::now().to_rfc3339(),
        report,
    };
    let value = Arc::new(
        serde_json::to_value(&envelope)
            .map_err(|e| AppError::unexpected(format!("failed to serialize report: {e}")))?,
    );

    state.report_cache.insert(cache_key, Arc::clone(&value));
    state.share_store.insert(share_id, Arc::clone(&value));

    info!(%username, year, "rewind report built");
    Ok(Json(Value::clone(&value)))
}

/// Generate a share id that is not already taken in the store.
fn issue_share_id(store: &ShareStore, username: &str, year: i32) -> String {
    loop {
        let share_id = generate_share_id(username, year);
        if !store.contains(&share_id) {
            return share_id;
        }
    }
}
