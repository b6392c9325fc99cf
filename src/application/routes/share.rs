use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::Value;

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct ShareQuery {
    #[serde(default, rename = "shareId")]
    share_id: Option<String>,
}

/// Return a previously generated report envelope by its share id.
#[tracing::instrument(skip(state))]
pub(crate) async fn get_share(
    State(state): State<AppState>,
    Query(query): Query<ShareQuery>,
) -> Result<Json<Value>, ApiError> {
    let share_id = query
        .share_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::validation("shareId is required"))?;

    let report = state
        .share_store
        .get(&share_id)
        .ok_or_else(|| AppError::not_found("share not found"))?;

    Ok(Json(Value::clone(&report)))
}
