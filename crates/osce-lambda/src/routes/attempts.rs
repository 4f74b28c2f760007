use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use osce_core::models::attempt::AttemptRecord;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 100;

#[derive(Deserialize)]
pub struct ListAttemptsQuery {
    limit: Option<usize>,
}

/// Most recent attempts, newest first.
pub async fn list_attempts(
    State(state): State<AppState>,
    Query(query): Query<ListAttemptsQuery>,
) -> Result<Json<Vec<AttemptRecord>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 || limit > MAX_LIMIT {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {MAX_LIMIT}"
        )));
    }

    let records = state.attempts.list_recent(limit).await?;
    Ok(Json(records))
}
