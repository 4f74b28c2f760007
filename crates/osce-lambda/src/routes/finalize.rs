use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use osce_assessment::finalize::{self, FinalOutcome, FinalizeRequest};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn final_assessment(
    State(state): State<AppState>,
    payload: Result<Json<FinalizeRequest>, JsonRejection>,
) -> Result<Json<FinalOutcome>, ApiError> {
    let Json(req) = payload?;
    let outcome =
        finalize::finalize(state.attempts.as_ref(), &state.catalog, &state.exam, req).await?;
    Ok(Json(outcome))
}
