use axum::Json;
use axum::extract::State;

use osce_core::models::scenario::ScenarioSummary;

use crate::state::AppState;

pub async fn list_scenarios(State(state): State<AppState>) -> Json<Vec<ScenarioSummary>> {
    Json(state.catalog.summaries())
}
