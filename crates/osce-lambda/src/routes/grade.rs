use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use osce_assessment::rubric::{self, DialogueGrade};
use osce_core::models::dialogue::DialogueTurn;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GradeRequest {
    scenario_id: String,
    #[serde(default)]
    history: Vec<DialogueTurn>,
}

/// Grade the consultation. A failed grading call still answers 200 with
/// `grading_failed` set; only unknown stations and broken rubrics are errors.
pub async fn grade(
    State(state): State<AppState>,
    payload: Result<Json<GradeRequest>, JsonRejection>,
) -> Result<Json<DialogueGrade>, ApiError> {
    let Json(req) = payload?;
    let grade = rubric::grade_dialogue(
        state.provider.as_ref(),
        &state.catalog,
        &req.scenario_id,
        &req.history,
    )
    .await?;
    Ok(Json(grade))
}
