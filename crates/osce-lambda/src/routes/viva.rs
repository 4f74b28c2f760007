use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use osce_assessment::error::AssessmentError;
use osce_assessment::viva::{self, VivaGrade};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct VivaQuestionsRequest {
    scenario_id: String,
}

#[derive(Serialize)]
pub struct VivaQuestionsResponse {
    questions: Vec<String>,
}

/// Viva questions for a station. Unknown stations answer 404 with an empty
/// list so the front end can render nothing without special-casing.
pub async fn get_viva(
    State(state): State<AppState>,
    payload: Result<Json<VivaQuestionsRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match viva::viva_questions(&state.catalog, &req.scenario_id) {
        Ok(questions) => Json(VivaQuestionsResponse { questions }).into_response(),
        Err(AssessmentError::ScenarioNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(VivaQuestionsResponse {
                questions: Vec::new(),
            }),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct GradeVivaRequest {
    scenario_id: String,
    #[serde(default)]
    responses: Vec<String>,
}

pub async fn grade_viva(
    State(state): State<AppState>,
    payload: Result<Json<GradeVivaRequest>, JsonRejection>,
) -> Result<Json<VivaGrade>, ApiError> {
    let Json(req) = payload?;
    let grade = viva::grade_viva(
        state.provider.as_ref(),
        &state.catalog,
        &req.scenario_id,
        &req.responses,
    )
    .await?;
    Ok(Json(grade))
}
