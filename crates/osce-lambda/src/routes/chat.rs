use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use osce_assessment::dialogue;
use osce_core::models::dialogue::DialogueTurn;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    scenario_id: String,
    #[serde(default)]
    history: Vec<DialogueTurn>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    role: &'static str,
    content: String,
    degraded: bool,
}

/// Next patient line. A provider outage still answers 200 with the
/// in-character fallback.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    let reply = dialogue::respond(
        state.provider.as_ref(),
        &state.catalog,
        &state.exam,
        &req.scenario_id,
        &req.history,
    )
    .await?;

    Ok(Json(ChatResponse {
        role: "assistant",
        content: reply.content,
        degraded: reply.degraded,
    }))
}
