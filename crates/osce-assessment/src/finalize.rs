//! Final score aggregation and attempt persistence.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use tracing::{error, info};
use uuid::Uuid;

use osce_core::catalog::ScenarioCatalog;
use osce_core::config::ExamConfig;
use osce_core::models::attempt::{AttemptRecord, Grade};
use osce_core::models::dialogue::{DialogueTurn, render_transcript};
use osce_core::models::scenario::VivaQuestion;
use osce_storage::attempts::AttemptStore;

use crate::error::AssessmentError;
use crate::viva::{NO_ANSWER, clamp_score};

const DEFAULT_STUDENT_NAME: &str = "Anonymous";

fn default_student_name() -> String {
    DEFAULT_STUDENT_NAME.to_string()
}

/// Sub-scores arrive from the client as any JSON number.
fn percentage<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    f64::deserialize(deserializer).map(clamp_score)
}

/// Everything needed to close out an attempt.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FinalizeRequest {
    #[serde(default = "default_student_name")]
    pub student_name: String,
    pub scenario_id: String,
    #[serde(rename = "h_score", default, deserialize_with = "percentage")]
    pub dialogue_score: u8,
    #[serde(rename = "v_score", default, deserialize_with = "percentage")]
    pub viva_score: u8,
    #[serde(default)]
    pub history: Vec<DialogueTurn>,
    #[serde(default)]
    pub viva_responses: Vec<String>,
    #[serde(rename = "h_feedback", default)]
    pub dialogue_feedback: String,
    #[serde(rename = "v_feedback", default)]
    pub viva_feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FinalOutcome {
    pub score: u8,
    pub grade: Grade,
    pub color: String,
    pub attempt_id: Uuid,
    /// False when the attempt could not be persisted. The score stands.
    pub saved: bool,
}

/// Combine the sub-scores, decide pass/fail, and persist the attempt.
///
/// A storage failure is logged and reported through `saved`; it never hides
/// the result from the student.
pub async fn finalize(
    store: &dyn AttemptStore,
    catalog: &ScenarioCatalog,
    config: &ExamConfig,
    request: FinalizeRequest,
) -> Result<FinalOutcome, AssessmentError> {
    let scenario = catalog.lookup(&request.scenario_id)?;

    let score = config
        .weights
        .combine(request.dialogue_score, request.viva_score);
    let grade = Grade::from_score(score, config.pass_threshold);

    let record = AttemptRecord {
        id: Uuid::new_v4(),
        student_name: request.student_name,
        scenario_id: request.scenario_id,
        score,
        grade,
        feedback: combine_feedback(&request.dialogue_feedback, &request.viva_feedback),
        transcript: compile_transcript(
            &request.history,
            &scenario.viva_questions,
            &request.viva_responses,
        ),
        created_at: jiff::Timestamp::now(),
    };

    let saved = match store.insert(&record).await {
        Ok(()) => true,
        Err(e) => {
            error!(attempt_id = %record.id, error = %e, "failed to save attempt");
            false
        }
    };

    info!(
        attempt_id = %record.id,
        scenario_id = %record.scenario_id,
        dialogue_score = request.dialogue_score,
        viva_score = request.viva_score,
        score,
        grade = ?grade,
        saved,
        "attempt finalized"
    );

    Ok(FinalOutcome {
        score,
        grade,
        color: grade.color().to_string(),
        attempt_id: record.id,
        saved,
    })
}

/// Dialogue transcript followed by the enumerated viva questions and answers.
pub fn compile_transcript(
    history: &[DialogueTurn],
    questions: &[VivaQuestion],
    responses: &[String],
) -> String {
    let mut transcript = render_transcript(history);
    transcript.push_str("\n\n--- VIVA ---");

    for n in 0..questions.len().max(responses.len()) {
        let question = questions.get(n).map_or("(unknown question)", |q| q.question.as_str());
        let answer = responses
            .get(n)
            .map(|a| a.as_str())
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(NO_ANSWER);
        transcript.push_str(&format!("\nQ{}: {question}\nA{}: {answer}", n + 1, n + 1));
    }

    transcript
}

fn combine_feedback(dialogue: &str, viva: &str) -> String {
    format!("History: {dialogue}\n\nViva: {viva}")
}
