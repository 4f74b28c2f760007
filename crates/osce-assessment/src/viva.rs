//! Oral exam (viva) grading.
//!
//! Unlike the rubric there is no checklist to reconcile against, so the
//! model's holistic 0–100 score is used as-is, only rounded and clamped.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tracing::{debug, info, warn};

use osce_bedrock::provider::{CompletionProvider, CompletionRequest, ModelTier, ProviderMessage};
use osce_core::catalog::ScenarioCatalog;

use crate::error::AssessmentError;
use crate::{GradingFailure, GradingFailureKind};

/// Feedback returned when viva grading fails.
pub const VIVA_FAILED_FEEDBACK: &str = "Failed";

/// Rendered in place of an answer the student did not give.
pub const NO_ANSWER: &str = "(no answer given)";

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VivaGrade {
    /// 0–100.
    pub score: u8,
    pub feedback: String,
    pub grading_failed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub failure: Option<GradingFailure>,
}

impl VivaGrade {
    fn failed(kind: GradingFailureKind, message: String) -> Self {
        Self {
            score: 0,
            feedback: VIVA_FAILED_FEEDBACK.to_string(),
            grading_failed: true,
            failure: Some(GradingFailure { kind, message }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VivaVerdict {
    score: f64,
    #[serde(default)]
    feedback: String,
}

/// The scenario's viva question texts. Model answers are not exposed.
pub fn viva_questions(
    catalog: &ScenarioCatalog,
    scenario_id: &str,
) -> Result<Vec<String>, AssessmentError> {
    let scenario = catalog.lookup(scenario_id)?;
    Ok(scenario
        .viva_questions
        .iter()
        .map(|q| q.question.clone())
        .collect())
}

/// Grade free-text viva answers against the scenario's model answers.
///
/// Answers are paired with questions by position. Missing answers are marked
/// as not given; answers beyond the last question are ignored.
pub async fn grade_viva(
    provider: &dyn CompletionProvider,
    catalog: &ScenarioCatalog,
    scenario_id: &str,
    responses: &[String],
) -> Result<VivaGrade, AssessmentError> {
    let scenario = catalog.lookup(scenario_id)?;

    if responses.len() > scenario.viva_questions.len() {
        debug!(
            scenario_id,
            questions = scenario.viva_questions.len(),
            responses = responses.len(),
            "ignoring surplus viva responses"
        );
    }

    let mut pairs = String::new();
    for (n, q) in scenario.viva_questions.iter().enumerate() {
        let answer = responses
            .get(n)
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .unwrap_or(NO_ANSWER);
        pairs.push_str(&format!(
            "Question {}: {}\nModel answer: {}\nStudent answer: {}\n\n",
            n + 1,
            q.question,
            q.model_answer,
            answer
        ));
    }

    let prompt = format!(
        "Grade these viva answers against the model answers.\n\n{pairs}\
         Score the student from 0 to 100 for overall correctness and give feedback on their knowledge gaps. \
         Return JSON: {{\"score\": <integer 0-100>, \"feedback\": \"<knowledge gaps>\"}}"
    );
    let request =
        CompletionRequest::new(ModelTier::Main, vec![ProviderMessage::user(prompt)]).strict_json();

    let reply = match provider.complete(request).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(scenario_id, error = %e, "viva grading failed");
            return Ok(VivaGrade::failed(GradingFailureKind::Provider, e.to_string()));
        }
    };

    let verdict: VivaVerdict = match serde_json::from_str(&reply) {
        Ok(v) => v,
        Err(e) => {
            warn!(scenario_id, error = %e, "viva grading reply did not parse");
            return Ok(VivaGrade::failed(GradingFailureKind::Parse, e.to_string()));
        }
    };

    let score = clamp_score(verdict.score);
    info!(scenario_id, score, "viva graded");

    Ok(VivaGrade {
        score,
        feedback: verdict.feedback,
        grading_failed: false,
        failure: None,
    })
}

/// Round to the nearest whole percentage and clamp into 0..=100.
pub(crate) fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
