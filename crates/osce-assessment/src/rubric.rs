//! Rubric grading.
//!
//! The model only ever contributes `{item, completed}` verdicts and free-text
//! feedback. Reconciliation walks the canonical rubric, so the returned items
//! always match the scenario's items, order, categories, and weights no
//! matter what the model returned: omitted items count as not completed and
//! invented ones are dropped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tracing::{info, warn};

use osce_bedrock::provider::{CompletionProvider, CompletionRequest, ModelTier, ProviderMessage};
use osce_core::catalog::ScenarioCatalog;
use osce_core::models::dialogue::{DialogueTurn, render_transcript};
use osce_core::models::scenario::RubricItem;

use crate::error::AssessmentError;
use crate::{GradingFailure, GradingFailureKind};

const EXAMINER_DIRECTIVE: &str = "\
You are an OSCE examiner marking a history-taking station. Judge only what \
the student actually did in the transcript. An item is completed only if the \
student clearly performed it.";

/// Result of grading a consultation against its rubric.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DialogueGrade {
    /// 0–100.
    pub score: u8,
    /// The canonical rubric with `completed` filled in. Empty on failure.
    pub items: Vec<RubricItem>,
    pub feedback: String,
    pub grading_failed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub failure: Option<GradingFailure>,
}

impl DialogueGrade {
    fn failed(kind: GradingFailureKind, message: String) -> Self {
        Self {
            score: 0,
            items: Vec::new(),
            feedback: String::new(),
            grading_failed: true,
            failure: Some(GradingFailure { kind, message }),
        }
    }
}

/// Strict-JSON shape requested from the model.
#[derive(Debug, Clone, Deserialize)]
pub struct VerdictResponse {
    pub items: Vec<ItemVerdict>,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemVerdict {
    pub item: String,
    #[serde(default)]
    pub completed: bool,
}

/// Grade a consultation transcript against the scenario's rubric.
///
/// Unknown scenarios and zero-weight rubrics are errors; provider and parse
/// failures come back as a zero-score grade with `grading_failed` set.
pub async fn grade_dialogue(
    provider: &dyn CompletionProvider,
    catalog: &ScenarioCatalog,
    scenario_id: &str,
    history: &[DialogueTurn],
) -> Result<DialogueGrade, AssessmentError> {
    let scenario = catalog.lookup(scenario_id)?;
    if scenario.total_points() == 0 {
        return Err(zero_points(scenario_id));
    }

    let item_names = serde_json::to_string(&scenario.item_names())
        .map_err(|e| AssessmentError::Configuration(e.to_string()))?;
    let prompt = format!(
        "Transcript:\n{}\n\n\
         Grade this transcript against these checklist items, using the names exactly as written: {item_names}\n\n\
         Return JSON: {{\"items\": [{{\"item\": \"<checklist item name>\", \"completed\": true/false}}], \
         \"feedback\": \"<concise feedback for the student>\"}}",
        render_transcript(history),
    );

    let request = CompletionRequest::new(
        ModelTier::Main,
        vec![
            ProviderMessage::system(EXAMINER_DIRECTIVE),
            ProviderMessage::user(prompt),
        ],
    )
    .strict_json();

    let reply = match provider.complete(request).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(scenario_id, error = %e, "dialogue grading failed");
            return Ok(DialogueGrade::failed(GradingFailureKind::Provider, e.to_string()));
        }
    };

    let verdicts: VerdictResponse = match serde_json::from_str(&reply) {
        Ok(v) => v,
        Err(e) => {
            warn!(scenario_id, error = %e, "dialogue grading reply did not parse");
            return Ok(DialogueGrade::failed(GradingFailureKind::Parse, e.to_string()));
        }
    };

    let items = reconcile(&scenario.rubric, &verdicts.items);
    let score = score_items(&items).map_err(|_| zero_points(scenario_id))?;

    info!(
        scenario_id,
        score,
        completed = items.iter().filter(|i| i.completed).count(),
        total_items = items.len(),
        "dialogue graded"
    );

    Ok(DialogueGrade {
        score,
        items,
        feedback: verdicts.feedback,
        grading_failed: false,
        failure: None,
    })
}

/// Map model verdicts onto the canonical rubric.
///
/// Matching is exact on item name. If the model repeats an item, its last
/// verdict wins.
pub fn reconcile(rubric: &[RubricItem], verdicts: &[ItemVerdict]) -> Vec<RubricItem> {
    let lookup: HashMap<&str, bool> = verdicts
        .iter()
        .map(|v| (v.item.as_str(), v.completed))
        .collect();

    rubric
        .iter()
        .map(|canonical| RubricItem {
            completed: lookup.get(canonical.item.as_str()).copied().unwrap_or(false),
            ..canonical.clone()
        })
        .collect()
}

/// `round(100 * earned / total)` over the items' canonical weights.
pub fn score_items(items: &[RubricItem]) -> Result<u8, AssessmentError> {
    let total: u64 = items.iter().map(|i| u64::from(i.points)).sum();
    if total == 0 {
        return Err(AssessmentError::Configuration(
            "rubric has zero total points".to_string(),
        ));
    }
    let earned: u64 = items.iter().map(|i| u64::from(i.awarded())).sum();

    // Half-up rounding in integer arithmetic; earned <= total keeps it in 0..=100.
    Ok(((200 * earned + total) / (2 * total)) as u8)
}

fn zero_points(scenario_id: &str) -> AssessmentError {
    AssessmentError::Configuration(format!("rubric for {scenario_id} has zero total points"))
}
