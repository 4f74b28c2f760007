//! History condensation.
//!
//! Turns that fall out of the live window are reduced to a short factual
//! summary on the fast model tier. Summarization is best-effort: a failure
//! degrades grounding but never stops the consultation.

use tracing::{debug, warn};

use osce_bedrock::provider::{CompletionProvider, CompletionRequest, ModelTier, ProviderMessage};
use osce_core::models::dialogue::{DialogueTurn, render_turns};

/// Returned in place of a summary when the provider fails.
pub const SUMMARY_FALLBACK: &str = "History follows.";

const SUMMARY_INSTRUCTION: &str = "\
Summarize the clinical facts the student has elicited from the patient in the \
consultation below. List only facts that were actually stated: symptoms, \
timings, history, medications, allergies, family and social history. \
Do not interpret, diagnose, or add anything that was not said. Keep it brief.";

/// Summarize `old_turns` into a compact list of elicited facts.
pub async fn condense_history(provider: &dyn CompletionProvider, old_turns: &[DialogueTurn]) -> String {
    let prompt = format!(
        "{SUMMARY_INSTRUCTION}\n\nConsultation:\n{}",
        render_turns(old_turns)
    );
    let request = CompletionRequest::new(ModelTier::Fast, vec![ProviderMessage::user(prompt)]);

    match provider.complete(request).await {
        Ok(summary) => {
            debug!(turns = old_turns.len(), summary_len = summary.len(), "condensed history");
            summary
        }
        Err(e) => {
            warn!(turns = old_turns.len(), error = %e, "history summarization failed, using fallback");
            SUMMARY_FALLBACK.to_string()
        }
    }
}
