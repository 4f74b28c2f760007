//! The simulated patient.
//!
//! Each call rebuilds the outgoing prompt from scratch: persona and
//! behaviour directive as the system message, then either the whole history
//! or a condensed summary plus the most recent `window_size` turns verbatim.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tracing::{info, warn};

use osce_bedrock::provider::{CompletionProvider, CompletionRequest, ModelTier, ProviderMessage};
use osce_core::catalog::ScenarioCatalog;
use osce_core::config::ExamConfig;
use osce_core::models::dialogue::{DialogueTurn, TurnRole};
use osce_core::models::scenario::Scenario;

use crate::condenser::condense_history;
use crate::error::AssessmentError;

pub const PATIENT_BEHAVIOR_DIRECTIVE: &str = "\
BEHAVIOR: Short, natural sentences. No asterisks or stage directions. \
Do not info-dump; only answer what you are asked. Stay in character.";

/// In-character reply used when the model cannot be reached.
pub const UNWELL_FALLBACK: &str = "I'm feeling a bit unwell...";

/// The patient's next line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientReply {
    pub content: String,
    /// True when `content` is the fallback line rather than a model reply.
    pub degraded: bool,
}

/// Generate the patient's reply to the conversation so far.
///
/// Only an unknown scenario is an error. A provider failure yields
/// [`UNWELL_FALLBACK`] so the consultation can carry on.
pub async fn respond(
    provider: &dyn CompletionProvider,
    catalog: &ScenarioCatalog,
    config: &ExamConfig,
    scenario_id: &str,
    history: &[DialogueTurn],
) -> Result<PatientReply, AssessmentError> {
    let scenario = catalog.lookup(scenario_id)?;
    let messages = build_messages(provider, scenario, config.window_size, history).await;

    let request = CompletionRequest::new(ModelTier::Main, messages);
    match provider.complete(request).await {
        Ok(content) => {
            info!(scenario_id, turns = history.len(), "patient replied");
            Ok(PatientReply {
                content,
                degraded: false,
            })
        }
        Err(e) => {
            warn!(scenario_id, error = %e, "patient reply failed, using fallback");
            Ok(PatientReply {
                content: UNWELL_FALLBACK.to_string(),
                degraded: true,
            })
        }
    }
}

/// Assemble the outgoing message list for a patient turn.
///
/// The condenser is consulted only when the history is longer than the
/// window, and only with the turns older than the window.
pub async fn build_messages(
    provider: &dyn CompletionProvider,
    scenario: &Scenario,
    window_size: usize,
    history: &[DialogueTurn],
) -> Vec<ProviderMessage> {
    let directive = format!("{}\n\n{PATIENT_BEHAVIOR_DIRECTIVE}", scenario.persona);

    let (system, recent) = if history.len() > window_size {
        let split = history.len() - window_size;
        let summary = condense_history(provider, &history[..split]).await;
        (
            format!("{directive}\n\nSummary of the consultation so far: {summary}"),
            &history[split..],
        )
    } else {
        (directive, history)
    };

    let mut messages = Vec::with_capacity(recent.len() + 1);
    messages.push(ProviderMessage::system(system));
    messages.extend(recent.iter().map(to_provider_message));
    messages
}

fn to_provider_message(turn: &DialogueTurn) -> ProviderMessage {
    match turn.role {
        TurnRole::Patient => ProviderMessage::assistant(turn.content.clone()),
        TurnRole::Student => ProviderMessage::user(turn.content.clone()),
    }
}
