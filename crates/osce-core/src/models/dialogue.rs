
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single turn in the consultation.
///
/// The caller owns the conversation: the full history is sent with every
/// request and the pipeline only ever reads and windows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DialogueTurn {
    pub role: TurnRole,
    pub content: String,
}

impl DialogueTurn {
    pub fn patient(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Patient,
            content: content.into(),
        }
    }

    pub fn student(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Student,
            content: content.into(),
        }
    }
}

/// Who spoke a turn.
///
/// Serialized in the chat vocabulary the front end uses (`assistant` for the
/// simulated patient, `user` for the student); the domain names are accepted
/// as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TurnRole {
    #[serde(rename = "assistant", alias = "patient")]
    Patient,
    #[serde(rename = "user", alias = "student")]
    Student,
}

impl TurnRole {
    /// Lower-case label used when turns are rendered as plain text.
    pub fn label(&self) -> &'static str {
        match self {
            TurnRole::Patient => "patient",
            TurnRole::Student => "student",
        }
    }
}

/// Render turns as `role: content` lines.
pub fn render_turns(turns: &[DialogueTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role.label(), t.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render turns as an examiner-style transcript with upper-cased roles
/// (`STUDENT: ...`, `PATIENT: ...`).
pub fn render_transcript(turns: &[DialogueTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role.label().to_uppercase(), t.content))
        .collect::<Vec<_>>()
        .join("\n")
}
