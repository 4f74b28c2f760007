use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A completed exam attempt.
///
/// Written exactly once, when the final assessment is computed, and never
/// updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttemptRecord {
    pub id: Uuid,
    pub student_name: String,
    pub scenario_id: String,
    /// Final weighted score, 0–100.
    pub score: u8,
    pub grade: Grade,
    pub feedback: String,
    /// Dialogue turns followed by the enumerated viva questions and answers.
    pub transcript: String,
    pub created_at: jiff::Timestamp,
}

/// Pass/fail outcome of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Grade {
    Pass,
    Fail,
}

impl Grade {
    pub fn from_score(score: u8, pass_threshold: u8) -> Self {
        if score >= pass_threshold {
            Grade::Pass
        } else {
            Grade::Fail
        }
    }

    /// Display colour shown alongside the result.
    pub fn color(&self) -> &'static str {
        match self {
            Grade::Pass => "#7c4dff",
            Grade::Fail => "#ff5252",
        }
    }
}
