//! osce-assessment
//!
//! The conversation-and-assessment pipeline: history condensation, the
//! simulated patient, rubric and viva grading, and the final score.
//!
//! Every operation is stateless. The scenario catalog, exam tunables,
//! completion provider, and attempt store are passed in by the caller.

pub mod condenser;
pub mod dialogue;
pub mod error;
pub mod finalize;
pub mod rubric;
pub mod viva;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Why a grading call produced no usable verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GradingFailureKind {
    /// The completion provider call failed.
    Provider,
    /// The model's reply was not valid JSON of the expected shape.
    Parse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GradingFailure {
    pub kind: GradingFailureKind,
    pub message: String,
}
