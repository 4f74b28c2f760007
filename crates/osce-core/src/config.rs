//! Exam tunables.
//!
//! These are resolved once at startup and shared read-only with every
//! request. The score weighting deliberately has no default: deployments have
//! used both 40/60 and 50/50, so it must be chosen explicitly.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const DEFAULT_WINDOW_SIZE: usize = 10;
pub const DEFAULT_PASS_THRESHOLD: u8 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamConfig {
    /// Number of trailing dialogue turns sent verbatim to the patient model.
    pub window_size: usize,
    /// Minimum final score for a PASS.
    pub pass_threshold: u8,
    pub weights: ScoreWeights,
}

impl ExamConfig {
    pub fn new(
        window_size: usize,
        pass_threshold: u8,
        weights: ScoreWeights,
    ) -> Result<Self, CoreError> {
        if window_size == 0 {
            return Err(CoreError::Configuration(
                "window size must be at least 1 turn".to_string(),
            ));
        }
        if pass_threshold > 100 {
            return Err(CoreError::Configuration(format!(
                "pass threshold {pass_threshold} is above 100"
            )));
        }
        Ok(Self {
            window_size,
            pass_threshold,
            weights,
        })
    }

    /// Defaults for everything except the weighting.
    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            weights,
        }
    }
}

/// Percentage weights of the dialogue and viva sub-scores. Always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWeights")]
pub struct ScoreWeights {
    dialogue: u8,
    viva: u8,
}

#[derive(Deserialize)]
struct RawWeights {
    dialogue: u8,
    viva: u8,
}

impl TryFrom<RawWeights> for ScoreWeights {
    type Error = CoreError;

    fn try_from(raw: RawWeights) -> Result<Self, Self::Error> {
        ScoreWeights::new(raw.dialogue, raw.viva)
    }
}

impl ScoreWeights {
    pub fn new(dialogue: u8, viva: u8) -> Result<Self, CoreError> {
        if u16::from(dialogue) + u16::from(viva) != 100 {
            return Err(CoreError::Configuration(format!(
                "score weights must sum to 100, got {dialogue}/{viva}"
            )));
        }
        Ok(Self { dialogue, viva })
    }

    pub fn dialogue(&self) -> u8 {
        self.dialogue
    }

    pub fn viva(&self) -> u8 {
        self.viva
    }

    /// Weighted combination of two 0–100 sub-scores, truncated to an integer.
    pub fn combine(&self, dialogue_score: u8, viva_score: u8) -> u8 {
        let weighted = u32::from(dialogue_score.min(100)) * u32::from(self.dialogue)
            + u32::from(viva_score.min(100)) * u32::from(self.viva);
        // Both inputs are clamped and the weights sum to 100, so this fits.
        (weighted / 100) as u8
    }
}

/// Parses `"40/60"` (dialogue/viva).
impl FromStr for ScoreWeights {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dialogue, viva) = s.trim().split_once('/').ok_or_else(|| {
            CoreError::Configuration(format!(
                "score weights must look like \"40/60\", got \"{s}\""
            ))
        })?;
        let parse = |part: &str| {
            part.trim().parse::<u8>().map_err(|e| {
                CoreError::Configuration(format!("invalid score weight \"{part}\": {e}"))
            })
        };
        ScoreWeights::new(parse(dialogue)?, parse(viva)?)
    }
}
