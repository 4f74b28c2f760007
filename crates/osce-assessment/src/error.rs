use thiserror::Error;

use osce_core::error::CoreError;

/// Hard failures of the assessment operations.
///
/// Provider and parse failures are not here: they are recovered into the
/// documented fallback result of each operation.
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<CoreError> for AssessmentError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::ScenarioNotFound(id) => AssessmentError::ScenarioNotFound(id),
            other => AssessmentError::Configuration(other.to_string()),
        }
    }
}
