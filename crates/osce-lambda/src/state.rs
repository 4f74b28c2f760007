use std::sync::Arc;

use osce_bedrock::provider::CompletionProvider;
use osce_core::catalog::ScenarioCatalog;
use osce_core::config::ExamConfig;
use osce_storage::attempts::AttemptStore;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Everything here is read-only or internally synchronized; conversation
/// state always arrives with the request.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
    pub attempts: Arc<dyn AttemptStore>,
    pub catalog: Arc<ScenarioCatalog>,
    pub exam: Arc<ExamConfig>,
}
