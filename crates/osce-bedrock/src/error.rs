use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("request has no messages")]
    EmptyConversation,
}
