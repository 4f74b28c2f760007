//! The completion provider port.
//!
//! Everything in the assessment pipeline talks to a language model through
//! [`CompletionProvider`]. The Bedrock implementation lives in
//! [`crate::converse`]; tests substitute in-memory fakes.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use osce_core::BoxFuture;

use crate::error::ProviderError;

/// A stateless text-generation service.
pub trait CompletionProvider: Send + Sync {
    /// Submit role-tagged messages and return the model's reply text.
    ///
    /// With `strict_json` set, the returned text is a single JSON object.
    fn complete(&self, request: CompletionRequest) -> BoxFuture<'_, Result<String, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ProviderMessage>,
    pub tier: ModelTier,
    pub strict_json: bool,
}

impl CompletionRequest {
    pub fn new(tier: ModelTier, messages: Vec<ProviderMessage>) -> Self {
        Self {
            messages,
            tier,
            strict_json: false,
        }
    }

    pub fn strict_json(mut self) -> Self {
        self.strict_json = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ProviderMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Named model tier. Call sites pick a tier; the deployment decides which
/// model each tier resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Small, low-latency model for extraction work such as summarization.
    Fast,
    /// Full model for persona simulation and grading.
    Main,
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelTier::Fast => f.write_str("fast"),
            ModelTier::Main => f.write_str("main"),
        }
    }
}

/// Model ids each tier resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelTiers {
    pub fast: String,
    pub main: String,
}

impl ModelTiers {
    pub const DEFAULT_FAST: &'static str = "us.anthropic.claude-haiku-4-5-20251001-v1:0";
    pub const DEFAULT_MAIN: &'static str = "us.anthropic.claude-sonnet-4-5-20250929-v1:0";

    pub fn resolve(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.fast,
            ModelTier::Main => &self.main,
        }
    }
}

impl Default for ModelTiers {
    fn default() -> Self {
        Self {
            fast: Self::DEFAULT_FAST.to_string(),
            main: Self::DEFAULT_MAIN.to_string(),
        }
    }
}
