//! Bedrock Converse implementation of [`CompletionProvider`].
//!
//! Converse is stricter than a generic chat API: system text travels in a
//! separate `system` field, conversational messages must alternate between
//! user and assistant, and the first one must come from the user. A windowed
//! consultation can start on a patient turn and may repeat a role, so
//! [`shape_conversation`] normalizes every request before it is sent.

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ProviderError;
use crate::json::{STRICT_JSON_INSTRUCTION, extract_json_object};
use crate::provider::{
    BoxFuture, CompletionProvider, CompletionRequest, MessageRole, ModelTiers, ProviderMessage,
};
use crate::tokens;

/// Inserted when the conversational messages would otherwise open on an
/// assistant turn, or when there are none yet.
pub const LEADING_USER_PLACEHOLDER: &str = "(The consultation continues.)";

/// A request split into the pieces Converse expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedConversation {
    pub system: Vec<String>,
    /// Alternating user/assistant messages, starting with the user.
    pub messages: Vec<ProviderMessage>,
}

/// Split system text from the conversation, merge consecutive same-role
/// messages, and make sure the conversation opens with a user message.
///
/// A system-only request (the patient speaking first) shapes to a single
/// placeholder user message. A request with no messages at all is rejected.
pub fn shape_conversation(
    messages: &[ProviderMessage],
    strict_json: bool,
) -> Result<ShapedConversation, ProviderError> {
    if messages.is_empty() {
        return Err(ProviderError::EmptyConversation);
    }

    let mut system = Vec::new();
    let mut turns: Vec<ProviderMessage> = Vec::new();

    for msg in messages {
        match msg.role {
            MessageRole::System => system.push(msg.content.clone()),
            role => match turns.last_mut() {
                Some(last) if last.role == role => {
                    last.content.push_str("\n\n");
                    last.content.push_str(&msg.content);
                }
                _ => turns.push(msg.clone()),
            },
        }
    }

    if turns.first().is_none_or(|first| first.role == MessageRole::Assistant) {
        turns.insert(0, ProviderMessage::user(LEADING_USER_PLACEHOLDER));
    }

    if strict_json {
        system.push(STRICT_JSON_INSTRUCTION.to_string());
    }

    Ok(ShapedConversation {
        system,
        messages: turns,
    })
}

/// Completion provider backed by the Bedrock Converse API.
pub struct BedrockProvider {
    client: Client,
    tiers: ModelTiers,
}

impl BedrockProvider {
    pub fn new(client: Client, tiers: ModelTiers) -> Self {
        Self { client, tiers }
    }

    async fn converse(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let call_id = Uuid::new_v4();
        let model_id = self.tiers.resolve(request.tier);
        let shaped = shape_conversation(&request.messages, request.strict_json)?;

        let mut converse_messages = Vec::with_capacity(shaped.messages.len());
        for msg in &shaped.messages {
            let role = match msg.role {
                MessageRole::Assistant => ConversationRole::Assistant,
                _ => ConversationRole::User,
            };
            let message = Message::builder()
                .role(role)
                .content(ContentBlock::Text(msg.content.clone()))
                .build()
                .map_err(|e| ProviderError::Invocation(e.to_string()))?;
            converse_messages.push(message);
        }

        debug!(
            call_id = %call_id,
            model_id,
            tier = %request.tier,
            messages = converse_messages.len(),
            strict_json = request.strict_json,
            "invoking converse"
        );

        let mut call = self
            .client
            .converse()
            .model_id(model_id)
            .set_messages(Some(converse_messages));
        for text in shaped.system {
            call = call.system(SystemContentBlock::Text(text));
        }

        let response = call
            .send()
            .await
            .map_err(|e| ProviderError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| ProviderError::ResponseParse("no message in response".to_string()))?;

        let response_text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        if let Some(usage) = response.usage() {
            let count = tokens::extract_token_usage(usage);
            info!(
                call_id = %call_id,
                model_id,
                input_tokens = count.input,
                output_tokens = count.output,
                cost_usd = tokens::estimate_cost(model_id, count).unwrap_or(0.0),
                "converse complete"
            );
        }

        if request.strict_json {
            return extract_json_object(&response_text)
                .map(str::to_string)
                .ok_or_else(|| {
                    ProviderError::ResponseParse(format!(
                        "expected a JSON object, got: {response_text}"
                    ))
                });
        }

        Ok(response_text)
    }
}

impl CompletionProvider for BedrockProvider {
    fn complete(&self, request: CompletionRequest) -> BoxFuture<'_, Result<String, ProviderError>> {
        Box::pin(self.converse(request))
    }
}
