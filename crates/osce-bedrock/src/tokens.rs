use osce_core::models::usage::{ModelPricing, TokenCount};

/// Extract token counts from a Bedrock Converse response.
pub fn extract_token_usage(usage: &aws_sdk_bedrockruntime::types::TokenUsage) -> TokenCount {
    TokenCount {
        input: usage.input_tokens.max(0) as u64,
        output: usage.output_tokens.max(0) as u64,
    }
}

/// Estimated USD cost of a call, if the model's pricing is known.
pub fn estimate_cost(model_id: &str, tokens: TokenCount) -> Option<f64> {
    get_pricing(model_id).map(|p| p.estimate_cost(tokens))
}

/// Known model pricing (per million tokens).
/// These are approximate and should be updated as pricing changes.
pub fn get_pricing(model_id: &str) -> Option<ModelPricing> {
    match model_id {
        id if id.contains("claude-opus-4") => Some(ModelPricing {
            input_per_million: 15.0,
            output_per_million: 75.0,
        }),
        id if id.contains("claude-sonnet-4") => Some(ModelPricing {
            input_per_million: 3.0,
            output_per_million: 15.0,
        }),
        id if id.contains("claude-haiku-4") => Some(ModelPricing {
            input_per_million: 1.0,
            output_per_million: 5.0,
        }),
        id if id.contains("claude-3-5-haiku") => Some(ModelPricing {
            input_per_million: 0.80,
            output_per_million: 4.0,
        }),
        _ => None,
    }
}
