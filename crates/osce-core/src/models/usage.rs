use serde::{Deserialize, Serialize};

/// Input/output token counts reported for one model call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub input: u64,
    pub output: u64,
}

/// Pricing per million tokens for a model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPricing {
    pub fn estimate_cost(&self, tokens: TokenCount) -> f64 {
        let input_cost = (tokens.input as f64 / 1_000_000.0) * self.input_per_million;
        let output_cost = (tokens.output as f64 / 1_000_000.0) * self.output_per_million;
        input_cost + output_cost
    }
}
