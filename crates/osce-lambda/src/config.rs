//! Deployment configuration, read from the Lambda environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `OSCE_BUCKET` | `osce` |
//! | `OSCE_WINDOW_SIZE` | `10` |
//! | `OSCE_PASS_THRESHOLD` | `60` |
//! | `OSCE_SCORE_WEIGHTS` | required, e.g. `40/60` |
//! | `OSCE_FAST_MODEL` | Claude Haiku inference profile |
//! | `OSCE_MAIN_MODEL` | Claude Sonnet inference profile |

use osce_bedrock::provider::ModelTiers;
use osce_core::config::{DEFAULT_PASS_THRESHOLD, DEFAULT_WINDOW_SIZE, ExamConfig, ScoreWeights};

pub struct LambdaConfig {
    pub bucket: String,
    pub exam: ExamConfig,
    pub tiers: ModelTiers,
}

impl LambdaConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let bucket = lookup("OSCE_BUCKET").unwrap_or_else(|| "osce".to_string());

        let window_size = match lookup("OSCE_WINDOW_SIZE") {
            Some(v) => v
                .parse::<usize>()
                .map_err(|e| eyre::eyre!("invalid OSCE_WINDOW_SIZE \"{v}\": {e}"))?,
            None => DEFAULT_WINDOW_SIZE,
        };
        let pass_threshold = match lookup("OSCE_PASS_THRESHOLD") {
            Some(v) => v
                .parse::<u8>()
                .map_err(|e| eyre::eyre!("invalid OSCE_PASS_THRESHOLD \"{v}\": {e}"))?,
            None => DEFAULT_PASS_THRESHOLD,
        };
        let weights: ScoreWeights = lookup("OSCE_SCORE_WEIGHTS")
            .ok_or_else(|| eyre::eyre!("OSCE_SCORE_WEIGHTS must be set, e.g. \"40/60\""))?
            .parse()?;

        let defaults = ModelTiers::default();
        let tiers = ModelTiers {
            fast: lookup("OSCE_FAST_MODEL").unwrap_or(defaults.fast),
            main: lookup("OSCE_MAIN_MODEL").unwrap_or(defaults.main),
        };

        Ok(Self {
            bucket,
            exam: ExamConfig::new(window_size, pass_threshold, weights)?,
            tiers,
        })
    }
}
