use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::LambdaConfig;
use osce_bedrock::converse::BedrockProvider;
use osce_storage::attempts::S3AttemptStore;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = LambdaConfig::from_env()?;

    let s3 = osce_storage::client::build_client().await;
    let bedrock = osce_bedrock::client::build_client().await;

    let catalog = osce_storage::catalog::load_catalog(&s3, &config.bucket).await?;

    tracing::info!(
        bucket = %config.bucket,
        scenarios = catalog.len(),
        window_size = config.exam.window_size,
        pass_threshold = config.exam.pass_threshold,
        dialogue_weight = config.exam.weights.dialogue(),
        viva_weight = config.exam.weights.viva(),
        fast_model = %config.tiers.fast,
        main_model = %config.tiers.main,
        "starting osce api"
    );

    let state = AppState {
        provider: Arc::new(BedrockProvider::new(bedrock, config.tiers)),
        attempts: Arc::new(S3AttemptStore::new(s3, config.bucket)),
        catalog: Arc::new(catalog),
        exam: Arc::new(config.exam),
    };

    lambda_http::run(app::router(state))
        .await
        .map_err(|e| eyre::eyre!(e))
}
