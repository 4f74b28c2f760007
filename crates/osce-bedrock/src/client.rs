use aws_sdk_bedrockruntime::Client;

/// Build a Bedrock runtime client from the default credential chain.
pub async fn build_client() -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    Client::new(&config)
}
