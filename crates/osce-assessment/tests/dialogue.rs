mod common;

use common::{ScriptedProvider, history, test_catalog};
use osce_assessment::condenser::{SUMMARY_FALLBACK, condense_history};
use osce_assessment::dialogue::{UNWELL_FALLBACK, build_messages, respond};
use osce_bedrock::converse::{LEADING_USER_PLACEHOLDER, shape_conversation};
use osce_assessment::error::AssessmentError;
use osce_bedrock::provider::{MessageRole, ModelTier, ProviderMessage};
use osce_core::config::{ExamConfig, ScoreWeights};
use osce_core::models::dialogue::TurnRole;

fn config(window_size: usize) -> ExamConfig {
    ExamConfig::new(window_size, 60, ScoreWeights::new(40, 60).unwrap()).unwrap()
}

#[tokio::test]
async fn condenser_is_not_invoked_within_the_window() {
    let catalog = test_catalog();

    for n in [0, 1, 5, 10] {
        let provider = ScriptedProvider::replying("It's a crushing pain.");
        let reply = respond(&provider, &catalog, &config(10), "chest_pain", &history(n))
            .await
            .unwrap();

        assert_eq!(reply.content, "It's a crushing pain.");
        assert!(!reply.degraded);
        assert_eq!(provider.calls_for(ModelTier::Fast), 0, "history of {n} turns");

        let main = &provider.calls()[0];
        assert_eq!(main.messages.len(), n + 1);
        assert!(!main.strict_json);
        assert!(!main.messages[0].content.contains("Summary"));
    }
}

#[tokio::test]
async fn trailing_window_is_sent_verbatim() {
    let catalog = test_catalog();
    let turns = history(13);
    let provider = ScriptedProvider::replying("About an hour ago.");

    respond(&provider, &catalog, &config(10), "chest_pain", &turns)
        .await
        .unwrap();

    assert_eq!(provider.calls_for(ModelTier::Fast), 1);
    let main = provider
        .calls()
        .into_iter()
        .find(|c| c.tier == ModelTier::Main)
        .unwrap();

    assert_eq!(main.messages.len(), 11);
    assert_eq!(main.messages[0].role, MessageRole::System);
    for (sent, turn) in main.messages[1..].iter().zip(&turns[3..]) {
        let expected = match turn.role {
            TurnRole::Patient => ProviderMessage::assistant(turn.content.clone()),
            TurnRole::Student => ProviderMessage::user(turn.content.clone()),
        };
        assert_eq!(sent, &expected);
    }
}

#[tokio::test]
async fn only_turns_older_than_the_window_are_condensed() {
    let catalog = test_catalog();
    let provider = ScriptedProvider::replying("Yes.");

    respond(&provider, &catalog, &config(10), "chest_pain", &history(13))
        .await
        .unwrap();

    let fast = provider
        .calls()
        .into_iter()
        .find(|c| c.tier == ModelTier::Fast)
        .unwrap();
    let prompt = &fast.messages[0].content;
    assert!(prompt.contains("student: question 0"));
    assert!(prompt.contains("student: question 2"));
    assert!(!prompt.contains("answer 3"));

    let main = provider
        .calls()
        .into_iter()
        .find(|c| c.tier == ModelTier::Main)
        .unwrap();
    let system = &main.messages[0].content;
    assert!(system.starts_with("You are Mr. Jones"));
    assert!(system.contains("Summary of the consultation so far: Chest pain for one hour."));
}

#[tokio::test]
async fn failed_summary_falls_back_and_conversation_continues() {
    let catalog = test_catalog();
    let provider = ScriptedProvider::new(Err("throttled"), Ok("It's getting worse."));

    let reply = respond(&provider, &catalog, &config(4), "chest_pain", &history(6))
        .await
        .unwrap();

    assert_eq!(reply.content, "It's getting worse.");
    let main = provider
        .calls()
        .into_iter()
        .find(|c| c.tier == ModelTier::Main)
        .unwrap();
    assert!(main.messages[0].content.contains(SUMMARY_FALLBACK));
}

#[tokio::test]
async fn condenser_returns_fallback_on_failure() {
    let provider = ScriptedProvider::down();
    let summary = condense_history(&provider, &history(3)).await;
    assert_eq!(summary, SUMMARY_FALLBACK);
}

#[tokio::test]
async fn provider_outage_returns_unwell_fallback() {
    let catalog = test_catalog();
    let provider = ScriptedProvider::down();

    let reply = respond(&provider, &catalog, &config(10), "chest_pain", &history(3))
        .await
        .unwrap();

    assert_eq!(reply.content, UNWELL_FALLBACK);
    assert!(reply.degraded);
}

#[tokio::test]
async fn unknown_scenario_is_an_error() {
    let catalog = test_catalog();
    let provider = ScriptedProvider::replying("Hello.");

    let err = respond(&provider, &catalog, &config(10), "knee_pain", &history(1))
        .await
        .unwrap_err();

    assert!(matches!(err, AssessmentError::ScenarioNotFound(id) if id == "knee_pain"));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn opening_turn_is_sendable_to_converse() {
    let catalog = test_catalog();
    let scenario = catalog.lookup("chest_pain").unwrap();
    let provider = ScriptedProvider::replying("unused");

    let messages = build_messages(&provider, scenario, 10, &[]).await;
    assert_eq!(messages.len(), 1);

    let shaped = shape_conversation(&messages, false).unwrap();
    assert_eq!(shaped.system.len(), 1);
    assert_eq!(shaped.messages, vec![ProviderMessage::user(LEADING_USER_PLACEHOLDER)]);
}
