//! Coach reply integration tests.

use chrono::Utc;
use fitcoach_config::SearchConfig;
use fitcoach_memory::FileChatTranscript;
use fitcoach_core::{
    ChatModel, Coach, MISSING_MODEL_REPLY, MODEL_ERROR_REPLY, PromptBuilder, ResearchProvider,
};
use fitcoach_protocol::{ChatMessage, ChatRole, LogType};
use fitcoach_test_utils::{
    FailingChatModel, FailingResearch, FixedChatModel, RecordingChatModel, StubResearch,
    record_days_ago,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::tempdir;

fn search_enabled() -> SearchConfig {
    SearchConfig {
        enabled: true,
        ..SearchConfig::default()
    }
}

#[tokio::test]
async fn missing_model_returns_settings_hint() {
    let coach = Coach::new(None, PromptBuilder::default());
    let reply = coach.reply(&[], "how should I train today?", &[]).await;
    assert_eq!(reply, MISSING_MODEL_REPLY);
    assert!(!coach.has_model());
}

#[tokio::test]
async fn model_reply_is_returned() {
    let model: Arc<dyn ChatModel> = Arc::new(FixedChatModel::new("Deload this week."));
    let coach = Coach::new(Some(model), PromptBuilder::default());
    let reply = coach.reply(&[], "I'm exhausted", &[]).await;
    assert_eq!(reply, "Deload this week.");
}

#[tokio::test]
async fn model_failure_degrades_to_error_reply() {
    let model: Arc<dyn ChatModel> = Arc::new(FailingChatModel);
    let coach = Coach::new(Some(model), PromptBuilder::default());
    let reply = coach.reply(&[], "hello", &[]).await;
    assert_eq!(reply, MODEL_ERROR_REPLY);
}

#[tokio::test]
async fn request_carries_logs_and_message_window() {
    let recorder = RecordingChatModel::new("ok");
    let coach = Coach::new(
        Some(Arc::new(recorder.clone()) as Arc<dyn ChatModel>),
        PromptBuilder::new(10, 2),
    );
    let now = Utc::now();
    let logs = vec![record_days_ago(LogType::Workout, "leg day, doms 6", 0, now)];
    let history = vec![
        ChatMessage::user("first"),
        ChatMessage::assistant("second"),
    ];

    coach.reply(&history, "what now?", &logs).await;

    let call = recorder.last_call().expect("call recorded");
    assert!(call.system_prompt.contains(&format!(
        "{}: leg day, doms 6",
        now.format("%Y-%m-%d")
    )));
    assert!(!call.system_prompt.contains("## Latest Research Context:"));
    assert_eq!(
        call.messages,
        vec![
            (ChatRole::Assistant, "second".to_string()),
            (ChatRole::User, "what now?".to_string()),
        ]
    );
}

#[tokio::test]
async fn research_keyword_adds_findings() {
    let recorder = RecordingChatModel::new("ok");
    let research = StubResearch::single("Protein distribution", "https://examine.com/protein");
    let coach = Coach::new(
        Some(Arc::new(recorder.clone()) as Arc<dyn ChatModel>),
        PromptBuilder::default(),
    )
    .with_search_config(search_enabled())
    .with_research(Arc::new(research.clone()) as Arc<dyn ResearchProvider>);

    coach
        .reply(&[], "Any Research on protein timing?", &[])
        .await;

    assert_eq!(research.queries(), vec!["Any Research on protein timing?"]);
    let call = recorder.last_call().expect("call recorded");
    assert!(call.system_prompt.contains("## Latest Research Context:"));
    assert!(call.system_prompt.contains("**1. Protein distribution**"));
    assert!(call.system_prompt.contains("*Source: examine.com*"));
}

#[tokio::test]
async fn query_without_scientific_terms_is_enhanced() {
    let research = StubResearch::default();
    let coach = Coach::new(
        Some(Arc::new(FixedChatModel::new("ok")) as Arc<dyn ChatModel>),
        PromptBuilder::default(),
    )
    .with_search_config(SearchConfig {
        enabled: true,
        trigger_keyword: "evidence".to_string(),
        ..SearchConfig::default()
    })
    .with_research(Arc::new(research.clone()) as Arc<dyn ResearchProvider>);

    coach.reply(&[], "evidence for cold plunges", &[]).await;

    assert_eq!(
        research.queries(),
        vec!["evidence for cold plunges exercise science research study"]
    );
}

#[tokio::test]
async fn search_disabled_skips_research() {
    let recorder = RecordingChatModel::new("ok");
    let research = StubResearch::single("Ignored", "https://example.com");
    let coach = Coach::new(
        Some(Arc::new(recorder.clone()) as Arc<dyn ChatModel>),
        PromptBuilder::default(),
    )
    .with_research(Arc::new(research.clone()) as Arc<dyn ResearchProvider>);

    coach.reply(&[], "latest research on creatine", &[]).await;

    assert!(research.queries().is_empty());
    let call = recorder.last_call().expect("call recorded");
    assert!(!call.system_prompt.contains("## Latest Research Context:"));
}

#[tokio::test]
async fn failed_search_uses_fallback_results() {
    let recorder = RecordingChatModel::new("still answered");
    let coach = Coach::new(
        Some(Arc::new(recorder.clone()) as Arc<dyn ChatModel>),
        PromptBuilder::default(),
    )
    .with_search_config(search_enabled())
    .with_research(Arc::new(FailingResearch) as Arc<dyn ResearchProvider>);

    let reply = coach.reply(&[], "research on deloads", &[]).await;

    assert_eq!(reply, "still answered");
    let call = recorder.last_call().expect("call recorded");
    assert!(
        call.system_prompt
            .contains("Exercise Research Database - Search not available")
    );
}

#[tokio::test]
async fn second_turn_sees_first_turn_from_transcript() {
    let temp = tempdir().expect("tempdir");
    let transcript = FileChatTranscript::new(temp.path().join("chat.jsonl")).expect("transcript");
    let recorder = RecordingChatModel::new("Keep the volume steady.");
    let coach = Coach::new(
        Some(Arc::new(recorder.clone()) as Arc<dyn ChatModel>),
        PromptBuilder::default(),
    );

    let first = coach
        .converse(&transcript, "how was my week?", &[])
        .await
        .expect("first turn");
    assert_eq!(first, "Keep the volume steady.");
    coach
        .converse(&transcript, "and next week?", &[])
        .await
        .expect("second turn");

    let calls = recorder.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0].messages,
        vec![(ChatRole::User, "how was my week?".to_string())]
    );
    assert_eq!(
        calls[1].messages,
        vec![
            (ChatRole::User, "how was my week?".to_string()),
            (ChatRole::Assistant, "Keep the volume steady.".to_string()),
            (ChatRole::User, "and next week?".to_string()),
        ]
    );

    let stored: Vec<_> = transcript
        .load()
        .expect("load")
        .into_iter()
        .map(|message| (message.role, message.content))
        .collect();
    assert_eq!(stored.len(), 4);
    assert_eq!(stored[3], (ChatRole::Assistant, "Keep the volume steady.".to_string()));
}

#[tokio::test]
async fn converse_without_model_still_records_turn() {
    let temp = tempdir().expect("tempdir");
    let transcript = FileChatTranscript::new(temp.path().join("chat.jsonl")).expect("transcript");
    let coach = Coach::new(None, PromptBuilder::default());

    let reply = coach
        .converse(&transcript, "hello", &[])
        .await
        .expect("turn");
    assert_eq!(reply, MISSING_MODEL_REPLY);
    let stored = transcript.load().expect("load");
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].content, MISSING_MODEL_REPLY);
}
