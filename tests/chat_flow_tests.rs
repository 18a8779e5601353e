use common::mocks::{MockLlmClient, create_empty_chat_response, create_mock_chat_response};
use neuroscan::{
    chat::{ChatAssistant, Transcript, prompts},
    config::LlmConfig,
    llm::Role,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

mod common;

fn assistant_with(llm: &Arc<MockLlmClient>, config: &LlmConfig) -> ChatAssistant {
    ChatAssistant::new(llm.clone(), config)
}

#[tokio::test]
async fn test_reply_injects_single_system_turn_and_appends_answer() {
    let llm = Arc::new(
        MockLlmClient::new().with_responses(vec![
            create_mock_chat_response("first"),
            create_mock_chat_response("second"),
        ]),
    );
    let assistant = assistant_with(&llm, &LlmConfig::default());

    let mut transcript = Transcript::new();
    transcript.push(Role::User, "What does my scan mean?");

    let answer = assistant.reply(&mut transcript).await.unwrap();
    assert_eq!(answer, "first");
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.turns()[0].role, Role::System);
    assert_eq!(
        transcript.turns()[0].content,
        prompts::DIAGNOSIS_SYSTEM_PROMPT
    );
    assert_eq!(transcript.last().unwrap().role, Role::Assistant);

    transcript.push(Role::User, "And treatment?");
    assistant.reply(&mut transcript).await.unwrap();

    let system_turns = transcript
        .turns()
        .iter()
        .filter(|turn| turn.role == Role::System)
        .count();
    assert_eq!(system_turns, 1);
    assert_eq!(transcript.len(), 5);
}

#[tokio::test]
async fn test_reply_sends_whole_transcript_with_sampling() {
    let llm = Arc::new(MockLlmClient::new().with_responses(vec![create_mock_chat_response("ok")]));
    let assistant = assistant_with(&llm, &LlmConfig::default());

    let mut transcript = Transcript::new();
    transcript.push(Role::User, "hello");
    assistant.reply(&mut transcript).await.unwrap();

    let requests = llm.get_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[1].content, "hello");
    assert_eq!(request.temperature, Some(0.7));
    assert_eq!(request.top_p, Some(0.7));
    assert_eq!(request.stop, vec!["<|eot_id|>", "<|eom_id|>"]);
    assert_eq!(request.max_tokens, None);
}

#[tokio::test]
async fn test_configured_system_prompt_overrides_default() {
    let llm = Arc::new(MockLlmClient::new().with_responses(vec![create_mock_chat_response("ok")]));
    let config = LlmConfig {
        system_prompt: Some("Be brief.".to_string()),
        ..LlmConfig::default()
    };
    let assistant = assistant_with(&llm, &config);

    let mut transcript = Transcript::new();
    transcript.push(Role::User, "hello");
    assistant.reply(&mut transcript).await.unwrap();

    assert_eq!(transcript.turns()[0].content, "Be brief.");
}

#[tokio::test]
async fn test_start_diagnosis_resets_transcript() {
    let llm = Arc::new(
        MockLlmClient::new().with_responses(vec![create_mock_chat_response("About mild dementia")]),
    );
    let assistant = assistant_with(&llm, &LlmConfig::default());

    let mut transcript = Transcript::new();
    transcript.push(Role::User, "old question");
    transcript.push(Role::Assistant, "old answer");

    let answer = assistant
        .start_diagnosis(&mut transcript, "Mild_Demented")
        .await
        .unwrap();

    assert_eq!(answer, "About mild dementia");
    let contents: Vec<&str> = transcript
        .turns()
        .iter()
        .map(|turn| turn.content.as_str())
        .collect();
    assert_eq!(
        contents,
        vec![
            prompts::DISEASE_INFO_SYSTEM_PROMPT,
            "I have the following disease: Mild_Demented. What can you tell me about this?",
            "About mild dementia",
        ]
    );
}

#[tokio::test]
async fn test_empty_response_is_an_error() {
    let llm = Arc::new(MockLlmClient::new().with_responses(vec![create_empty_chat_response()]));
    let assistant = assistant_with(&llm, &LlmConfig::default());

    let mut transcript = Transcript::new();
    transcript.push(Role::User, "hello");

    let err = assistant.reply(&mut transcript).await.unwrap_err();
    assert!(err.to_string().contains("Invalid response from API"));
    assert_eq!(transcript.last().unwrap().role, Role::User);
}

#[tokio::test]
async fn test_llm_error_propagates() {
    let llm = Arc::new(MockLlmClient::new().with_error("rate limited"));
    let assistant = assistant_with(&llm, &LlmConfig::default());

    let mut transcript = Transcript::new();
    transcript.push(Role::User, "hello");

    let err = assistant.reply(&mut transcript).await.unwrap_err();
    assert!(err.to_string().contains("rate limited"));
}
