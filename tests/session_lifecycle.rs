//! End-to-end lifecycle tests: reducer + completion client, without a terminal
//!
//! These drive the session the way the TUI runner does - apply an event,
//! execute the emitted effects against a client, feed the completion back in.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use promptforge::llm::{EngineerRequest, EngineerResponse, LlmClient, LlmError, TokenUsage};
use promptforge::prompt;
use promptforge::session::{CopyFeedback, Effect, Phase, SessionEvent, SessionState, TargetModel};

/// Scripted completion client
struct ScriptedClient {
    result: Result<String, String>,
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, _request: EngineerRequest) -> Result<EngineerResponse, LlmError> {
        match &self.result {
            Ok(text) => Ok(EngineerResponse {
                text: text.clone(),
                usage: TokenUsage::default(),
            }),
            Err(message) => Err(LlmError::ApiError {
                status: 429,
                message: format!(r#"{{"error":{{"message":"{}"}}}}"#, message),
            }),
        }
    }
}

/// Run one submit through the reducer and the client, like the runner does
async fn engineer_once(state: &mut SessionState, client: &ScriptedClient) {
    let effects = state.apply(SessionEvent::Submit);
    for effect in effects {
        match effect {
            Effect::StartRequest { token, input, target } => {
                assert!(state.is_in_flight(), "phase must be in flight while the call runs");
                let request = EngineerRequest {
                    system_instruction: prompt::system_instruction(target),
                    content: input,
                    max_tokens: 1024,
                };
                let result = client
                    .complete(request)
                    .await
                    .map(|r| r.text)
                    .map_err(|e| e.user_message());
                state.apply(SessionEvent::RequestFinished { token, result });
            }
            other => panic!("unexpected effect from submit: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_successful_engineer_round_trip() {
    let mut state = SessionState::default();
    state.raw_input = "a story about a robot who discovers music".to_string();
    let client = ScriptedClient {
        result: Ok("You are a master storyteller...".to_string()),
    };

    engineer_once(&mut state, &client).await;

    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.result_text(), Some("You are a master storyteller..."));
    assert!(state.last_error().is_none());
}

#[tokio::test]
async fn test_failed_engineer_surfaces_error_and_recovers() {
    let mut state = SessionState::default();
    state.raw_input = "hello".to_string();
    let failing = ScriptedClient {
        result: Err("rate limit exceeded".to_string()),
    };

    engineer_once(&mut state, &failing).await;

    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.result_text().is_none());
    // The structured provider message surfaces verbatim
    assert_eq!(state.last_error(), Some("rate limit exceeded"));

    // The session stays fully usable: the next attempt clears the error
    let working = ScriptedClient {
        result: Ok("engineered".to_string()),
    };
    engineer_once(&mut state, &working).await;

    assert_eq!(state.result_text(), Some("engineered"));
    assert!(state.last_error().is_none());
}

#[tokio::test]
async fn test_whitespace_input_never_reaches_the_client() {
    let mut state = SessionState::default();
    state.raw_input = "   ".to_string();

    let effects = state.apply(SessionEvent::Submit);

    assert!(effects.is_empty(), "no network call may be started");
    assert_eq!(state.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_copy_cycle_after_success() {
    let mut state = SessionState::default();
    state.raw_input = "hello".to_string();
    let client = ScriptedClient {
        result: Ok("engineered".to_string()),
    };
    engineer_once(&mut state, &client).await;

    // Copy emits exactly one clipboard write with the verbatim result
    let effects = state.apply(SessionEvent::CopyRequested);
    assert_eq!(effects, vec![Effect::WriteClipboard("engineered".to_string())]);

    let t0 = Instant::now();
    state.apply(SessionEvent::CopyFinished { result: Ok(()), at: t0 });
    assert_eq!(state.copy_feedback(), CopyFeedback::Confirmed);

    state.apply(SessionEvent::Tick {
        now: t0 + Duration::from_secs(3),
    });
    assert_eq!(state.copy_feedback(), CopyFeedback::None);
    assert_eq!(state.result_text(), Some("engineered"));
}

#[tokio::test]
async fn test_copy_failure_shows_failed_label() {
    let mut state = SessionState::default();
    state.raw_input = "hello".to_string();
    let client = ScriptedClient {
        result: Ok("engineered".to_string()),
    };
    engineer_once(&mut state, &client).await;

    state.apply(SessionEvent::CopyRequested);
    state.apply(SessionEvent::CopyFinished {
        result: Err("clipboard unavailable".to_string()),
        at: Instant::now(),
    });

    assert_eq!(state.copy_feedback(), CopyFeedback::Failed);
    assert_eq!(state.result_text(), Some("engineered"));
}

#[tokio::test]
async fn test_target_tag_reaches_the_instruction() {
    let mut state = SessionState::default();
    state.apply(SessionEvent::SelectTarget(TargetModel::ChatGpt));
    state.raw_input = "hello".to_string();

    let effects = state.apply(SessionEvent::Submit);
    match effects.as_slice() {
        [Effect::StartRequest { target, .. }] => {
            assert_eq!(*target, TargetModel::ChatGpt);
            let instruction = prompt::system_instruction(*target);
            assert!(instruction.contains("ChatGPT"));
        }
        other => panic!("expected StartRequest, got {:?}", other),
    }
}
