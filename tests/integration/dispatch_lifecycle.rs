//! Session lifecycle: engine connected only after resolution, destroyed
//! exactly once after a successful `ready`.

use super::support::{flags, invocation, module, run, EngineState};
use hypergraph::error::{CliError, EngineError, PromptError};
use hypergraph::prompt::{Answer, ScriptedPrompt};
use hypergraph::types::ModuleType;

#[tokio::test]
async fn unknown_action_never_connects() {
    let state = EngineState::empty();
    let mut prompt = ScriptedPrompt::silent();

    let err = run(invocation(&["bogus"], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(err.is_user_error());
    assert_eq!(err.to_string(), "Unknown action: bogus");
    assert!(prompt.asked().is_empty());
    assert!(state.calls().is_empty());
}

#[tokio::test]
async fn destroy_once_after_success() {
    let state = EngineState::with_modules(vec![module(1, ModuleType::Content, "a")]);
    let mut prompt = ScriptedPrompt::silent();

    run(invocation(&["list", "content"], flags()), &mut prompt, &state)
        .await
        .unwrap();

    assert_eq!(
        state.calls(),
        vec!["connect", "ready", "list_content", "destroy"]
    );
}

#[tokio::test]
async fn destroy_once_after_handler_error() {
    let state = EngineState::empty();
    let hash = hex::encode([8u8; 32]);
    let mut prompt = ScriptedPrompt::silent();

    let err = run(invocation(&["read", &hash], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Module not found"));
    assert!(err.is_user_error());
    assert_eq!(state.calls(), vec!["connect", "ready", "get", "destroy"]);
}

#[tokio::test]
async fn destroy_once_after_validation_error() {
    let state = EngineState::empty();
    let hash = hex::encode([7u8; 32]);
    let mut prompt = ScriptedPrompt::silent();

    let err = run(
        invocation(&["update", &hash, "license", "MIT"], flags()),
        &mut prompt,
        &state,
    )
    .await
    .unwrap_err();

    match err {
        CliError::InvalidKey { key, allowed } => {
            assert_eq!(key, "license");
            assert_eq!(allowed, "title, description, main");
        }
        other => panic!("expected invalid key, got {:?}", other),
    }
    assert_eq!(state.calls(), vec!["connect", "ready", "destroy"]);
}

#[tokio::test]
async fn invalid_explicit_type_is_rejected_inside_session() {
    let state = EngineState::empty();
    let mut prompt = ScriptedPrompt::silent();

    let err = run(invocation(&["list", "album"], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(err.is_user_error());
    assert!(err.to_string().contains("Invalid type: album"));
    assert_eq!(state.calls(), vec!["connect", "ready", "destroy"]);
}

#[tokio::test]
async fn ready_failure_skips_destroy() {
    let state = EngineState::failing_ready();
    let mut prompt = ScriptedPrompt::silent();

    let err = run(invocation(&["list", "profile"], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Engine(EngineError::Rejected(_))));
    assert!(!err.is_user_error());
    assert_eq!(state.calls(), vec!["connect", "ready"]);
}

#[tokio::test]
async fn prompt_failure_during_resolution_never_connects() {
    let state = EngineState::empty();
    let mut prompt = ScriptedPrompt::silent();

    let err = run(invocation(&["read"], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Prompt(PromptError::Exhausted(ref m)) if m == "Module hash"));
    assert!(state.calls().is_empty());
}

#[tokio::test]
async fn destroy_failure_after_success_is_reported() {
    let state = EngineState::failing_destroy(vec![module(1, ModuleType::Profile, "me")]);
    let mut prompt = ScriptedPrompt::silent();

    let err = run(invocation(&["list", "profile"], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Engine(EngineError::Rejected(_))));
    assert_eq!(state.count("destroy"), 1);
}

#[tokio::test]
async fn handler_error_wins_over_destroy_error() {
    let state = EngineState::failing_destroy(Vec::new());
    let hash = hex::encode([8u8; 32]);
    let mut prompt = ScriptedPrompt::silent();

    let err = run(invocation(&["read", &hash], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Module not found"));
    assert_eq!(state.count("destroy"), 1);
}

#[tokio::test]
async fn interactive_mode_picks_action_then_type() {
    let state = EngineState::with_modules(vec![
        module(1, ModuleType::Profile, "me"),
        module(2, ModuleType::Content, "paper"),
    ]);
    let mut prompt = ScriptedPrompt::new(vec![
        Answer::Choice("list".to_string()),
        Answer::Choice("profile".to_string()),
    ]);

    let output = run(invocation(&[], flags()), &mut prompt, &state)
        .await
        .unwrap();

    assert_eq!(prompt.messages(), vec!["Pick an action", "Pick a type"]);
    assert_eq!(output, format!("dat://{}", hex::encode([1u8; 32])));
    assert_eq!(state.count("destroy"), 1);
}
