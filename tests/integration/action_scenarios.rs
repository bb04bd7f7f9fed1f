//! Handler behaviour through the dispatcher, against the recording engine.

use super::support::{flags, invocation, module, run, EngineState};
use hypergraph::dispatch::InvocationFlags;
use hypergraph::engine::InitRequest;
use hypergraph::prompt::{Answer, Question, ScriptedPrompt};
use hypergraph::types::{ModuleKey, ModuleType};

fn text(value: &str) -> Answer {
    Answer::Text(value.to_string())
}

fn address(byte: u8) -> String {
    format!("dat://{}", hex::encode([byte; 32]))
}

#[tokio::test]
async fn create_profile_prompts_name_and_description() {
    let state = EngineState::empty();
    let mut prompt = ScriptedPrompt::new(vec![text("n"), text("d")]);

    let output = run(invocation(&["create", "profile"], flags()), &mut prompt, &state)
        .await
        .unwrap();

    assert_eq!(prompt.messages(), vec!["Name", "Description"]);
    assert_eq!(
        state.inits(),
        vec![InitRequest::new(
            ModuleType::Profile,
            "n".to_string(),
            "d".to_string()
        )]
    );
    assert_eq!(output, address(0xc0));
    assert_eq!(state.count("destroy"), 1);
}

#[tokio::test]
async fn create_profile_from_flags_asks_nothing() {
    let state = EngineState::empty();
    let mut prompt = ScriptedPrompt::silent();
    let flags = InvocationFlags {
        name: Some("Ada".to_string()),
        description: Some(String::new()),
        ..flags()
    };

    run(invocation(&["create", "profile"], flags), &mut prompt, &state)
        .await
        .unwrap();

    assert!(prompt.asked().is_empty());
    assert_eq!(state.inits()[0].title, "Ada");
    assert_eq!(state.inits()[0].description, "");
}

#[tokio::test]
async fn second_profile_is_refused() {
    let state = EngineState::with_modules(vec![module(1, ModuleType::Profile, "me")]);
    let mut prompt = ScriptedPrompt::silent();

    let err = run(invocation(&["create", "profile"], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(err.is_user_error());
    assert_eq!(err.to_string(), "A local profile already exists");
    assert!(state.inits().is_empty());
}

#[tokio::test]
async fn create_content_without_profile_creates_profile_instead() {
    let state = EngineState::empty();
    let mut prompt = ScriptedPrompt::new(vec![text("Julian"), text("")]);
    let flags = InvocationFlags {
        title: Some("t".to_string()),
        description: Some(String::new()),
        subtype: Some("Q17737".to_string()),
        yes: true,
        ..flags()
    };

    let output = run(invocation(&["create", "content"], flags), &mut prompt, &state)
        .await
        .unwrap();

    assert_eq!(prompt.notices(), ["create your profile first"]);
    assert_eq!(prompt.messages(), vec!["Name", "Description"]);
    assert_eq!(
        state.inits(),
        vec![InitRequest::new(
            ModuleType::Profile,
            "Julian".to_string(),
            String::new()
        )]
    );
    assert_eq!(output, address(0xc0));
    assert_eq!(state.count("destroy"), 1);
}

#[tokio::test]
async fn create_content_authored_by_local_profile() {
    let state = EngineState::with_modules(vec![module(1, ModuleType::Profile, "me")]);
    let mut prompt = ScriptedPrompt::new(vec![
        text("Paper"),
        text("About things"),
        text("Q13442814"),
        Answer::Confirmed(true),
    ]);

    run(invocation(&["create", "content"], flags()), &mut prompt, &state)
        .await
        .unwrap();

    assert_eq!(
        prompt.messages()[..3],
        ["Title", "Description", "Wikidata subtype"]
    );
    assert!(matches!(prompt.asked()[3], Question::Confirm { .. }));
    let request = &state.inits()[0];
    assert_eq!(request.module_type, ModuleType::Content);
    assert_eq!(request.title, "Paper");
    assert_eq!(request.subtype.as_deref(), Some("Q13442814"));
    assert_eq!(request.authors, vec![ModuleKey([1u8; 32])]);
    assert!(request.parents.is_empty());
}

#[tokio::test]
async fn create_content_offers_existing_content_as_parents() {
    let state = EngineState::with_modules(vec![
        module(1, ModuleType::Profile, "me"),
        module(2, ModuleType::Content, "earlier"),
        module(3, ModuleType::Content, "other"),
    ]);
    let mut prompt = ScriptedPrompt::new(vec![
        text("Follow-up"),
        Answer::Choices(vec![hex::encode([3u8; 32])]),
    ]);
    let flags = InvocationFlags {
        description: Some(String::new()),
        subtype: Some(String::new()),
        yes: true,
        ..flags()
    };

    run(invocation(&["create", "content"], flags), &mut prompt, &state)
        .await
        .unwrap();

    match &prompt.asked()[1] {
        Question::MultiSelect { message, choices } => {
            assert_eq!(message, "Select parent modules");
            assert_eq!(choices.len(), 2);
        }
        other => panic!("expected multiselect, got {:?}", other),
    }
    assert_eq!(state.inits()[0].parents, vec![ModuleKey([3u8; 32])]);
}

#[tokio::test]
async fn declined_license_creates_nothing() {
    let state = EngineState::with_modules(vec![module(1, ModuleType::Profile, "me")]);
    let mut prompt = ScriptedPrompt::new(vec![
        text("Paper"),
        text(""),
        text(""),
        Answer::Confirmed(false),
    ]);

    let err = run(invocation(&["create", "content"], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(err.is_user_error());
    assert!(state.inits().is_empty());
    assert_eq!(state.count("destroy"), 1);
}

#[tokio::test]
async fn list_content_prints_one_address_per_module_in_order() {
    let state = EngineState::with_modules(vec![
        module(9, ModuleType::Content, "later"),
        module(4, ModuleType::Profile, "me"),
        module(1, ModuleType::Content, "first"),
    ]);
    let mut prompt = ScriptedPrompt::silent();

    let output = run(invocation(&["list", "content"], flags()), &mut prompt, &state)
        .await
        .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines, vec![address(9), address(1)]);
}

#[tokio::test]
async fn list_empty_prints_nothing() {
    let state = EngineState::empty();
    let mut prompt = ScriptedPrompt::silent();

    let output = run(invocation(&["list", "profile"], flags()), &mut prompt, &state)
        .await
        .unwrap();

    assert!(output.is_empty());
}

#[tokio::test]
async fn read_whole_record_and_single_key() {
    let state = EngineState::with_modules(vec![module(5, ModuleType::Content, "Paper")]);
    let hash = address(5);

    let mut prompt = ScriptedPrompt::silent();
    let record = run(invocation(&["read", &hash], flags()), &mut prompt, &state)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&record).unwrap();
    assert_eq!(json["title"], "Paper");
    assert_eq!(json["url"], hash.as_str());

    let mut prompt = ScriptedPrompt::silent();
    let title = run(invocation(&["read", &hash, "title"], flags()), &mut prompt, &state)
        .await
        .unwrap();
    assert_eq!(title, "Paper");
}

#[tokio::test]
async fn read_unknown_key_is_user_error() {
    let state = EngineState::with_modules(vec![module(5, ModuleType::Content, "Paper")]);
    let mut prompt = ScriptedPrompt::silent();

    let err = run(
        invocation(&["read", &address(5), "colour"], flags()),
        &mut prompt,
        &state,
    )
    .await
    .unwrap_err();

    assert!(err.is_user_error());
    assert!(err.to_string().starts_with("Unknown key: colour"));
}

#[tokio::test]
async fn read_missing_module_is_user_error() {
    let state = EngineState::empty();
    let mut prompt = ScriptedPrompt::silent();

    let err = run(invocation(&["read", &address(6)], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(err.is_user_error());
    assert_eq!(err.to_string(), format!("Module not found: {}", address(6)));
    assert_eq!(state.count("destroy"), 1);
}

#[tokio::test]
async fn update_without_key_prompts_every_editable_field() {
    let state = EngineState::with_modules(vec![module(5, ModuleType::Content, "Old")]);
    let mut prompt = ScriptedPrompt::new(vec![text("New"), text("desc"), text("paper.pdf")]);

    let output = run(
        invocation(&["update", &hex::encode([5u8; 32])], flags()),
        &mut prompt,
        &state,
    )
    .await
    .unwrap();

    assert!(output.is_empty());
    assert_eq!(prompt.messages(), vec!["title", "description", "main"]);
    match &prompt.asked()[0] {
        Question::Text { initial, .. } => assert_eq!(initial.as_deref(), Some("Old")),
        other => panic!("expected text, got {:?}", other),
    }
    let sets = state.sets();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].title, "New");
    assert_eq!(sets[0].description, "desc");
    assert_eq!(sets[0].main, "paper.pdf");
}

#[tokio::test]
async fn update_key_without_value_prompts_once() {
    let state = EngineState::with_modules(vec![module(5, ModuleType::Content, "Old")]);
    let mut prompt = ScriptedPrompt::new(vec![text("index.html")]);

    run(
        invocation(&["update", &address(5), "main"], flags()),
        &mut prompt,
        &state,
    )
    .await
    .unwrap();

    assert_eq!(prompt.messages(), vec!["main"]);
    assert_eq!(state.sets()[0].main, "index.html");
    assert_eq!(state.sets()[0].title, "Old");
}

#[tokio::test]
async fn update_key_and_value_asks_nothing() {
    let state = EngineState::with_modules(vec![module(5, ModuleType::Content, "Old")]);
    let mut prompt = ScriptedPrompt::silent();

    run(
        invocation(&["update", &address(5), "title", "Renamed"], flags()),
        &mut prompt,
        &state,
    )
    .await
    .unwrap();

    assert!(prompt.asked().is_empty());
    assert_eq!(state.sets()[0].title, "Renamed");
}

#[tokio::test]
async fn update_to_empty_title_is_refused() {
    let state = EngineState::with_modules(vec![module(5, ModuleType::Content, "Old")]);
    let mut prompt = ScriptedPrompt::silent();

    let err = run(
        invocation(&["update", &address(5), "title", " "], flags()),
        &mut prompt,
        &state,
    )
    .await
    .unwrap_err();

    assert!(err.is_user_error());
    assert!(state.sets().is_empty());
}

#[tokio::test]
async fn register_defaults_to_local_profile() {
    let state = EngineState::with_modules(vec![
        module(1, ModuleType::Profile, "me"),
        module(2, ModuleType::Content, "paper"),
    ]);
    let mut prompt = ScriptedPrompt::silent();

    let output = run(invocation(&["register", &address(2)], flags()), &mut prompt, &state)
        .await
        .unwrap();

    assert!(output.is_empty());
    assert_eq!(
        state.registrations(),
        vec![(ModuleKey([2u8; 32]), ModuleKey([1u8; 32]))]
    );
}

#[tokio::test]
async fn register_without_content_picks_among_existing() {
    let state = EngineState::with_modules(vec![
        module(1, ModuleType::Profile, "me"),
        module(2, ModuleType::Content, "first"),
        module(3, ModuleType::Content, "second"),
    ]);
    let mut prompt = ScriptedPrompt::new(vec![Answer::Choice(hex::encode([3u8; 32]))]);

    run(invocation(&["register"], flags()), &mut prompt, &state)
        .await
        .unwrap();

    match &prompt.asked()[..] {
        [Question::Select { message, choices }] => {
            assert_eq!(message, "Pick content to register");
            assert_eq!(choices.len(), 2);
            assert_eq!(choices[1].value, hex::encode([3u8; 32]));
        }
        other => panic!("expected one select, got {:?}", other),
    }
    assert_eq!(
        state.registrations(),
        vec![(ModuleKey([3u8; 32]), ModuleKey([1u8; 32]))]
    );
}

#[tokio::test]
async fn register_without_any_content_is_user_error() {
    let state = EngineState::with_modules(vec![module(1, ModuleType::Profile, "me")]);
    let mut prompt = ScriptedPrompt::silent();

    let err = run(invocation(&["register"], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(err.is_user_error());
    assert!(prompt.asked().is_empty());
    assert_eq!(state.count("destroy"), 1);
}

#[tokio::test]
async fn register_profile_as_content_is_refused() {
    let state = EngineState::with_modules(vec![module(1, ModuleType::Profile, "me")]);
    let mut prompt = ScriptedPrompt::silent();

    let err = run(invocation(&["register", &address(1)], flags()), &mut prompt, &state)
        .await
        .unwrap_err();

    assert!(err.is_user_error());
    assert!(state.registrations().is_empty());
}
