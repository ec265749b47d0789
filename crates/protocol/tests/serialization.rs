use af_protocol::*;
use std::path::PathBuf;

#[test]
fn test_agent_list_deserialization_from_exported_json() {
    // Shape written by the save/export path: a top-level array, camelCase keys
    let json_str = r#"
[
  {
    "id": "agent_layout",
    "name": "Layout Mapper",
    "description": "Maps observations onto the template layout",
    "provider": "gemini",
    "model": "gemini-2.5-flash",
    "maxTokens": 4000,
    "temperature": 0.1,
    "userPrompt": "Map the observations.",
    "systemPromptSuffix": "Strictly follow the template."
  },
  {
    "id": "agent_polish"
  }
]
"#;

    let agents: Vec<AgentConfig> =
        serde_json::from_str(json_str).expect("Failed to deserialize agent list");

    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].name, "Layout Mapper");
    assert_eq!(agents[0].max_tokens, 4000);
    assert_eq!(agents[0].provider, AgentProvider::Gemini);
    // Minimal second record fills in defaults
    assert_eq!(agents[1].model, "gemini-2.5-flash");
    assert!(agents[1].user_prompt.is_empty());
}

#[test]
fn test_run_status_serialization() {
    let status = RunStatus::Running;
    let json = serde_json::to_value(status).expect("Failed to serialize RunStatus");

    assert_eq!(json, "running");

    let deserialized: RunStatus =
        serde_json::from_value(json).expect("Failed to deserialize RunStatus");
    assert_eq!(deserialized, RunStatus::Running);
}

#[test]
fn test_pipeline_state_serialization() {
    let mut state = PipelineState {
        template: "# Report".to_string(),
        observations: "- obs 1".to_string(),
        current_step_index: 1,
        agents: vec![serde_json::from_str(r#"{"id":"a"}"#).expect("agent")],
        history: Default::default(),
    };
    state.history.insert(
        "a".to_string(),
        AgentRunState::completed("filled".to_string(), 2, 40, 1_700_000_000_000),
    );

    let json = serde_json::to_string(&state).expect("Failed to serialize PipelineState");
    let deserialized: PipelineState =
        serde_json::from_str(&json).expect("Failed to deserialize PipelineState");

    assert_eq!(deserialized.template, state.template);
    assert_eq!(deserialized.current_step_index, 1);
    assert_eq!(deserialized.history["a"].output, "filled");
    assert_eq!(deserialized.history["a"].status, RunStatus::Completed);
}

#[test]
fn test_global_config_serialization() {
    let config = GlobalConfig {
        default_model: "gemini-2.5-flash".to_string(),
        base_url: Some("http://localhost:8080".to_string()),
        timeout_secs: 30,
    };

    let json = serde_json::to_string(&config).expect("Failed to serialize GlobalConfig");
    let deserialized: GlobalConfig =
        serde_json::from_str(&json).expect("Failed to deserialize GlobalConfig");

    assert_eq!(deserialized, config);
}

#[test]
fn test_op_enum_serialization() {
    let op = Op::LoadAgents {
        path: PathBuf::from("pipeline_config.json"),
    };

    let json = serde_json::to_value(&op).expect("Failed to serialize Op");
    assert_eq!(json["type"], "loadAgents");
    assert!(json["payload"].is_object());

    let deserialized: Op = serde_json::from_value(json).expect("Failed to deserialize Op");
    match deserialized {
        Op::LoadAgents { path } => assert_eq!(path, PathBuf::from("pipeline_config.json")),
        _ => panic!("Wrong variant"),
    }

    let run_op = Op::RunAgent {
        agent_id: "agent_car".to_string(),
    };
    let json = serde_json::to_value(&run_op).expect("Failed to serialize Op::RunAgent");
    assert_eq!(json["type"], "runAgent");
}

#[test]
fn test_event_enum_serialization() {
    let event = Event::AgentFinished {
        agent_id: "agent_layout".to_string(),
        run: AgentRunState::failed("API Key is missing.".to_string(), 0),
    };

    let json = serde_json::to_value(&event).expect("Failed to serialize Event");
    assert_eq!(json["type"], "agentFinished");
    assert_eq!(json["payload"]["run"]["status"], "error");

    let snapshot = Event::StateSnapshot {
        state: PipelineState::default(),
    };
    let json = serde_json::to_value(&snapshot).expect("Failed to serialize Event");
    assert_eq!(json["type"], "stateSnapshot");
}

#[test]
fn test_note_action_serialization() {
    let action = NoteAction::Keywords {
        keywords: vec!["finding".to_string(), "risk".to_string()],
        color: "#fde047".to_string(),
    };

    let json = serde_json::to_value(&action).expect("Failed to serialize NoteAction");
    assert_eq!(json["type"], "keywords");
    assert_eq!(json["payload"]["keywords"][1], "risk");

    let format = NoteAction::Format;
    let json = serde_json::to_value(&format).expect("Failed to serialize NoteAction::Format");
    assert_eq!(json["type"], "format");
}

#[test]
fn test_chat_turn_serialization() {
    let history = vec![
        ChatTurn::user("What does CAR stand for?"),
        ChatTurn::model("Corrective Action Request."),
    ];

    let json = serde_json::to_string(&history).expect("Failed to serialize chat history");
    let deserialized: Vec<ChatTurn> =
        serde_json::from_str(&json).expect("Failed to deserialize chat history");

    assert_eq!(deserialized.len(), 2);
    assert_eq!(deserialized[0].role, ChatRole::User);
    assert_eq!(deserialized[1].role, ChatRole::Model);
}
