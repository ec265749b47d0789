//! Keyboard and core-event handling for the TUI.
//!
//! Free functions operating on `App` state so they stay easy to test
//! without a live terminal.

use std::fs;

use crossterm::event::{KeyCode, KeyEvent};

use af_protocol::ipc::{Event, Op};
use af_protocol::log_models::LogLevel;
use af_protocol::note_models::{ChatTurn, NoteAction, ToolResult};

use crate::app::App;

/// Upper bound on retained log rows. Older entries are dropped first.
const LOG_CAPACITY: usize = 200;

/// Apply an event from the core to the UI state.
pub fn handle_core_event(app: &mut App, event: Event) {
    match event {
        Event::StateSnapshot { state } => {
            app.state = state;
            if !app.state.agents.is_empty() {
                app.selected_index = app.selected_index.min(app.state.agents.len() - 1);
            } else {
                app.selected_index = 0;
            }
        }
        Event::AgentStarted { agent_id } => {
            app.running_agent = Some(agent_id);
        }
        Event::AgentFinished { agent_id, .. } => {
            if app.running_agent.as_deref() == Some(agent_id.as_str()) {
                app.running_agent = None;
            }
        }
        Event::ReplaceFinished { result } | Event::NoteFinished { result } => match result {
            ToolResult::Ok { text } => {
                app.tool_output = text;
            }
            ToolResult::Err { error } => {
                app.push_local_log(LogLevel::Error, error);
            }
        },
        Event::ChatReply { result } => match result {
            ToolResult::Ok { text } => {
                app.chat_history.push(ChatTurn::model(text));
            }
            ToolResult::Err { error } => {
                app.push_local_log(LogLevel::Error, error);
            }
        },
        Event::Log { entry } => {
            app.logs.push(entry);
            if app.logs.len() > LOG_CAPACITY {
                let excess = app.logs.len() - LOG_CAPACITY;
                app.logs.drain(..excess);
            }
        }
    }
}

/// Handle a raw keyboard event.
pub fn handle_keyboard_event(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc => {
            app.should_exit = true;
        }
        KeyCode::Tab => {
            app.tab = app.tab.next();
        }
        KeyCode::Up => {
            app.selected_index = app.selected_index.saturating_sub(1);
        }
        KeyCode::Down => {
            if !app.state.agents.is_empty() {
                app.selected_index = (app.selected_index + 1).min(app.state.agents.len() - 1);
            }
        }
        KeyCode::Enter => {
            let command = std::mem::take(&mut app.command_input);
            let command = command.trim().to_string();
            if !command.is_empty() {
                submit_command(app, &command);
            }
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

/// Parse and dispatch a slash command entered at the prompt.
pub fn submit_command(app: &mut App, command: &str) {
    let mut parts = command.split_whitespace();
    let head = parts.next().unwrap_or("");
    let rest: Vec<&str> = parts.collect();

    match head {
        "/quit" | "/q" => {
            app.should_exit = true;
        }
        "/help" => {
            app.push_local_log(
                LogLevel::Info,
                "Commands: /run [id], /key <key>, /template <file>, /obs <file>, \
                 /edit <file>, /model <model>, /save [dir], /load <file>, /export [dir], \
                 /replace <fileA> <fileB>, /note <action> <file>, /chat <message>, /quit",
            );
        }
        "/key" => match rest.first() {
            Some(key) => send_op(
                app,
                Op::SetCredential {
                    api_key: (*key).to_string(),
                },
            ),
            None => app.push_local_log(LogLevel::Warning, "Usage: /key <api-key>"),
        },
        "/run" => {
            let agent_id = match rest.first() {
                Some(id) => (*id).to_string(),
                None => match app.state.agents.get(app.selected_index) {
                    Some(agent) => agent.id.clone(),
                    None => {
                        app.push_local_log(LogLevel::Warning, "No agent selected");
                        return;
                    }
                },
            };
            if app.running_agent.as_deref() == Some(agent_id.as_str()) {
                app.push_local_log(
                    LogLevel::Warning,
                    format!("Agent {agent_id} is already running"),
                );
                return;
            }
            send_op(app, Op::RunAgent { agent_id });
        }
        "/template" => match read_file_arg(app, rest.first(), "Usage: /template <file>") {
            Some(template) => send_op(app, Op::SetTemplate { template }),
            None => {}
        },
        "/obs" => match read_file_arg(app, rest.first(), "Usage: /obs <file>") {
            Some(observations) => send_op(app, Op::SetObservations { observations }),
            None => {}
        },
        "/edit" => {
            let agent_id = match app.state.agents.get(app.selected_index) {
                Some(agent) => agent.id.clone(),
                None => {
                    app.push_local_log(LogLevel::Warning, "No agent selected");
                    return;
                }
            };
            match read_file_arg(app, rest.first(), "Usage: /edit <file>") {
                Some(new_output) => send_op(
                    app,
                    Op::EditResult {
                        agent_id,
                        new_output,
                    },
                ),
                None => {}
            }
        }
        "/model" => {
            let Some(model) = rest.first() else {
                app.push_local_log(LogLevel::Warning, "Usage: /model <model>");
                return;
            };
            if !af_core::defaults::AVAILABLE_MODELS.contains(model) {
                app.push_local_log(
                    LogLevel::Warning,
                    format!(
                        "Unknown model {model}. Available: {}",
                        af_core::defaults::AVAILABLE_MODELS.join(", ")
                    ),
                );
                return;
            }
            let Some(agent) = app.state.agents.get(app.selected_index) else {
                app.push_local_log(LogLevel::Warning, "No agent selected");
                return;
            };
            let mut agent = agent.clone();
            agent.model = (*model).to_string();
            send_op(app, Op::UpdateAgent { agent });
        }
        "/save" => {
            let dir = rest.first().copied().unwrap_or(".");
            send_op(app, Op::SaveAgents { dir: dir.into() });
        }
        "/load" => match rest.first() {
            Some(path) => send_op(
                app,
                Op::LoadAgents {
                    path: (*path).into(),
                },
            ),
            None => app.push_local_log(LogLevel::Warning, "Usage: /load <file>"),
        },
        "/export" => {
            let agent_id = match app.state.agents.get(app.selected_index) {
                Some(agent) => agent.id.clone(),
                None => {
                    app.push_local_log(LogLevel::Warning, "No agent selected");
                    return;
                }
            };
            let dir = rest.first().copied().unwrap_or(".");
            send_op(
                app,
                Op::ExportReport {
                    agent_id,
                    dir: dir.into(),
                },
            );
        }
        "/replace" => match (rest.first(), rest.get(1)) {
            (Some(file_a), Some(file_b)) => {
                let template_a = match read_file(app, file_a) {
                    Some(text) => text,
                    None => return,
                };
                let list_b = match read_file(app, file_b) {
                    Some(text) => text,
                    None => return,
                };
                app.tab = crate::app::Tab::Replace;
                send_op(app, Op::SmartReplace { template_a, list_b });
            }
            _ => app.push_local_log(LogLevel::Warning, "Usage: /replace <fileA> <fileB>"),
        },
        "/note" => submit_note_command(app, &rest),
        "/chat" => {
            let message = rest.join(" ");
            if message.is_empty() {
                app.push_local_log(LogLevel::Warning, "Usage: /chat <message>");
                return;
            }
            app.chat_history.push(ChatTurn::user(message));
            app.tab = crate::app::Tab::Notes;
            send_op(
                app,
                Op::ChatSend {
                    note: app.note_text.clone(),
                    history: app.chat_history.clone(),
                },
            );
        }
        other => {
            app.push_local_log(LogLevel::Warning, format!("Unknown command: {other}"));
        }
    }
}

/// `/note format|entities|mindmap <file>` and
/// `/note keywords <file> <kw,kw,...> [color]`.
fn submit_note_command(app: &mut App, rest: &[&str]) {
    let usage = "Usage: /note format|entities|mindmap <file> or \
                 /note keywords <file> <kw,kw> [color]";
    let Some(kind) = rest.first() else {
        app.push_local_log(LogLevel::Warning, usage);
        return;
    };

    let (action, file) = match *kind {
        "format" => (NoteAction::Format, rest.get(1)),
        "entities" => (NoteAction::Entities, rest.get(1)),
        "mindmap" => (NoteAction::Mindmap, rest.get(1)),
        "keywords" => {
            let Some(list) = rest.get(2) else {
                app.push_local_log(LogLevel::Warning, usage);
                return;
            };
            let keywords: Vec<String> = list
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect();
            let color = rest.get(3).copied().unwrap_or("yellow").to_string();
            (NoteAction::Keywords { keywords, color }, rest.get(1))
        }
        _ => {
            app.push_local_log(LogLevel::Warning, usage);
            return;
        }
    };

    let Some(file) = file else {
        app.push_local_log(LogLevel::Warning, usage);
        return;
    };
    let Some(text) = read_file(app, file) else {
        return;
    };

    app.note_text = text.clone();
    app.tab = crate::app::Tab::Notes;
    send_op(app, Op::NoteAction { text, action });
}

fn read_file_arg(app: &mut App, arg: Option<&&str>, usage: &str) -> Option<String> {
    match arg {
        Some(path) => read_file(app, path),
        None => {
            app.push_local_log(LogLevel::Warning, usage);
            None
        }
    }
}

fn read_file(app: &mut App, path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) => {
            app.push_local_log(LogLevel::Error, format!("Cannot read {path}: {err}"));
            None
        }
    }
}

/// Non-blocking send. The op channel is deep enough that a full queue means
/// the core has stalled; drop the op and tell the user instead of freezing
/// the input loop.
fn send_op(app: &mut App, op: Op) {
    if app.op_tx.try_send(op).is_err() {
        app.push_local_log(LogLevel::Error, "Core is busy, command dropped");
    }
}
