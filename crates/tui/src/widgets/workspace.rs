//! Output panes: agent workspace, tool results, and the notes view.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use af_protocol::note_models::{ChatRole, ChatTurn};
use af_protocol::pipeline_models::PipelineState;
use af_protocol::run_models::RunStatus;

/// Output of the selected agent, with a run summary footer when available.
pub fn render_output(frame: &mut Frame, area: Rect, state: &PipelineState, selected: usize) {
    let Some(agent) = state.agents.get(selected) else {
        let empty = Paragraph::new("No agents configured. Run `auditflow init` first.")
            .block(Block::default().borders(Borders::ALL).title("Workspace"));
        frame.render_widget(empty, area);
        return;
    };

    let run = state.history.get(&agent.id);
    let body = match run {
        Some(run) if run.status == RunStatus::Error => run
            .error
            .clone()
            .unwrap_or_else(|| "Run failed".to_string()),
        Some(run) => run.output.clone(),
        None => String::new(),
    };

    let footer = run.map(summary_line).unwrap_or_default();
    let title = format!("Workspace: {}", agent.name);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let paragraph = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, chunks[0]);

    let footer_widget = Paragraph::new(footer).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer_widget, chunks[1]);
}

fn summary_line(run: &af_protocol::run_models::AgentRunState) -> String {
    match run.status {
        RunStatus::Completed => {
            let ms = run.execution_time_ms.unwrap_or(0);
            let tokens = run.tokens_used.unwrap_or(0);
            format!("Processed in {ms}ms, ~{tokens} tokens")
        }
        RunStatus::Running => "Running...".to_string(),
        RunStatus::Error => "Failed".to_string(),
        RunStatus::Idle => String::new(),
    }
}

/// Full-pane view for a single tool result (smart replace).
pub fn render_tool_output(frame: &mut Frame, area: Rect, title: &str, output: &str) {
    let body = if output.is_empty() {
        "No result yet. Use /replace <fileA> <fileB>.".to_string()
    } else {
        output.to_string()
    };
    let paragraph = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(paragraph, area);
}

/// Notes pane: note text on the left, assistant output and chat on the right.
pub fn render_notes(
    frame: &mut Frame,
    area: Rect,
    note_text: &str,
    tool_output: &str,
    chat_history: &[ChatTurn],
) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let note_body = if note_text.is_empty() {
        "No note loaded. Use /note <action> <file>.".to_string()
    } else {
        note_text.to_string()
    };
    let note = Paragraph::new(note_body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Note"));
    frame.render_widget(note, halves[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(halves[1]);

    let assistant = Paragraph::new(tool_output.to_string())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Assistant"));
    frame.render_widget(assistant, right[0]);

    let lines: Vec<Line> = chat_history
        .iter()
        .map(|turn| {
            let (label, color) = match turn.role {
                ChatRole::User => ("you", Color::Cyan),
                ChatRole::Model => ("ai", Color::Green),
            };
            Line::from(vec![
                Span::styled(format!("{label}> "), Style::default().fg(color)),
                Span::raw(turn.text.clone()),
            ])
        })
        .collect();
    let chat = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Chat (/chat)"));
    frame.render_widget(chat, right[1]);
}
