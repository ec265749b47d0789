//! Agent chain list with per-agent run status.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use af_protocol::pipeline_models::PipelineState;
use af_protocol::run_models::RunStatus;

pub fn render(frame: &mut Frame, area: Rect, state: &PipelineState, selected: usize) {
    let items: Vec<ListItem> = state
        .agents
        .iter()
        .enumerate()
        .map(|(index, agent)| {
            let status = state
                .history
                .get(&agent.id)
                .map(|run| run.status)
                .unwrap_or_default();
            let (glyph, color) = status_glyph(status);

            let mut spans = vec![
                Span::styled(format!("{glyph} "), Style::default().fg(color)),
                Span::raw(format!("{}. {}", index + 1, agent.name)),
                Span::styled(
                    format!("  {}", agent.model),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if index == state.current_step_index {
                spans.push(Span::styled(
                    "  <- next",
                    Style::default().fg(Color::Cyan),
                ));
            }

            let mut style = Style::default();
            if index == selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Agent Chain (Up/Down to select, /run to execute)"),
    );
    frame.render_widget(list, area);
}

fn status_glyph(status: RunStatus) -> (&'static str, Color) {
    match status {
        RunStatus::Idle => ("o", Color::DarkGray),
        RunStatus::Running => ("*", Color::Yellow),
        RunStatus::Completed => ("+", Color::Green),
        RunStatus::Error => ("x", Color::Red),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_core::defaults::default_agents;
    use af_protocol::run_models::AgentRunState;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_render_shows_agent_names_and_status() {
        let mut state = PipelineState {
            agents: default_agents(),
            ..PipelineState::default()
        };
        state
            .history
            .insert("agent_layout".to_string(), AgentRunState::running());

        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &state, 0))
            .unwrap();

        let content = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(content.contains("Layout Mapper"));
        assert!(content.contains("CAR Extractor"));
        assert!(content.contains("Polisher"));
    }
}
