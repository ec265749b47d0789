//! Session log tail.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use af_protocol::log_models::{LogEntry, LogLevel};

pub fn render(frame: &mut Frame, area: Rect, logs: &[LogEntry]) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = logs.len().saturating_sub(visible);

    let lines: Vec<Line> = logs[start..]
        .iter()
        .map(|entry| {
            let color = level_color(entry.level);
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(color)),
            ])
        })
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Logs"));
    frame.render_widget(paragraph, area);
}

fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Info => Color::Gray,
        LogLevel::Warning => Color::Yellow,
        LogLevel::Error => Color::Red,
        LogLevel::Success => Color::Green,
    }
}
