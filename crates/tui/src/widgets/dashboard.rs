//! Run metrics computed from the current pipeline state.
//!
//! Only history rows whose agent is still in the chain are counted, so a
//! reloaded agent list does not inflate the totals.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use af_protocol::pipeline_models::PipelineState;
use af_protocol::run_models::RunStatus;

struct DashboardMetrics {
    completed: usize,
    total_agents: usize,
    total_tokens: u64,
    total_runtime_ms: u64,
    progress_pct: u16,
}

fn compute(state: &PipelineState) -> DashboardMetrics {
    let mut completed = 0usize;
    let mut total_tokens = 0u64;
    let mut total_runtime_ms = 0u64;

    for agent in &state.agents {
        let Some(run) = state.history.get(&agent.id) else {
            continue;
        };
        if run.status == RunStatus::Completed {
            completed += 1;
            total_tokens += u64::from(run.tokens_used.unwrap_or(0));
            total_runtime_ms += run.execution_time_ms.unwrap_or(0);
        }
    }

    let total_agents = state.agents.len();
    let progress_pct = if total_agents == 0 {
        0
    } else {
        ((completed * 100) / total_agents) as u16
    };

    DashboardMetrics {
        completed,
        total_agents,
        total_tokens,
        total_runtime_ms,
        progress_pct,
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &PipelineState) {
    let metrics = compute(state);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(metrics.progress_pct)
        .label(format!(
            "{}/{} agents completed",
            metrics.completed, metrics.total_agents
        ));
    frame.render_widget(gauge, chunks[0]);

    let tokens_per_step = if metrics.completed == 0 {
        0
    } else {
        metrics.total_tokens / metrics.completed as u64
    };
    let body = format!(
        "Total tokens:    ~{}\n\
         Total runtime:   {}ms\n\
         Tokens per step: ~{}",
        metrics.total_tokens, metrics.total_runtime_ms, tokens_per_step
    );
    let paragraph = Paragraph::new(body).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Session Metrics"),
    );
    frame.render_widget(paragraph, chunks[1]);
}
