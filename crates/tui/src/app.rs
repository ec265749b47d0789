//! TUI application state and event loop.
//!
//! This module defines the main `App` struct that manages the TUI state
//! and the event loop using `tokio::select!`.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_stream::StreamExt;

use af_protocol::ipc::{Event, Op};
use af_protocol::log_models::{LogEntry, LogLevel};
use af_protocol::note_models::ChatTurn;
use af_protocol::pipeline_models::PipelineState;

use crate::event_handler;
use crate::tui::{Tui, TuiEvent};
use crate::widgets;

/// Which pane has the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Pipeline,
    Replace,
    Notes,
    Dashboard,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Pipeline, Tab::Replace, Tab::Notes, Tab::Dashboard];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Pipeline => "Pipeline",
            Tab::Replace => "Smart Replace",
            Tab::Notes => "Notes",
            Tab::Dashboard => "Dashboard",
        }
    }

    pub fn next(self) -> Tab {
        let index = Tab::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Tab::ALL[(index + 1) % Tab::ALL.len()]
    }
}

/// Main TUI application state.
///
/// Renders exclusively from the latest `StateSnapshot`; the core owns the
/// authoritative state.
pub struct App {
    /// Latest pipeline state snapshot from the core.
    pub state: PipelineState,
    /// Session log tail (core entries plus local command feedback).
    pub logs: Vec<LogEntry>,
    /// Index of the currently selected agent in the chain.
    pub selected_index: usize,
    /// Active tab.
    pub tab: Tab,
    /// Current command input from the user.
    pub command_input: String,
    /// Agent id with a run in flight, if any. Blocks re-triggering.
    pub running_agent: Option<String>,
    /// Latest smart-replace or note-assistant output.
    pub tool_output: String,
    /// Note text the note assistant and chat operate on.
    pub note_text: String,
    /// Chat transcript for the Notes tab.
    pub chat_history: Vec<ChatTurn>,
    /// Channel to send operations to the core.
    pub op_tx: Sender<Op>,
    /// Channel to receive events from the core.
    pub event_rx: Receiver<Event>,
    /// Flag to indicate if the application should exit.
    pub should_exit: bool,
}

impl App {
    /// Create a new App with communication channels.
    pub fn new(op_tx: Sender<Op>, event_rx: Receiver<Event>) -> Self {
        Self {
            state: PipelineState::default(),
            logs: Vec::new(),
            selected_index: 0,
            tab: Tab::Pipeline,
            command_input: String::new(),
            running_agent: None,
            tool_output: String::new(),
            note_text: String::new(),
            chat_history: Vec::new(),
            op_tx,
            event_rx,
            should_exit: false,
        }
    }

    /// Main event loop.
    ///
    /// Uses `tokio::select!` to handle keyboard input and core events
    /// concurrently.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();

        tui.frame_requester().schedule_frame();

        while !self.should_exit {
            select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_core_event(event);
                    tui.frame_requester().schedule_frame();
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui, tui_event)?;
                }
            }
        }

        Ok(())
    }

    /// Handle events from the core (af-core).
    pub fn handle_core_event(&mut self, event: Event) {
        event_handler::handle_core_event(self, event);
    }

    /// Handle TUI events (keyboard input, paste, draw).
    fn handle_tui_event(&mut self, tui: &mut Tui, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => {
                self.handle_key_event(key_event);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Paste(pasted) => {
                self.command_input.push_str(&pasted);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Draw => {
                tui.draw(|frame| {
                    self.render(frame);
                })?;
            }
        }
        Ok(())
    }

    /// Handle keyboard events.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        event_handler::handle_keyboard_event(self, key_event);
    }

    /// Records a locally generated log row (command feedback).
    pub fn push_local_log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.logs.push(LogEntry::new(level, message));
    }

    /// Render the TUI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Tab bar
                Constraint::Min(8),     // Main pane
                Constraint::Length(8),  // Log tail
                Constraint::Length(3),  // Command input
            ])
            .split(area);

        self.render_tabs(frame, chunks[0]);
        self.render_main(frame, chunks[1]);
        widgets::logs::render(frame, chunks[2], &self.logs);
        self.render_command_input(frame, chunks[3]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
        let selected = Tab::ALL.iter().position(|t| *t == self.tab).unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .highlight_style(Style::default().fg(Color::Cyan));
        frame.render_widget(tabs, area);
    }

    fn render_main(&self, frame: &mut Frame, area: Rect) {
        match self.tab {
            Tab::Pipeline => {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .split(area);
                widgets::sequence::render(frame, halves[0], &self.state, self.selected_index);
                widgets::workspace::render_output(
                    frame,
                    halves[1],
                    &self.state,
                    self.selected_index,
                );
            }
            Tab::Replace => widgets::workspace::render_tool_output(
                frame,
                area,
                "Smart Replace",
                &self.tool_output,
            ),
            Tab::Notes => widgets::workspace::render_notes(
                frame,
                area,
                &self.note_text,
                &self.tool_output,
                &self.chat_history,
            ),
            Tab::Dashboard => widgets::dashboard::render(frame, area, &self.state),
        }
    }

    /// Render the command input area.
    fn render_command_input(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Command (Esc to quit, Tab to switch panes, /help)");

        let text = format!("> {}", self.command_input);
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_protocol::run_models::AgentRunState;
    use crossterm::event::KeyCode;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::sync::mpsc::channel;

    fn test_app() -> App {
        let (op_tx, _op_rx) = channel(8);
        let (_event_tx, event_rx) = channel(8);
        App::new(op_tx, event_rx)
    }

    #[tokio::test]
    async fn test_app_renders_empty_screen() {
        let app = test_app();

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                app.render(frame);
            })
            .unwrap();

        let content = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(content.contains("Pipeline"));
        assert!(content.contains("Logs"));
        assert!(content.contains("Command"));
    }

    #[tokio::test]
    async fn test_app_quit_on_esc() {
        let mut app = test_app();

        assert!(!app.should_exit);
        app.handle_key_event(KeyEvent::from(KeyCode::Esc));
        assert!(app.should_exit);
    }

    #[tokio::test]
    async fn test_tab_key_cycles_panes() {
        let mut app = test_app();

        assert_eq!(app.tab, Tab::Pipeline);
        app.handle_key_event(KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Replace);
        app.handle_key_event(KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Notes);
        app.handle_key_event(KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Dashboard);
        app.handle_key_event(KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Pipeline);
    }

    #[tokio::test]
    async fn test_snapshot_event_replaces_state() {
        let mut app = test_app();

        let mut state = PipelineState::default();
        state.template = "# T".to_string();
        state
            .history
            .insert("a".to_string(), AgentRunState::running());

        app.handle_core_event(Event::StateSnapshot {
            state: state.clone(),
        });
        assert_eq!(app.state, state);
    }

    #[tokio::test]
    async fn test_agent_selection_follows_arrow_keys() {
        let mut app = test_app();

        let mut state = PipelineState::default();
        state.agents = (0..3)
            .map(|i| serde_json::from_str(&format!(r#"{{"id":"a{i}"}}"#)).unwrap())
            .collect();
        app.handle_core_event(Event::StateSnapshot { state });

        assert_eq!(app.selected_index, 0);
        app.handle_key_event(KeyEvent::from(KeyCode::Down));
        assert_eq!(app.selected_index, 1);
        app.handle_key_event(KeyEvent::from(KeyCode::Down));
        assert_eq!(app.selected_index, 2);
        // Clamped at the end of the chain
        app.handle_key_event(KeyEvent::from(KeyCode::Down));
        assert_eq!(app.selected_index, 2);
        app.handle_key_event(KeyEvent::from(KeyCode::Up));
        assert_eq!(app.selected_index, 1);
    }
}
