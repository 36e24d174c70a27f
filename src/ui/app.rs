//! Main TUI application state and logic

use crate::constants::{PLAY_INTERVAL_MS, SPACE_DEBOUNCE_MS};
use crate::snapshot::{Snapshot, SnapshotManager};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use super::panes::{
    render_log_pane, render_parse_pane, render_scan_pane, render_source_pane, render_status_bar,
    render_tree_pane, LogScrollState, ParseRenderData, ParseScrollState, ScanRenderData,
    SourceRenderData, StatusRenderData,
};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    ScanTable,
    ParseTable,
    Tree,
    Log,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: scan -> tree -> log -> parse)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::ScanTable => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::ParseTable,
            FocusedPane::ParseTable => FocusedPane::ScanTable,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::ScanTable => FocusedPane::ParseTable,
            FocusedPane::Tree => FocusedPane::ScanTable,
            FocusedPane::Log => FocusedPane::Tree,
            FocusedPane::ParseTable => FocusedPane::Log,
        }
    }
}

/// How the recorded session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Value(i32),
    Failed(String),
}

/// The main application state
pub struct App {
    /// The expression that was scanned and parsed
    pub input: String,

    /// Recorded snapshots, one per traced step
    pub history: SnapshotManager,

    /// Index of the snapshot on screen
    pub position: usize,

    pub outcome: Outcome,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub scan_scroll: usize,
    pub parse_scroll: ParseScrollState,
    pub tree_scroll: usize,
    pub log_scroll: LogScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app positioned at the first recorded step
    pub fn new(input: String, history: SnapshotManager, outcome: Outcome) -> Self {
        let status_message = match &outcome {
            Outcome::Value(value) => format!("Ready! Expression evaluates to {}", value),
            Outcome::Failed(_) => String::from("Ready! (session failed, see last step)"),
        };
        App {
            input,
            history,
            position: 0,
            outcome,
            focused_pane: FocusedPane::Log,
            scan_scroll: 0,
            parse_scroll: ParseScrollState {
                offset: 0,
                prev_item_count: 0,
            },
            tree_scroll: 0,
            log_scroll: LogScrollState {
                offset: 0,
                prev_item_count: 0,
            },
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Snapshot currently on screen
    pub fn current(&self) -> Option<&Snapshot> {
        self.history.get(self.position)
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.history.len()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing
                && self.last_play_time.elapsed() >= Duration::from_millis(PLAY_INTERVAL_MS)
            {
                if self.advance() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Input line on top, 4 panes in 2 columns, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[1]);

        // Left column: Scan table (top) | Parse table (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(columns[0]);

        // Right column: Tree (top) | Trace log (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(columns[1]);

        let error = match &self.outcome {
            Outcome::Failed(message) => Some(message.as_str()),
            Outcome::Value(_) => None,
        };

        if let Some(snapshot) = self.history.get(self.position) {
            render_source_pane(
                frame,
                main_chunks[0],
                SourceRenderData {
                    input: &self.input,
                    highlight: snapshot.highlight(),
                    is_error: error.is_some() && self.is_at_end(),
                },
            );

            render_scan_pane(
                frame,
                left_rows[0],
                ScanRenderData {
                    tokens: &snapshot.tokens,
                    cursor: snapshot.cursor,
                    show_cursor: snapshot.parsing,
                },
                self.focused_pane == FocusedPane::ScanTable,
                &mut self.scan_scroll,
            );

            render_parse_pane(
                frame,
                left_rows[1],
                ParseRenderData {
                    nodes: &snapshot.nodes,
                    focus: snapshot.focus(),
                    parsing: snapshot.parsing,
                },
                self.focused_pane == FocusedPane::ParseTable,
                &mut self.parse_scroll,
            );

            render_tree_pane(
                frame,
                right_rows[0],
                &snapshot.nodes,
                snapshot.focus(),
                self.focused_pane == FocusedPane::Tree,
                &mut self.tree_scroll,
            );
        }

        render_log_pane(
            frame,
            right_rows[1],
            &self.history,
            self.position,
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[2],
            StatusRenderData {
                message: &self.status_message,
                current_step: self.position,
                total_steps: self.history.len(),
                error,
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = (0..n).take_while(|_| self.advance()).count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (debounced to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(SPACE_DEBOUNCE_MS) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_millis(PLAY_INTERVAL_MS))
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                // Jump to end of the session
                self.is_playing = false;
                self.position = self.history.len().saturating_sub(1);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                // Jump to start of the session
                self.is_playing = false;
                self.position = 0;
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::ScanTable => &mut self.scan_scroll,
            FocusedPane::ParseTable => &mut self.parse_scroll.offset,
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Log => &mut self.log_scroll.offset,
        }
    }

    /// Move one step forward; `false` at the end of the history
    fn advance(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Step forward in the history
    fn step_forward(&mut self) {
        if self.advance() {
            self.status_message = match self.current() {
                Some(snapshot) => snapshot.label(),
                None => "Stepped forward".to_string(),
            };
        } else {
            self.status_message = "Cannot step forward: already at the last step".to_string();
        }
    }

    /// Step backward in the history
    fn step_backward(&mut self) {
        if self.position == 0 {
            self.status_message = "Cannot step backward: already at the first step".to_string();
            return;
        }
        self.position -= 1;
        self.status_message = match self.current() {
            Some(snapshot) => snapshot.label(),
            None => "Stepped backward".to_string(),
        };
    }
}
