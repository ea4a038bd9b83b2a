//! Main TUI application state and logic

use crate::canvas::{Scene, SceneState};
use crate::console::Console;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Stage,
    Timeline,
    Console,
}

impl FocusedPane {
    /// Move focus to the next pane (stage -> timeline -> console)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Stage => FocusedPane::Timeline,
            FocusedPane::Timeline => FocusedPane::Console,
            FocusedPane::Console => FocusedPane::Stage,
        }
    }
}

/// The previewer state: a recorded scene and how far it has been played
pub struct App {
    /// Demo being previewed
    pub title: String,

    pub scene: Scene,

    /// Console lines of the trace
    pub console: Console,

    /// Clicks played so far
    pub click: usize,

    /// Replayed shapes at `click`
    pub state: SceneState,

    /// Click index of every timeline step
    pub step_clicks: Vec<usize>,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub timeline_scroll: usize,
    pub console_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a click was played in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(title: &str, scene: Scene, console: Console) -> Self {
        let state = scene.state_at(0);
        let step_clicks = scene.click_indices();
        App {
            title: title.to_string(),
            scene,
            console,
            click: 0,
            state,
            step_clicks,
            focused_pane: FocusedPane::Stage,
            timeline_scroll: 0,
            console_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    pub fn total_clicks(&self) -> usize {
        self.scene.clicks()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_secs(1) {
                if self.click < self.total_clicks() {
                    self.go_to(self.click + 1);
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Poll with a timeout so auto-play keeps ticking
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

    /// Replay the scene up to `click`
    pub fn go_to(&mut self, click: usize) {
        self.click = click.min(self.total_clicks());
        self.state = self.scene.state_at(self.click);
        // Keep the current click's steps and the latest output in view
        self.timeline_scroll = self
            .step_clicks
            .iter()
            .position(|&c| c == self.click)
            .unwrap_or(0);
        self.console_scroll = usize::MAX;
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Stage on the left, timeline and console stacked on the right
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        super::panes::render_stage_pane(
            frame,
            columns[0],
            &self.title,
            &self.state,
            self.focused_pane == FocusedPane::Stage,
        );

        super::panes::render_timeline_pane(
            frame,
            right_rows[0],
            self.scene.steps(),
            &self.step_clicks,
            self.click,
            self.focused_pane == FocusedPane::Timeline,
            &mut self.timeline_scroll,
        );

        super::panes::render_console_pane(
            frame,
            right_rows[1],
            &self.console,
            &self.state,
            self.focused_pane == FocusedPane::Console,
            &mut self.console_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.click,
            self.total_clicks(),
            self.is_playing,
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                if self.click == 0 {
                    self.status_message = "Already at the first click".to_string();
                } else {
                    self.go_to(self.click - 1);
                    self.status_message = "Stepped backward".to_string();
                }
            }
            KeyCode::Right => {
                self.is_playing = false;
                if self.click >= self.total_clicks() {
                    self.status_message = "No more clicks".to_string();
                } else {
                    self.go_to(self.click + 1);
                    self.status_message = "Stepped forward".to_string();
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Timeline => {
                    self.timeline_scroll = self.timeline_scroll.saturating_sub(1);
                }
                FocusedPane::Console => {
                    self.console_scroll = self.console_scroll.saturating_sub(1);
                }
                FocusedPane::Stage => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Timeline => {
                    self.timeline_scroll = self.timeline_scroll.saturating_add(1);
                }
                FocusedPane::Console => {
                    self.console_scroll = self.console_scroll.saturating_add(1);
                }
                FocusedPane::Stage => {}
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play (200ms debounce against key repeat)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_secs(1))
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.go_to(self.total_clicks());
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.go_to(0);
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }
}
