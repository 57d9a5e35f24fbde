//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod display;
mod explanation;
mod help;
mod history;
pub mod keypad;
mod layout;
mod styles;

pub use display::fit_tail;
pub use layout::{calculate_layout, render_layout, tab_at, AppLayout};
pub use styles::{ColorConfig, Palette};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::explain::ExplanationWorker;
use crate::model::KeyAction;
use crate::state::{AppState, Effect};
use constants::TICK_INTERVAL;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Position, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    worker: ExplanationWorker,
    key_bindings: KeyBindings,
    colors: ColorConfig,
    /// Spinner animation frame, advanced every tick while loading.
    tick: usize,
    /// Last rendered layout (for mouse click detection)
    last_layout: Option<AppLayout>,
    /// First visible history entry in the last frame.
    last_history_offset: usize,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        app_state: AppState,
        worker: ExplanationWorker,
        colors: ColorConfig,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, app_state, worker, colors))
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build an app around an existing terminal (e.g. `TestBackend`).
    pub fn with_terminal(
        terminal: Terminal<B>,
        app_state: AppState,
        worker: ExplanationWorker,
        colors: ColorConfig,
    ) -> Self {
        Self {
            terminal,
            app_state,
            worker,
            key_bindings: KeyBindings::default(),
            colors,
            tick: 0,
            last_layout: None,
            last_history_offset: 0,
        }
    }

    /// Current view-model.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Underlying terminal, e.g. to inspect a `TestBackend` buffer.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Input is handled as it arrives;
    /// explanation replies are drained after every event and on every tick.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                if self.handle_event(event::read()?) {
                    info!("Quit requested");
                    return Ok(());
                }
                self.draw()?;
            } else if self.on_tick() {
                self.draw()?;
            }
        }
    }

    /// Route one terminal event, then apply any explanation replies that
    /// arrived meanwhile. Returns true when the app should quit.
    pub fn handle_event(&mut self, event: Event) -> bool {
        let quit = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                false
            }
            _ => false,
        };
        self.drain_explanations();
        quit
    }

    /// Drain finished explanation requests and advance the spinner.
    ///
    /// Returns true if anything visible changed.
    pub fn on_tick(&mut self) -> bool {
        let mut changed = self.drain_explanations();
        if self.app_state.explanation().is_loading() {
            self.tick = self.tick.wrapping_add(1);
            changed = true;
        }
        changed
    }

    /// Apply finished explanation replies. Returns true if one was applied.
    fn drain_explanations(&mut self) -> bool {
        let mut applied = false;
        for reply in self.worker.poll() {
            if self.app_state.complete_explanation(reply.id, reply.text) {
                applied = true;
            } else {
                debug!(request_id = reply.id.value(), "Discarding stale explanation");
            }
        }
        applied
    }

    /// Handle a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ignore release/repeat reports from terminals with enhanced keyboard mode.
        if key.kind != KeyEventKind::Press {
            return false;
        }

        // While help is open, Esc closes it instead of clearing the display.
        if self.app_state.help_visible && key.code == KeyCode::Esc {
            return self.apply(KeyAction::Help);
        }

        match self.key_bindings.get(key) {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    /// Handle a mouse event. Returns true when the app should quit.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        match self.action_at(mouse.column, mouse.row) {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    /// Action for a left click at the given cell, based on the last layout.
    fn action_at(&self, column: u16, row: u16) -> Option<KeyAction> {
        let layout = self.last_layout?;
        let position = Position::new(column, row);

        if self.app_state.help_visible {
            return Some(KeyAction::Help);
        }

        if layout.tabs.contains(position) {
            return tab_at(layout.tabs, column).map(KeyAction::SelectMode);
        }

        if let Some(history_area) = layout.history {
            if history_area.contains(position) {
                let len = self.app_state.history().len();
                return history::entry_at(history_area, row, len, self.last_history_offset)
                    .map(KeyAction::SelectHistoryAt);
            }
        }

        if self.app_state.mode.shows_keypad() && layout.body.contains(position) {
            return keypad::hit_test(layout.body, column, row).map(|button| button.action);
        }

        None
    }

    /// Dispatch `action` and carry out its effect. Returns true on quit.
    fn apply(&mut self, action: KeyAction) -> bool {
        match self.app_state.dispatch(action) {
            Effect::None => false,
            Effect::Explain(request) => {
                info!(
                    request_id = request.id.value(),
                    query = %request.query,
                    "Requesting explanation"
                );
                self.worker.submit(request);
                false
            }
            Effect::Quit => true,
        }
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = ratatui::layout::Rect::new(0, 0, size.width, size.height);
        self.last_layout = Some(calculate_layout(frame_area));

        let state = &self.app_state;
        let colors = self.colors;
        let tick = self.tick;
        let mut history_offset = 0;
        self.terminal.draw(|frame| {
            history_offset = render_layout(frame, state, colors, tick);
        })?;
        self.last_history_offset = history_offset;

        Ok(())
    }
}

/// Initialize and run the TUI application
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(
    config: &ResolvedConfig,
    worker: ExplanationWorker,
    colors: ColorConfig,
) -> Result<(), TuiError> {
    let mut app_state = AppState::new();
    app_state.mode = config.mode;
    app_state.theme = config.theme;

    let result = TuiApp::new(app_state, worker, colors).and_then(|mut app| app.run());

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
