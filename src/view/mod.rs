//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
mod layout;
pub mod pagination;
mod search_input;
pub mod sidebar;
pub mod styles;
pub mod table;

pub use help::{build_help_content, render_help_overlay};
pub use layout::{header_text, page_title, render_layout, status_text};
pub use search_input::SearchInput;
pub use styles::{ColorConfig, DashboardStyles};

use crate::config::KeyBindings;
use crate::model::KeyAction;
use crate::state::{search_input_handler, AppState};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

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
    key_bindings: KeyBindings,
    styles: DashboardStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, styles: DashboardStyles) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            styles,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q or Ctrl+C). Redraws on input, resize,
    /// and when the background fetch reports back.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const TICK_INTERVAL: Duration = Duration::from_millis(100);

        self.app_state.tick();
        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(..) => self.draw()?,
                    _ => {}
                }
            }

            if self.app_state.tick() {
                debug!(state = ?self.app_state.query().state().is_loading(), "Report state changed");
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Digits go to the go-to-page prompt while it is open
        if self.app_state.page_prompt.is_some() && !self.app_state.help_visible {
            match key.code {
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.app_state.push_page_digit(ch);
                }
                KeyCode::Backspace => self.app_state.pop_page_digit(),
                KeyCode::Enter => self.app_state.submit_page_prompt(),
                KeyCode::Esc => self.app_state.cancel_page_prompt(),
                _ => {}
            }
            return false;
        }

        // Text input goes to the search box while typing
        if self.app_state.search.is_typing() && !self.app_state.help_visible {
            match key.code {
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.app_state
                        .update_search(|s| search_input_handler::handle_char_input(s, ch));
                    return false;
                }
                KeyCode::Backspace => {
                    self.app_state
                        .update_search(search_input_handler::handle_backspace);
                    return false;
                }
                KeyCode::Left => {
                    self.app_state
                        .update_search(search_input_handler::handle_cursor_left);
                    return false;
                }
                KeyCode::Right => {
                    self.app_state
                        .update_search(search_input_handler::handle_cursor_right);
                    return false;
                }
                KeyCode::Enter => return self.app_state.apply_action(KeyAction::SubmitSearch),
                _ => {}
            }
        }

        match self.key_bindings.get(key) {
            Some(action) => self.app_state.apply_action(action),
            None => false,
        }
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let styles = &self.styles;
        let bindings = &self.key_bindings;
        self.terminal
            .draw(|frame| render_layout(frame, state, styles, bindings))?;
        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Construct without touching the real terminal.
    pub(crate) fn new_for_test(terminal: Terminal<B>, app_state: AppState) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            styles: DashboardStyles::with_color_config(ColorConfig::from_env_and_args(true)),
        }
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI over `app_state`.
///
/// Handles terminal setup, runs the event loop, and restores the terminal on
/// exit even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(app_state: AppState, colors: ColorConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, DashboardStyles::with_color_config(colors))?;
    let result = app.run();
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
