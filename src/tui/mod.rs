//! Terminal User Interface
//!
//! A single view: target selector, multi-line idea input, output panel for
//! the engineered prompt, and a footer with keybinds. State lives in
//! [`crate::session`]; this module only renders it and feeds events in.

mod app;
mod events;
mod runner;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use runner::Runner;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::clipboard::SharedClipboard;
use crate::config::Config;
use crate::llm::LlmClient;
use crate::session::{SessionState, TargetModel};

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the interactive session
pub async fn run(config: &Config, llm: Arc<dyn LlmClient>, target: TargetModel) -> Result<()> {
    let terminal = init()?;

    // Guard so the terminal is restored even on early return/error
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = restore();
        }
    }
    let _guard = TerminalGuard;

    let session = SessionState::new(target, Duration::from_millis(config.ui.copy_feedback_ms));
    let event_handler = EventHandler::new(Duration::from_millis(config.ui.tick_rate_ms));
    let clipboard = SharedClipboard::system();
    let mut runner = Runner::new(terminal, event_handler, session, llm, config.llm.max_tokens, clipboard);
    runner.run().await
}
