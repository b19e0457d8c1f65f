//! TUI application - key handling
//!
//! The App owns the SessionState and translates key events into session
//! events and input edits. It does not render - that's the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::session::{Effect, SessionEvent, SessionState};

/// TUI application
#[derive(Debug, Default)]
pub struct App {
    /// Session state
    state: SessionState,
}

impl App {
    /// Create a new application around an existing session
    pub fn new(state: SessionState) -> Self {
        debug!("App::new: called");
        Self { state }
    }

    /// Get reference to state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// Handle a key event, returning effects for the runner to execute
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        debug!(?key, "App::handle_key: called");
        match (key.code, key.modifiers) {
            // === Quit ===
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                debug!("App::handle_key: quit requested");
                self.state.should_quit = true;
                Vec::new()
            }

            // === Engineer / newline ===
            (KeyCode::Enter, KeyModifiers::ALT) => {
                self.state.push_input_newline();
                Vec::new()
            }
            (KeyCode::Enter, _) => self.state.apply(SessionEvent::Submit),

            // === Copy result ===
            (KeyCode::Char('y'), KeyModifiers::CONTROL) => self.state.apply(SessionEvent::CopyRequested),

            // === Target model selector ===
            (KeyCode::Tab, _) | (KeyCode::Left, _) | (KeyCode::Right, _) => {
                let toggled = self.state.target().toggled();
                self.state.apply(SessionEvent::SelectTarget(toggled))
            }

            // === Input editing ===
            (KeyCode::Backspace, _) => {
                self.state.pop_input_char();
                Vec::new()
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.state.push_input_char(c);
                Vec::new()
            }

            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Phase, TargetModel};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_typing_edits_input() {
        let mut app = App::default();
        app.handle_key(key(KeyCode::Char('h')));
        app.handle_key(key(KeyCode::Char('i')));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state().raw_input, "h");
    }

    #[test]
    fn test_enter_submits_when_input_present() {
        let mut app = App::default();
        app.handle_key(key(KeyCode::Char('h')));
        let effects = app.handle_key(key(KeyCode::Enter));
        assert_eq!(effects.len(), 1);
        assert!(app.state().is_in_flight());
    }

    #[test]
    fn test_enter_with_empty_input_is_noop() {
        let mut app = App::default();
        let effects = app.handle_key(key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.state().phase(), Phase::Idle);
    }

    #[test]
    fn test_alt_enter_inserts_newline() {
        let mut app = App::default();
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.state().raw_input, "a\nb");
    }

    #[test]
    fn test_tab_toggles_target() {
        let mut app = App::default();
        assert_eq!(app.state().target(), TargetModel::Gemini);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.state().target(), TargetModel::ChatGpt);
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.state().target(), TargetModel::Gemini);
    }

    #[test]
    fn test_ctrl_y_without_result_is_noop() {
        let mut app = App::default();
        let effects = app.handle_key(ctrl('y'));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_esc_quits() {
        let mut app = App::default();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.state().should_quit);
    }
}
