//! TUI Runner - main loop that owns the terminal and executes effects
//!
//! The Runner is responsible for:
//! - Dispatching key events to App for handling
//! - Executing the effects the session reducer emits (spawning the
//!   completion call, writing the clipboard on a blocking task)
//! - Delivering completion results back into the reducer as events
//! - Rendering on every loop iteration

use std::sync::Arc;
use std::time::Instant;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;
use crate::clipboard::SharedClipboard;
use crate::llm::{EngineerRequest, LlmClient};
use crate::prompt;
use crate::session::{Effect, RequestToken, SessionEvent, SessionState, TargetModel};

/// Completion result from the background LLM task
#[derive(Debug)]
struct RequestOutcome {
    token: RequestToken,
    result: Result<String, String>,
}

/// TUI Runner that manages the terminal and event loop
pub struct Runner {
    /// Application state and key handling
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// LLM client for engineer requests
    llm: Arc<dyn LlmClient>,
    /// Max tokens for LLM requests (from config)
    max_tokens: u32,
    /// Clipboard shared with the blocking copy tasks; one handle for the
    /// whole run so the selection survives past each write
    clipboard: SharedClipboard,
    /// Receiver for the outstanding request's result
    request_rx: Option<mpsc::Receiver<RequestOutcome>>,
    /// Receiver for pending clipboard write results
    copy_rx: Option<mpsc::Receiver<Result<(), String>>>,
}

impl Runner {
    /// Create a new Runner
    pub fn new(
        terminal: Tui,
        event_handler: EventHandler,
        session: SessionState,
        llm: Arc<dyn LlmClient>,
        max_tokens: u32,
        clipboard: SharedClipboard,
    ) -> Self {
        debug!(max_tokens, "Runner::new: called");
        Self {
            app: App::new(session),
            terminal,
            event_handler,
            llm,
            max_tokens,
            clipboard,
            request_rx: None,
            copy_rx: None,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("Runner::run: entering main loop");
        loop {
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            match self.event_handler.next().await? {
                Event::Tick => self.handle_tick(),
                Event::Key(key) => {
                    let effects = self.app.handle_key(key);
                    self.run_effects(effects);
                }
                Event::Resize(_, _) => {}
            }

            if self.app.state().should_quit {
                debug!("Runner::run: should_quit is true, exiting");
                break;
            }
        }
        Ok(())
    }

    /// Handle tick event - deliver finished background work and advance timers
    fn handle_tick(&mut self) {
        let effects = self.app.state_mut().apply(SessionEvent::Tick { now: Instant::now() });
        debug_assert!(effects.is_empty());

        self.process_request_results();
        self.process_copy_results();
    }

    /// Deliver completion results from the background LLM task
    fn process_request_results(&mut self) {
        let Some(rx) = &mut self.request_rx else { return };

        let mut outcomes = Vec::new();
        while let Ok(outcome) = rx.try_recv() {
            outcomes.push(outcome);
        }

        for outcome in outcomes {
            info!(token = ?outcome.token, ok = outcome.result.is_ok(), "Runner: request finished");
            self.request_rx = None;
            let effects = self.app.state_mut().apply(SessionEvent::RequestFinished {
                token: outcome.token,
                result: outcome.result,
            });
            self.run_effects(effects);
        }
    }

    /// Deliver clipboard write results
    fn process_copy_results(&mut self) {
        let Some(rx) = &mut self.copy_rx else { return };

        let mut results = Vec::new();
        while let Ok(result) = rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.copy_rx = None;
            let effects = self.app.state_mut().apply(SessionEvent::CopyFinished {
                result,
                at: Instant::now(),
            });
            self.run_effects(effects);
        }
    }

    /// Execute effects emitted by the reducer
    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            debug!(?effect, "Runner::run_effects: executing");
            match effect {
                Effect::StartRequest { token, input, target } => self.start_request(token, input, target),
                Effect::WriteClipboard(text) => self.start_copy(text),
            }
        }
    }

    /// Spawn the completion call for one engineer request
    fn start_request(&mut self, token: RequestToken, input: String, target: TargetModel) {
        info!(?token, ?target, input_len = input.len(), "Runner: starting engineer request");
        let request = EngineerRequest {
            system_instruction: prompt::system_instruction(target),
            content: input,
            max_tokens: self.max_tokens,
        };

        let llm = Arc::clone(&self.llm);
        let (tx, rx) = mpsc::channel(1);
        self.request_rx = Some(rx);

        tokio::spawn(async move {
            let result = llm
                .complete(request)
                .await
                .map(|response| response.text)
                .map_err(|e| {
                    warn!(error = %e, "engineer request failed");
                    e.user_message()
                });
            let _ = tx.send(RequestOutcome { token, result }).await;
        });
    }

    /// Spawn the clipboard write on a blocking task
    fn start_copy(&mut self, text: String) {
        debug!(text_len = text.len(), "Runner: starting clipboard write");
        let (tx, rx) = mpsc::channel(1);
        self.copy_rx = Some(rx);

        let clipboard = self.clipboard.clone();
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || clipboard.set_text(text))
                .await
                .map_err(|e| e.to_string())
                .and_then(|r| r.map_err(|e| e.to_string()));
            let _ = tx.send(result).await;
        });
    }
}
