//! Session lifecycle state machine
//!
//! Pure data structures plus a reducer. No rendering, no I/O - the TUI
//! runner executes the [`Effect`]s this module emits and feeds completion
//! events back in. This keeps the whole request lifecycle testable without
//! a terminal or a network.

use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing::debug;

/// How long the "Copied!"/"Failed!" label stays visible
pub const DEFAULT_COPY_FEEDBACK_TTL: Duration = Duration::from_secs(2);

/// Fallback error text when a failure carries no usable message
pub const UNKNOWN_ERROR: &str = "an unknown error occurred";

/// Which downstream model the engineered prompt is optimized for
///
/// Purely a label substituted into the instruction template - provider
/// routing is configuration, never this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetModel {
    #[default]
    Gemini,
    ChatGpt,
}

impl TargetModel {
    /// Display name as it appears in the UI and the instruction template
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::ChatGpt => "ChatGPT",
        }
    }

    /// The other option in the two-option selector
    pub fn toggled(self) -> Self {
        debug!(?self, "TargetModel::toggled: called");
        match self {
            Self::Gemini => Self::ChatGpt,
            Self::ChatGpt => Self::Gemini,
        }
    }
}

impl FromStr for TargetModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "chatgpt" | "chat-gpt" => Ok(Self::ChatGpt),
            other => Err(format!("unknown target model '{}', expected gemini or chatgpt", other)),
        }
    }
}

/// Id issued per submit; completion events must echo it back
///
/// A completion carrying anything but the outstanding token is dropped,
/// so a duplicated or stale delivery can never corrupt the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Request lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InFlight(RequestToken),
}

/// Transient label state for the clipboard action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyFeedback {
    #[default]
    None,
    Confirmed,
    Failed,
}

impl CopyFeedback {
    /// UI label, if one should be shown
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Confirmed => Some("Copied!"),
            Self::Failed => Some("Failed!"),
        }
    }
}

/// Everything that can happen to a session
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// User triggered the engineer action
    Submit,
    /// Background completion call finished
    RequestFinished {
        token: RequestToken,
        result: Result<String, String>,
    },
    /// User picked a target model
    SelectTarget(TargetModel),
    /// User triggered the copy action
    CopyRequested,
    /// Background clipboard write finished
    CopyFinished {
        result: Result<(), String>,
        at: Instant,
    },
    /// Periodic tick; drives the copy-feedback reversion
    Tick { now: Instant },
}

/// Side effects the runner must execute on behalf of the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Launch the completion call for the outstanding token
    StartRequest {
        token: RequestToken,
        input: String,
        target: TargetModel,
    },
    /// Write the result text to the system clipboard
    WriteClipboard(String),
}

/// The single mutable session record (one per app run)
#[derive(Debug)]
pub struct SessionState {
    /// Free-form request text being edited
    pub raw_input: String,
    /// Selected target-model tag
    target: TargetModel,
    /// Engineered prompt from the last successful request
    result_text: Option<String>,
    /// Human-readable message from the last failed request
    last_error: Option<String>,
    phase: Phase,
    copy_feedback: CopyFeedback,
    /// When the copy-feedback label reverts to none
    copy_revert_at: Option<Instant>,
    copy_feedback_ttl: Duration,
    next_token: u64,
    /// Set by the key handler when the user asks to exit
    pub should_quit: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(TargetModel::default(), DEFAULT_COPY_FEEDBACK_TTL)
    }
}

impl SessionState {
    /// Create a fresh idle session
    pub fn new(target: TargetModel, copy_feedback_ttl: Duration) -> Self {
        debug!(?target, ?copy_feedback_ttl, "SessionState::new: called");
        Self {
            raw_input: String::new(),
            target,
            result_text: None,
            last_error: None,
            phase: Phase::Idle,
            copy_feedback: CopyFeedback::None,
            copy_revert_at: None,
            copy_feedback_ttl,
            next_token: 0,
            should_quit: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> TargetModel {
        self.target
    }

    pub fn result_text(&self) -> Option<&str> {
        self.result_text.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn copy_feedback(&self) -> CopyFeedback {
        self.copy_feedback
    }

    /// True while a request is outstanding; input controls are disabled
    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, Phase::InFlight(_))
    }

    /// True when the engineer trigger is enabled
    pub fn can_submit(&self) -> bool {
        !self.is_in_flight() && !self.raw_input.trim().is_empty()
    }

    /// Whether the output region is shown at all
    pub fn has_output(&self) -> bool {
        self.is_in_flight() || self.result_text.is_some() || self.last_error.is_some()
    }

    // === Input editing (no-ops while in flight, matching disabled controls) ===

    pub fn push_input_char(&mut self, c: char) {
        if !self.is_in_flight() {
            self.raw_input.push(c);
        }
    }

    pub fn push_input_newline(&mut self) {
        if !self.is_in_flight() {
            self.raw_input.push('\n');
        }
    }

    pub fn pop_input_char(&mut self) {
        if !self.is_in_flight() {
            self.raw_input.pop();
        }
    }

    /// Apply one event, returning the effects the runner must execute
    pub fn apply(&mut self, event: SessionEvent) -> Vec<Effect> {
        debug!(?event, phase = ?self.phase, "SessionState::apply: called");
        match event {
            SessionEvent::Submit => self.on_submit(),
            SessionEvent::RequestFinished { token, result } => {
                self.on_request_finished(token, result);
                Vec::new()
            }
            SessionEvent::SelectTarget(tag) => {
                // The selector is disabled while a request is in flight
                if !self.is_in_flight() {
                    debug!(?tag, "SessionState::apply: target selected");
                    self.target = tag;
                }
                Vec::new()
            }
            SessionEvent::CopyRequested => self.on_copy_requested(),
            SessionEvent::CopyFinished { result, at } => {
                self.on_copy_finished(result, at);
                Vec::new()
            }
            SessionEvent::Tick { now } => {
                if let Some(deadline) = self.copy_revert_at
                    && now >= deadline
                {
                    debug!("SessionState::apply: copy feedback reverting");
                    self.copy_feedback = CopyFeedback::None;
                    self.copy_revert_at = None;
                }
                Vec::new()
            }
        }
    }

    fn on_submit(&mut self) -> Vec<Effect> {
        if !self.can_submit() {
            debug!("SessionState::on_submit: precondition blocked, no-op");
            return Vec::new();
        }

        // Fully reset result/error state before the call starts
        self.result_text = None;
        self.last_error = None;
        self.copy_feedback = CopyFeedback::None;
        self.copy_revert_at = None;

        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.phase = Phase::InFlight(token);
        debug!(?token, "SessionState::on_submit: request started");

        vec![Effect::StartRequest {
            token,
            input: self.raw_input.clone(),
            target: self.target,
        }]
    }

    fn on_request_finished(&mut self, token: RequestToken, result: Result<String, String>) {
        match self.phase {
            Phase::InFlight(outstanding) if outstanding == token => {
                self.phase = Phase::Idle;
                match result {
                    Ok(text) => {
                        debug!(text_len = text.len(), "SessionState::on_request_finished: success");
                        self.result_text = Some(text);
                    }
                    Err(message) => {
                        debug!(%message, "SessionState::on_request_finished: failure");
                        self.last_error = Some(message);
                    }
                }
            }
            _ => {
                // Stale or duplicated delivery; the outstanding token moved on
                debug!(?token, "SessionState::on_request_finished: token mismatch, dropped");
            }
        }
    }

    fn on_copy_requested(&self) -> Vec<Effect> {
        match &self.result_text {
            Some(text) => {
                debug!(text_len = text.len(), "SessionState::on_copy_requested: copying");
                vec![Effect::WriteClipboard(text.clone())]
            }
            None => {
                debug!("SessionState::on_copy_requested: no result, no-op");
                Vec::new()
            }
        }
    }

    fn on_copy_finished(&mut self, result: Result<(), String>, at: Instant) {
        // A submit may have cleared the result while the write was pending;
        // feedback is only meaningful while a result is shown
        if self.result_text.is_none() {
            debug!("SessionState::on_copy_finished: result gone, dropped");
            return;
        }

        self.copy_feedback = match result {
            Ok(()) => CopyFeedback::Confirmed,
            Err(message) => {
                debug!(%message, "SessionState::on_copy_finished: clipboard write failed");
                CopyFeedback::Failed
            }
        };
        // Re-copy supersedes any pending reversion
        self.copy_revert_at = Some(at + self.copy_feedback_ttl);
    }
}
