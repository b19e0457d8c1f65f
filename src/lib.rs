//! PromptForge - turn rough ideas into engineered prompts
//!
//! A terminal assistant around a single exchange: the user types an
//! informally phrased request, picks which model the prompt should be
//! optimized for, and the completion service returns a polished, ready-to-use
//! prompt that can be copied to the clipboard.
//!
//! # Modules
//!
//! - [`session`] - request lifecycle state machine (the core)
//! - [`prompt`] - the fixed prompt-engineering instruction template
//! - [`llm`] - completion client trait and provider implementations
//! - [`clipboard`] - clipboard write support for the copy action
//! - [`tui`] - terminal UI around the session
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod llm;
pub mod prompt;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, LlmConfig, UiConfig};
pub use llm::{EngineerRequest, EngineerResponse, GeminiClient, LlmClient, LlmError, OpenAiClient, create_client};
pub use session::{CopyFeedback, Effect, Phase, RequestToken, SessionEvent, SessionState, TargetModel};
