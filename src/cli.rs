//! CLI command definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::session::TargetModel;

/// PromptForge - turn rough ideas into engineered prompts
#[derive(Debug, Parser)]
#[command(
    name = "promptforge",
    about = "Transform simple ideas into powerful, effective prompts",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Target model the engineered prompt is optimized for
    #[arg(short, long, global = true, help = "Target model (gemini or chatgpt)")]
    pub target: Option<TargetModel>,

    /// Subcommand to execute (defaults to the interactive TUI)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Engineer a prompt non-interactively and print it to stdout
    Engineer {
        /// The rough request to engineer
        #[arg(value_name = "TEXT")]
        text: String,
    },
}
