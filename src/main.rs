//! PromptForge CLI entry point

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use promptforge::cli::{Cli, Command};
use promptforge::config::Config;
use promptforge::llm::{EngineerRequest, LlmClient, create_client};
use promptforge::session::TargetModel;
use promptforge::{prompt, tui};

/// Initialize tracing to a log file
///
/// Logs go to a file, never stdout - stdout belongs to the TUI (or to the
/// engineered prompt in one-shot mode). Level priority: CLI flag > config
/// file > INFO.
fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptforge")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("promptforge.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let target = cli.target.unwrap_or_default();

    debug!(command = ?cli.command, ?target, "main: dispatching");
    match cli.command {
        Some(Command::Engineer { text }) => cmd_engineer(&config, llm, target, text).await,
        None => tui::run(&config, llm, target).await,
    }
}

/// One-shot mode: engineer a single prompt and print it to stdout
async fn cmd_engineer(config: &Config, llm: Arc<dyn LlmClient>, target: TargetModel, text: String) -> Result<()> {
    debug!(?target, text_len = text.len(), "cmd_engineer: called");
    if text.trim().is_empty() {
        return Err(eyre::eyre!("Nothing to engineer: the request text is empty"));
    }

    let request = EngineerRequest {
        system_instruction: prompt::system_instruction(target),
        content: text,
        max_tokens: config.llm.max_tokens,
    };

    let response = llm
        .complete(request)
        .await
        .map_err(|e| eyre::eyre!(e.user_message()))?;

    info!(
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        "cmd_engineer: completed"
    );
    println!("{}", response.text);
    Ok(())
}
