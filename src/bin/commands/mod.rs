use std::io::{self as stdio, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use flexi_logger::{Logger, LoggerHandle};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;

use mol_sketch::Editor;
use mol_sketch::io::{Script, read_script};

pub mod check_config;
pub mod render;
pub mod replay;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Starts the stderr logger; an explicit level wins over `RUST_LOG`.
pub fn init_logging(level: Option<&str>) -> Result<LoggerHandle> {
    let logger = match level {
        Some(level) => Logger::try_with_str(level),
        None => Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL),
    }
    .context("Invalid log level specification")?;

    logger
        .log_to_stderr()
        .start()
        .context("Failed to start logger")
}

/// Loads a sketch script and replays it into a fresh editor.
pub fn replay_script(path: &Path) -> Result<(Script, Editor)> {
    let script = read_script(path)
        .with_context(|| format!("Failed to load sketch script {}", path.display()))?;
    let editor = run_with_spinner("Replaying sketch", || {
        script
            .replay()
            .with_context(|| format!("Failed to replay {}", path.display()))
    })?;
    Ok((script, editor))
}

/// Wraps long-running operations with a spinner rendered to stderr.
pub fn run_with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let result = work();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("{} ✓", message)),
        Err(_) => spinner.abandon_with_message(format!("{} ✗", message)),
    }

    result
}

pub fn print_boxed_label<W: Write>(writer: &mut W, title: &str) -> stdio::Result<()> {
    let inner = format!(" {title} ");
    let width = inner.chars().count();
    writeln!(writer, "╭{}╮", "─".repeat(width))?;
    writeln!(writer, "│{}│", inner)?;
    writeln!(writer, "╰{}╯", "─".repeat(width))?;
    Ok(())
}

/// Ensures commands do not dump markup directly into an interactive terminal.
pub fn ensure_noninteractive_stdout(command: &str, output: Option<&Path>) -> Result<()> {
    if output.is_none() && stdio::stdout().is_terminal() {
        bail!(
            "Refusing to stream {command} results to an interactive terminal. Use -o/--output or pipe the command into a file."
        );
    }
    Ok(())
}
