use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{check_config, render, replay};

#[derive(Parser, Debug)]
#[command(
    name = "molsketch",
    about = "Replays, inspects, and renders 2D molecular sketches headlessly.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Log level filter (error, warn, info, debug, trace). Falls back to RUST_LOG, then warn.
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a sketch script and report the resulting structure.
    Replay(replay::ReplayArgs),
    /// Replay a sketch script and export the final frame as SVG.
    Render(render::RenderArgs),
    /// Validate an editor configuration file.
    CheckConfig(check_config::CheckConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = commands::init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Command::Replay(args) => replay::run(&args)?,
        Command::Render(args) => render::run(&args)?,
        Command::CheckConfig(args) => check_config::run(&args)?,
    }

    Ok(())
}
