use std::fs::File;
use std::io::{self as stdio, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;

use mol_sketch::io::write_svg;
use mol_sketch::ops::Viewport;
use mol_sketch::render::{DisplayList, LoopState, RenderLoop};

use crate::commands::{ensure_noninteractive_stdout, replay_script};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Sketch script (TOML) to replay before rendering.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
    /// SVG output path. When omitted, stdout is used.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    ensure_noninteractive_stdout("render", args.output.as_deref())?;

    let (_, editor) = replay_script(&args.script)?;

    let mut frame = DisplayList::new();
    let mut render_loop = RenderLoop::start();
    if render_loop.tick(&mut frame, &editor.scene()) == LoopState::Stopped {
        bail!("Render loop stopped before painting a frame");
    }
    render_loop.stop();

    let viewport = editor.view().viewport();
    match args.output.as_deref() {
        Some(path) => write_to_file(path, &frame, &viewport),
        None => {
            let stdout = stdio::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_svg(&mut writer, &frame, &viewport).context("Failed to write SVG to stdout")?;
            writer.flush().context("Failed to flush stdout")
        }
    }
}

fn write_to_file(path: &Path, frame: &DisplayList, viewport: &Viewport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_svg(&mut writer, frame, viewport)
        .with_context(|| format!("Failed to write SVG to {}", path.display()))?;
    writer.flush().context("Failed to flush output writer")
}
