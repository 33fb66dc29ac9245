use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use mol_sketch::EditorConfig;
use mol_sketch::io::load_config;

use crate::commands::print_boxed_label;

#[derive(Debug, Args)]
pub struct CheckConfigArgs {
    /// Editor configuration file (TOML).
    #[arg(value_name = "FILE")]
    pub config: PathBuf,
}

pub fn run(args: &CheckConfigArgs) -> Result<()> {
    let config = load_config(&args.config)
        .with_context(|| format!("Configuration {} is invalid", args.config.display()))?;
    print_config(&config)
}

fn print_config(config: &EditorConfig) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "Effective Editor Configuration")?;
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Setting", "Value"]);
    table.add_row(row!["Atom Radius", config.atom_radius]);
    table.add_row(row!["Hit Radius", format!("{:.2}", config.hit_radius())]);
    table.add_row(row!["Bond Hit Tolerance", config.bond_hit_tolerance]);
    table.add_row(row!["Default Bond Length", config.default_bond_length]);
    table.add_row(row!["Min Drag Distance", config.min_drag_distance]);
    table.add_row(row![
        "Zoom Range",
        format!("{} – {}", config.min_scale, config.max_scale)
    ]);
    table.add_row(row!["History Depth", config.history_depth]);
    table.add_row(row!["Grid Step", config.grid_step]);
    table.add_row(row!["Stars", config.star_count]);
    table.add_row(row![
        "Star Seed",
        config
            .star_seed
            .map(|seed| seed.to_string())
            .unwrap_or_else(|| "entropy".to_string())
    ]);
    table.add_row(row![
        "Layout Target",
        format!(
            "center = ({}, {}), size = {}",
            config.layout_center[0], config.layout_center[1], config.layout_size
        )
    ]);
    table
        .print(&mut stderr)
        .context("Failed to render configuration table")?;
    writeln!(&mut stderr, "Configuration is valid.")?;

    Ok(())
}
