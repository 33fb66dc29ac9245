use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use mol_sketch::Editor;
use mol_sketch::ops::geometry::valence_sum;

use crate::commands::{print_boxed_label, replay_script};

/// Report-only command that replays a sketch and summarizes the result.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Sketch script (TOML) to replay.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let (script, editor) = replay_script(&args.script)?;
    print_report(&editor, script.steps.len())
}

fn print_report(editor: &Editor, steps: usize) -> Result<()> {
    let mut stderr = io::stderr().lock();
    let molecule = editor.molecule();

    print_boxed_label(&mut stderr, "MolSketch Replay Report")?;
    writeln!(&mut stderr)?;

    print_boxed_label(&mut stderr, "Atoms")?;
    let mut atom_table = Table::new();
    atom_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    atom_table.set_titles(row!["Atom", "Element", "X", "Y", "Bond Order Sum", "Max Valence"]);
    for atom in molecule.atoms() {
        atom_table.add_row(row![
            atom.id,
            atom.element,
            format!("{:.2}", atom.pos.x),
            format!("{:.2}", atom.pos.y),
            valence_sum(atom.id, molecule.bonds()),
            atom.element.max_valence()
        ]);
    }
    atom_table
        .print(&mut stderr)
        .context("Failed to render atom table")?;
    writeln!(&mut stderr)?;

    print_boxed_label(&mut stderr, "Bonds")?;
    let mut bond_table = Table::new();
    bond_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    bond_table.set_titles(row!["Bond", "From", "To", "Order"]);
    for bond in molecule.bonds() {
        bond_table.add_row(row![bond.id, bond.a1, bond.a2, bond.order]);
    }
    bond_table
        .print(&mut stderr)
        .context("Failed to render bond table")?;
    writeln!(&mut stderr)?;

    print_boxed_label(&mut stderr, "Session Summary")?;
    let view = editor.view();
    let mut summary_table = Table::new();
    summary_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    summary_table.set_titles(row!["Metric", "Value"]);
    summary_table.add_row(row!["Steps Replayed", steps]);
    summary_table.add_row(row!["Molecule Name", editor.molecule_name().unwrap_or("Unidentified")]);
    summary_table.add_row(row!["Atoms", molecule.atom_count()]);
    summary_table.add_row(row!["Bonds", molecule.bond_count()]);
    summary_table.add_row(row!["Undo Depth", editor.document().history_len()]);
    summary_table.add_row(row![
        "View",
        format!(
            "scale = {:.2}, rotation = {:.1}°",
            view.scale(),
            view.rotation_deg()
        )
    ]);
    summary_table
        .print(&mut stderr)
        .context("Failed to render session summary")?;
    writeln!(&mut stderr)?;

    print_boxed_label(&mut stderr, "Valence Warnings")?;
    if editor.warnings().is_empty() {
        writeln!(&mut stderr, "None")?;
    } else {
        for warning in editor.warnings() {
            writeln!(&mut stderr, "⚠ {}", warning)?;
        }
    }

    Ok(())
}
