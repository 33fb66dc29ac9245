//! Application state owning the molecule, its undo history, and derived data.
//!
//! `Document` is the consumer side of the [`CanvasHost`] contract. Every structural mutation
//! clears the cached molecule name and recomputes the valence warnings, so both always
//! describe the structure currently held.

use super::canvas::CanvasHost;
use super::config::EditorConfig;
use crate::model::atom::Atom;
use crate::model::history::History;
use crate::model::molecule::{BondEdit, IndexedBond, Molecule, PlacedAtom, Snapshot};
use crate::model::types::{AtomId, BondId, BondOrder, Element, Point};
use crate::ops::{LayoutTarget, check_valence, fit_to_target};
use log::{info, warn};

/// Structure produced by an external generator, in the generator's own coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedMolecule {
    pub name: Option<String>,
    pub atoms: Vec<PlacedAtom>,
    pub bonds: Vec<IndexedBond>,
}

/// Result of installing a generated batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceReport {
    pub atoms: Vec<AtomId>,
    pub skipped_bonds: usize,
}

#[derive(Debug, Clone)]
pub struct Document {
    molecule: Molecule,
    history: History,
    /// Snapshot requested by the canvas, recorded once the next mutation succeeds.
    pending: Option<Snapshot>,
    name: Option<String>,
    warnings: Vec<String>,
    layout: LayoutTarget,
}

impl Document {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            molecule: Molecule::new(),
            history: History::with_capacity(config.history_depth),
            pending: None,
            name: None,
            warnings: Vec::new(),
            layout: config.layout_target(),
        }
    }

    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    /// Valence warnings for the current structure.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn molecule_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Caches the identified name of the current structure.
    pub fn set_molecule_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Restores the most recent snapshot.
    ///
    /// Returns `false` and leaves the structure untouched when the history is empty.
    pub fn undo(&mut self) -> bool {
        self.pending = None;
        let Some(snapshot) = self.history.pop() else {
            return false;
        };

        self.molecule.restore(snapshot);
        self.structure_changed();
        info!(
            "undo restored {} ({} snapshot(s) left)",
            self.molecule,
            self.history.len()
        );
        true
    }

    /// Removes every atom and bond after recording a snapshot.
    pub fn clear(&mut self) {
        self.pending = None;
        self.history.push(self.molecule.snapshot());
        self.molecule.clear();
        self.structure_changed();
        info!("cleared the canvas");
    }

    /// Installs a generated structure as one atomic replacement.
    ///
    /// Coordinates are fitted to the layout target first. The generated name, when present,
    /// becomes the cached molecule name.
    pub fn replace_with(&mut self, generated: GeneratedMolecule) -> ReplaceReport {
        let GeneratedMolecule {
            name,
            mut atoms,
            bonds,
        } = generated;
        fit_to_target(&mut atoms, &self.layout);

        self.pending = None;
        self.history.push(self.molecule.snapshot());
        let (ids, skipped_bonds) = self.molecule.replace(&atoms, &bonds);
        self.structure_changed();
        self.name = name;

        if skipped_bonds > 0 {
            warn!("{} generated bond(s) referenced missing atoms", skipped_bonds);
        }
        info!(
            "installed generated structure {} as {}",
            self.name.as_deref().unwrap_or("<unnamed>"),
            self.molecule
        );

        ReplaceReport {
            atoms: ids,
            skipped_bonds,
        }
    }

    fn commit(&mut self) {
        if let Some(snapshot) = self.pending.take() {
            self.history.push(snapshot);
        }
        self.structure_changed();
    }

    fn structure_changed(&mut self) {
        self.name = None;
        self.warnings = check_valence(&self.molecule);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl CanvasHost for Document {
    fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    fn request_snapshot(&mut self) {
        self.pending = Some(self.molecule.snapshot());
    }

    fn add_atom(&mut self, pos: Point, element: Element) -> Atom {
        let atom = self.molecule.add_atom(element, pos);
        self.commit();
        atom
    }

    fn add_or_update_bond(&mut self, a: AtomId, b: AtomId, order: BondOrder) -> Option<BondEdit> {
        match self.molecule.add_or_update_bond(a, b, order) {
            Ok(edit) => {
                self.commit();
                Some(edit)
            }
            Err(err) => {
                self.pending = None;
                warn!("rejected bond request: {}", err);
                None
            }
        }
    }

    fn delete_atom(&mut self, id: AtomId) -> bool {
        let removed = self.molecule.remove_atom(id).is_some();
        if removed {
            self.commit();
        } else {
            self.pending = None;
        }
        removed
    }

    fn delete_bond(&mut self, id: BondId) -> bool {
        let removed = self.molecule.remove_bond(id).is_some();
        if removed {
            self.commit();
        } else {
            self.pending = None;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::canvas::{Canvas, Gesture};
    use crate::editor::tools::{ToolMode, ToolSettings};
    use crate::ops::ViewTransform;

    fn mutate(document: &mut Document, element: Element, x: f64) -> AtomId {
        document.request_snapshot();
        document.add_atom(Point::new(x, 0.0), element).id
    }

    #[test]
    fn mutations_invalidate_cached_name() {
        let mut document = Document::default();
        document.set_molecule_name("Methane");

        mutate(&mut document, Element::C, 0.0);

        assert_eq!(document.molecule_name(), None);
    }

    #[test]
    fn warnings_follow_every_mutation() {
        let mut document = Document::default();
        let c = mutate(&mut document, Element::C, 0.0);
        let o = mutate(&mut document, Element::O, 35.0);
        let n = mutate(&mut document, Element::N, -35.0);

        document.request_snapshot();
        document.add_or_update_bond(c, o, BondOrder::Double);
        assert!(document.warnings().is_empty());

        document.request_snapshot();
        document.add_or_update_bond(c, n, BondOrder::Triple);
        assert_eq!(document.warnings().len(), 1);
        assert!(document.warnings()[0].starts_with("Atom C ("));

        document.request_snapshot();
        document.delete_atom(n);
        assert!(document.warnings().is_empty());
    }

    #[test]
    fn undo_restores_previous_structure_and_reports_empty_history() {
        let mut document = Document::default();
        let a = mutate(&mut document, Element::C, 0.0);
        mutate(&mut document, Element::C, 35.0);

        assert!(document.undo());
        assert_eq!(document.molecule().atom_count(), 1);
        assert!(document.molecule().atom(a).is_some());

        assert!(document.undo());
        assert!(document.molecule().is_empty());

        assert!(!document.undo());
        assert!(document.molecule().is_empty());
    }

    #[test]
    fn history_keeps_only_the_most_recent_twenty_states() {
        let mut document = Document::default();
        for i in 0..25 {
            mutate(&mut document, Element::C, i as f64 * 40.0);
        }
        assert_eq!(document.history_len(), 20);

        let mut undone = 0;
        while document.undo() {
            undone += 1;
        }

        assert_eq!(undone, 20);
        assert_eq!(document.molecule().atom_count(), 5);
    }

    #[test]
    fn clear_is_undoable() {
        let mut document = Document::default();
        mutate(&mut document, Element::C, 0.0);
        mutate(&mut document, Element::H, 35.0);

        document.clear();
        assert!(document.molecule().is_empty());

        assert!(document.undo());
        assert_eq!(document.molecule().atom_count(), 2);
    }

    #[test]
    fn replace_with_normalizes_layout_and_keeps_name() {
        let mut document = Document::default();
        mutate(&mut document, Element::C, 0.0);

        let report = document.replace_with(GeneratedMolecule {
            name: Some("Water".to_string()),
            atoms: vec![
                PlacedAtom {
                    element: Element::O,
                    pos: Point::new(0.0, 0.0),
                },
                PlacedAtom {
                    element: Element::H,
                    pos: Point::new(-1.0, 1.0),
                },
                PlacedAtom {
                    element: Element::H,
                    pos: Point::new(1.0, 1.0),
                },
            ],
            bonds: vec![
                IndexedBond {
                    a1: 0,
                    a2: 1,
                    order: BondOrder::Single,
                },
                IndexedBond {
                    a1: 0,
                    a2: 2,
                    order: BondOrder::Single,
                },
                IndexedBond {
                    a1: 0,
                    a2: 7,
                    order: BondOrder::Single,
                },
            ],
        });

        assert_eq!(report.atoms.len(), 3);
        assert_eq!(report.skipped_bonds, 1);
        assert_eq!(document.molecule_name(), Some("Water"));
        assert_eq!(document.molecule().bond_count(), 2);

        let oxygen = document.molecule().atom(report.atoms[0]).unwrap().pos;
        let right = document.molecule().atom(report.atoms[2]).unwrap().pos;
        assert!((oxygen - Point::new(400.0, 260.0)).norm() < 1e-9);
        assert!((right - Point::new(480.0, 340.0)).norm() < 1e-9);

        assert!(document.undo());
        assert_eq!(document.molecule().atom_count(), 1);
        assert_eq!(document.molecule_name(), None);
    }

    #[test]
    fn rejected_bond_request_leaves_structure_and_history_unchanged() {
        let mut document = Document::default();
        let a = mutate(&mut document, Element::C, 0.0);
        let depth = document.history_len();

        document.request_snapshot();
        assert_eq!(document.add_or_update_bond(a, a, BondOrder::Single), None);

        assert_eq!(document.molecule().bond_count(), 0);
        assert_eq!(document.history_len(), depth);

        assert!(document.undo());
        assert!(document.molecule().is_empty());
    }

    #[test]
    fn deleting_missing_atom_records_no_history() {
        let mut document = Document::default();
        let a = mutate(&mut document, Element::C, 0.0);
        document.request_snapshot();
        document.delete_atom(a);
        let depth = document.history_len();

        document.request_snapshot();
        assert!(!document.delete_atom(a));

        assert_eq!(document.history_len(), depth);
    }

    #[test]
    fn redrawing_bond_with_new_order_is_an_undoable_mutation() {
        let config = EditorConfig::default();
        let mut document = Document::new(&config);
        let mut canvas = Canvas::new(&config);
        let view = ViewTransform::default();
        let a = mutate(&mut document, Element::C, 0.0);
        let b = mutate(&mut document, Element::C, 60.0);
        document.request_snapshot();
        document.add_or_update_bond(a, b, BondOrder::Single);
        document.set_molecule_name("Ethane");
        let depth = document.history_len();

        let settings = ToolSettings {
            mode: ToolMode::Bond,
            bond_order: BondOrder::Double,
            ..Default::default()
        };
        canvas.pointer_down(&mut document, &settings, &view, Point::new(60.0, 0.0));
        let gesture = canvas.pointer_up(&mut document, &settings, &view, Point::new(0.0, 0.0));

        assert!(matches!(
            gesture,
            Gesture::BondDrawn {
                edit: BondEdit::Updated {
                    previous: BondOrder::Single,
                    ..
                },
                ..
            }
        ));
        assert_eq!(document.history_len(), depth + 1);
        assert_eq!(document.molecule_name(), None);
        assert_eq!(document.molecule().bond_count(), 1);
        assert_eq!(document.molecule().bond_between(a, b).unwrap().order, BondOrder::Double);

        assert!(document.undo());
        assert_eq!(document.molecule().bond_count(), 1);
        assert_eq!(document.molecule().bond_between(a, b).unwrap().order, BondOrder::Single);
    }
}
