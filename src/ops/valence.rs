//! Summed-bond-order valence checks.
//!
//! The check is advisory: an over-valent atom produces a warning but the structure is kept
//! as drawn. Atoms below their allowed valence are treated as incomplete or radical and are
//! never flagged.

use crate::model::molecule::Molecule;
use crate::model::types::{AtomId, Element};
use crate::ops::geometry::valence_sum;
use std::fmt;

/// Atom whose summed bond order exceeds the maximum valence of its element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValenceViolation {
    pub atom: AtomId,
    pub element: Element,
    /// Summed order of every bond referencing the atom.
    pub current: u32,
    /// Largest valence the element accepts.
    pub max_allowed: u32,
}

impl fmt::Display for ValenceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {} ({}) exceeds its maximum valence ({}): bond order sum is {}.",
            self.element,
            self.atom.short_tag(),
            self.max_allowed,
            self.current
        )
    }
}

/// Finds every over-valent atom, in atom iteration order.
///
/// Pure and idempotent: the molecule is only read.
pub fn find_violations(molecule: &Molecule) -> Vec<ValenceViolation> {
    molecule
        .atoms()
        .filter_map(|atom| {
            let current = valence_sum(atom.id, molecule.bonds_of(atom.id));
            let element = atom.element;
            if element.valences().contains(&current) {
                return None;
            }

            let max_allowed = element.max_valence();
            (current > max_allowed).then_some(ValenceViolation {
                atom: atom.id,
                element,
                current,
                max_allowed,
            })
        })
        .collect()
}

/// Human-readable warnings for every over-valent atom.
pub fn check_valence(molecule: &Molecule) -> Vec<String> {
    find_violations(molecule)
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{BondOrder, Point};

    fn carbon_with_bonds(molecule: &mut Molecule, orders: &[BondOrder]) -> AtomId {
        let carbon = molecule.add_atom(Element::C, Point::new(0.0, 0.0)).id;
        for (i, order) in orders.iter().enumerate() {
            let partner = molecule
                .add_atom(Element::C, Point::new(35.0 * (i as f64 + 1.0), 0.0))
                .id;
            molecule.add_or_update_bond(carbon, partner, *order).unwrap();
        }
        carbon
    }

    #[test]
    fn under_and_exactly_saturated_carbons_are_not_flagged() {
        let mut molecule = Molecule::new();
        carbon_with_bonds(&mut molecule, &[BondOrder::Single, BondOrder::Single]);
        carbon_with_bonds(&mut molecule, &[BondOrder::Double, BondOrder::Single]);
        carbon_with_bonds(&mut molecule, &[BondOrder::Triple, BondOrder::Single]);

        assert!(check_valence(&molecule).is_empty());
    }

    #[test]
    fn over_valent_carbon_yields_one_warning_with_symbol_and_tag() {
        let mut molecule = Molecule::new();
        let carbon = carbon_with_bonds(&mut molecule, &[BondOrder::Triple, BondOrder::Double]);

        let warnings = check_valence(&molecule);

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Atom C"));
        assert!(warnings[0].contains(&carbon.short_tag()));
        assert!(warnings[0].contains("(4)"));

        let violations = find_violations(&molecule);
        assert_eq!(violations[0].atom, carbon);
        assert_eq!(violations[0].current, 5);
    }

    #[test]
    fn sulfur_accepts_any_sum_up_to_its_largest_valence() {
        let mut molecule = Molecule::new();
        let sulfur = molecule.add_atom(Element::S, Point::new(0.0, 0.0)).id;
        for i in 0..5 {
            let o = molecule.add_atom(Element::O, Point::new(i as f64 * 10.0, 40.0)).id;
            molecule.add_or_update_bond(sulfur, o, BondOrder::Single).unwrap();
        }

        let flagged: Vec<AtomId> = find_violations(&molecule).iter().map(|v| v.atom).collect();
        assert!(!flagged.contains(&sulfur));
    }

    #[test]
    fn warnings_follow_atom_iteration_order() {
        let mut molecule = Molecule::new();
        let h1 = molecule.add_atom(Element::H, Point::new(0.0, 0.0)).id;
        let h2 = molecule.add_atom(Element::H, Point::new(10.0, 0.0)).id;
        molecule.add_or_update_bond(h1, h2, BondOrder::Double).unwrap();

        let violations = find_violations(&molecule);

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].atom, h1);
        assert_eq!(violations[1].atom, h2);
    }

    #[test]
    fn validator_is_idempotent() {
        let mut molecule = Molecule::new();
        carbon_with_bonds(
            &mut molecule,
            &[BondOrder::Triple, BondOrder::Triple],
        );

        let first = check_valence(&molecule);
        let second = check_valence(&molecule);

        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
