//! Fundamental atom representation comprising identity, chemical element, and world position.
//!
//! Atoms are created by the [`Molecule`](super::molecule::Molecule) arena, which assigns the
//! identity, and are read by hit-testing, rendering, and the valence validator.

use super::types::{AtomId, Element, Point};
use std::fmt;

/// Placed element instance with a stable identity and a mutable world position.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Arena-assigned identity, unique for the lifetime of the owning molecule.
    pub id: AtomId,
    /// Chemical element drawn at this position.
    pub element: Element,
    /// World-space coordinates; invariant under pan, zoom, and rotation of the view.
    pub pos: Point,
}

impl Atom {
    /// Creates a new atom from an identity, element, and position.
    ///
    /// Identities are normally minted by the molecule arena; constructing atoms by hand is
    /// reserved for snapshots and tests.
    ///
    /// # Arguments
    ///
    /// * `id` - Identity assigned by the owning arena.
    /// * `element` - `Element` variant describing the chemical identity.
    /// * `pos` - `Point` describing the world coordinates.
    pub fn new(id: AtomId, element: Element, pos: Point) -> Self {
        Self { id, element, pos }
    }

    /// Computes the Euclidean distance from the atom center to an arbitrary point.
    pub fn distance_to(&self, point: &Point) -> f64 {
        nalgebra::distance(&self.pos, point)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ id: {}, element: {}, pos: [{:.3}, {:.3}] }}",
            self.id, self.element, self.pos.x, self.pos.y
        )
    }
}
