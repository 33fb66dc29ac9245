//! Undirected bonds between two atoms.

use super::types::{AtomId, BondId, BondOrder};
use std::fmt;

/// Undirected bond connecting two distinct atoms of a molecule.
///
/// Endpoints are stored in canonical (ascending) order so that the pair `(A, B)` and the
/// pair `(B, A)` describe the same chemical bond, both for equality and for the pair index
/// kept by the molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    /// Arena-assigned identity.
    pub id: BondId,
    /// Lesser atom identity after canonicalization.
    pub a1: AtomId,
    /// Greater atom identity after canonicalization.
    pub a2: AtomId,
    /// Chemical multiplicity.
    pub order: BondOrder,
}

impl Bond {
    /// Creates a new bond while canonicalizing the endpoint ordering.
    ///
    /// # Arguments
    ///
    /// * `id` - Identity assigned by the owning arena.
    /// * `a` - One bonded atom.
    /// * `b` - The partner atom.
    /// * `order` - Bond multiplicity.
    pub fn new(id: BondId, a: AtomId, b: AtomId, order: BondOrder) -> Self {
        let (a1, a2) = canonical_pair(a, b);
        Self { id, a1, a2, order }
    }

    /// Returns the canonical endpoint pair.
    pub fn pair(&self) -> (AtomId, AtomId) {
        (self.a1, self.a2)
    }

    pub fn involves(&self, atom: AtomId) -> bool {
        self.a1 == atom || self.a2 == atom
    }

    /// Returns the endpoint opposite to `atom`, or `None` when `atom` is not an endpoint.
    pub fn partner_of(&self, atom: AtomId) -> Option<AtomId> {
        if self.a1 == atom {
            Some(self.a2)
        } else if self.a2 == atom {
            Some(self.a1)
        } else {
            None
        }
    }
}

/// Orders two atom identities so the smaller comes first.
pub fn canonical_pair(a: AtomId, b: AtomId) -> (AtomId, AtomId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bond {{ id: {}, atoms: {}-{}, order: {} }}",
            self.id, self.a1, self.a2, self.order
        )
    }
}
