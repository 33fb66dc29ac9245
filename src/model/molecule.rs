//! Identity-keyed arena holding the atoms and bonds of the edited molecule.
//!
//! The molecule is the single source of truth for structure. It keeps three maps in
//! lockstep: atoms by id, bonds by id, and an unordered-pair index used to merge repeated
//! bond requests into the existing bond. Identities are minted from monotonic counters that
//! never rewind, so ids stay unique across undo and batch replacement.

use super::atom::Atom;
use super::bond::{Bond, canonical_pair};
use super::types::{AtomId, BondId, BondOrder, Element, Point};
use crate::ops::Error;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Outcome of a bond request between two atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondEdit {
    /// No bond existed between the pair; a new one was created.
    Created(BondId),
    /// A bond already joined the pair; its order was overwritten.
    Updated { id: BondId, previous: BondOrder },
}

impl BondEdit {
    pub fn id(&self) -> BondId {
        match self {
            BondEdit::Created(id) => *id,
            BondEdit::Updated { id, .. } => *id,
        }
    }
}

/// Atom of an externally generated batch, positioned but not yet identified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedAtom {
    pub element: Element,
    pub pos: Point,
}

/// Bond of an externally generated batch, referencing atoms by batch position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedBond {
    pub a1: usize,
    pub a2: usize,
    pub order: BondOrder,
}

/// Immutable copy of the atom and bond collections, used by the undo history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    atoms: BTreeMap<AtomId, Atom>,
    bonds: BTreeMap<BondId, Bond>,
}

impl Snapshot {
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Molecule {
    atoms: BTreeMap<AtomId, Atom>,
    bonds: BTreeMap<BondId, Bond>,
    pairs: HashMap<(AtomId, AtomId), BondId>,
    next_atom: u64,
    next_bond: u64,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a new atom and returns a copy of it.
    pub fn add_atom(&mut self, element: Element, pos: Point) -> Atom {
        let id = AtomId(self.next_atom);
        self.next_atom += 1;

        let atom = Atom::new(id, element, pos);
        self.atoms.insert(id, atom.clone());
        debug!("added {}", atom);
        atom
    }

    /// Bonds two atoms, or overwrites the order of the bond already joining them.
    ///
    /// The pair is unordered: a request for `(b, a)` merges into an existing `(a, b)` bond.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelfBond`] when `a == b` and [`Error::UnknownAtom`] when either
    /// endpoint is missing.
    pub fn add_or_update_bond(
        &mut self,
        a: AtomId,
        b: AtomId,
        order: BondOrder,
    ) -> Result<BondEdit, Error> {
        if a == b {
            return Err(Error::self_bond(a));
        }
        for atom in [a, b] {
            if !self.atoms.contains_key(&atom) {
                return Err(Error::unknown_atom(atom));
            }
        }

        let key = canonical_pair(a, b);
        if let Some(&id) = self.pairs.get(&key) {
            if let Some(bond) = self.bonds.get_mut(&id) {
                let previous = bond.order;
                bond.order = order;
                debug!("updated {} (was order {})", bond, previous);
                return Ok(BondEdit::Updated { id, previous });
            }
        }

        let id = BondId(self.next_bond);
        self.next_bond += 1;

        let bond = Bond::new(id, a, b, order);
        self.bonds.insert(id, bond);
        self.pairs.insert(key, id);
        debug!("added {}", bond);
        Ok(BondEdit::Created(id))
    }

    /// Removes an atom together with every bond that references it.
    ///
    /// Returns the removed atom and its incident bonds, or `None` when the id is unknown.
    pub fn remove_atom(&mut self, id: AtomId) -> Option<(Atom, Vec<Bond>)> {
        let atom = self.atoms.remove(&id)?;

        let incident: Vec<BondId> = self
            .bonds
            .values()
            .filter(|b| b.involves(id))
            .map(|b| b.id)
            .collect();

        let removed: Vec<Bond> = incident
            .into_iter()
            .filter_map(|bond_id| self.detach_bond(bond_id))
            .collect();

        debug!("removed {} with {} incident bond(s)", atom, removed.len());
        Some((atom, removed))
    }

    pub fn remove_bond(&mut self, id: BondId) -> Option<Bond> {
        let bond = self.detach_bond(id)?;
        debug!("removed {}", bond);
        Some(bond)
    }

    fn detach_bond(&mut self, id: BondId) -> Option<Bond> {
        let bond = self.bonds.remove(&id)?;
        self.pairs.remove(&bond.pair());
        Some(bond)
    }

    pub fn clear(&mut self) {
        self.atoms.clear();
        self.bonds.clear();
        self.pairs.clear();
    }

    /// Atomically replaces the whole structure with a generated batch.
    ///
    /// Atoms receive fresh identities in batch order. Bonds whose indices are out of range
    /// or self-referencing are skipped; repeated pairs merge like interactive requests.
    ///
    /// # Returns
    ///
    /// The identities assigned to the batch atoms and the number of skipped bonds.
    pub fn replace(&mut self, atoms: &[PlacedAtom], bonds: &[IndexedBond]) -> (Vec<AtomId>, usize) {
        self.clear();

        let ids: Vec<AtomId> = atoms
            .iter()
            .map(|placed| self.add_atom(placed.element, placed.pos).id)
            .collect();

        let mut skipped = 0;
        for bond in bonds {
            let endpoints = ids.get(bond.a1).zip(ids.get(bond.a2));
            let applied = endpoints
                .map(|(&a, &b)| self.add_or_update_bond(a, b, bond.order).is_ok())
                .unwrap_or(false);
            if !applied {
                warn!(
                    "skipped generated bond {}-{} (batch holds {} atoms)",
                    bond.a1,
                    bond.a2,
                    ids.len()
                );
                skipped += 1;
            }
        }

        (ids, skipped)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            atoms: self.atoms.clone(),
            bonds: self.bonds.clone(),
        }
    }

    /// Restores atoms and bonds from a snapshot; identity counters keep advancing.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.pairs = snapshot
            .bonds
            .values()
            .map(|bond| (bond.pair(), bond.id))
            .collect();
        self.atoms = snapshot.atoms;
        self.bonds = snapshot.bonds;
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(&id)
    }

    pub fn bond(&self, id: BondId) -> Option<&Bond> {
        self.bonds.get(&id)
    }

    /// Looks up the bond joining two atoms, in either direction.
    pub fn bond_between(&self, a: AtomId, b: AtomId) -> Option<&Bond> {
        self.pairs
            .get(&canonical_pair(a, b))
            .and_then(|id| self.bonds.get(id))
    }

    /// Resolves both endpoint atoms of a bond.
    pub fn endpoints(&self, bond: &Bond) -> Option<(&Atom, &Atom)> {
        self.atoms.get(&bond.a1).zip(self.atoms.get(&bond.a2))
    }

    /// Iterates atoms in creation order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.values()
    }

    /// Iterates bonds in creation order.
    pub fn bonds(&self) -> impl Iterator<Item = &Bond> {
        self.bonds.values()
    }

    pub fn bonds_of(&self, atom: AtomId) -> impl Iterator<Item = &Bond> {
        self.bonds.values().filter(move |b| b.involves(atom))
    }

    pub fn neighbors_of(&self, atom: AtomId) -> impl Iterator<Item = AtomId> + '_ {
        self.bonds_of(atom).filter_map(move |b| b.partner_of(atom))
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Molecule {{ atoms: {}, bonds: {} }}",
            self.atom_count(),
            self.bond_count()
        )
    }
}
