//! Pointer-driven interaction state machine of the 2D drawing surface.
//!
//! The canvas owns only transient state: whether a bond is being dragged, from which atom,
//! and where the pointer is. The molecule itself belongs to a [`CanvasHost`], which the
//! canvas reads for hit-testing and asks to mutate through a narrow contract. Every
//! mutation request is preceded by [`CanvasHost::request_snapshot`].
//!
//! States are `Idle` and `DraggingBond(origin)`:
//!
//! - pointer-down in eraser mode deletes the atom (or else the bond) under the pointer;
//! - pointer-down on an atom in any other mode starts a bond drag;
//! - pointer-down on empty space in atom mode places an atom;
//! - pointer-up while dragging bonds to the atom under the pointer, or grows a new atom
//!   along the nearest canonical bond angle when released over empty space.

use super::config::EditorConfig;
use super::tools::{ToolMode, ToolSettings};
use crate::model::atom::Atom;
use crate::model::bond::Bond;
use crate::model::molecule::{BondEdit, Molecule};
use crate::model::types::{AtomId, BondId, BondOrder, Element, Point};
use crate::ops::geometry::{
    direction_angle, distance, distance_to_segment, snap_angle, unit_direction,
};
use crate::ops::transform::ViewTransform;
use log::debug;

/// Mutation contract between the drawing surface and the application owning the molecule.
pub trait CanvasHost {
    /// Current molecule, read for hit-testing.
    fn molecule(&self) -> &Molecule;

    /// Records an undo snapshot; called before every mutation request.
    fn request_snapshot(&mut self);

    /// Places an atom and returns it so a bond can be attached immediately.
    fn add_atom(&mut self, pos: Point, element: Element) -> Atom;

    /// Creates a bond, or updates the order of the bond already joining the pair.
    fn add_or_update_bond(&mut self, a: AtomId, b: AtomId, order: BondOrder) -> Option<BondEdit>;

    /// Removes an atom and its incident bonds; returns whether anything was removed.
    fn delete_atom(&mut self, id: AtomId) -> bool;

    /// Removes a single bond; returns whether it existed.
    fn delete_bond(&mut self, id: BondId) -> bool;
}

/// Transient interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    DraggingBond {
        origin: AtomId,
        /// World position where the drag started.
        press: Point,
    },
}

/// What a pointer event did, reported for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Nothing,
    AtomPlaced(AtomId),
    DragStarted(AtomId),
    /// Released over another atom.
    BondDrawn {
        origin: AtomId,
        target: AtomId,
        edit: BondEdit,
    },
    /// Released over empty space; a new atom was grown from the origin.
    BranchGrown {
        origin: AtomId,
        atom: AtomId,
        edit: Option<BondEdit>,
    },
    AtomErased(AtomId),
    BondErased(BondId),
    /// Drag ended without a structural change.
    DragCancelled,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    state: Interaction,
    pointer: Point,
    hit_radius: f64,
    bond_hit_tolerance: f64,
    default_bond_length: f64,
    min_drag_distance: f64,
}

impl Canvas {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            state: Interaction::Idle,
            pointer: Point::origin(),
            hit_radius: config.hit_radius(),
            bond_hit_tolerance: config.bond_hit_tolerance,
            default_bond_length: config.default_bond_length,
            min_drag_distance: config.min_drag_distance,
        }
    }

    pub fn state(&self) -> Interaction {
        self.state
    }

    /// Latest pointer position in world space.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, Interaction::DraggingBond { .. })
    }

    /// First atom, in iteration order, strictly within the hit radius of `point`.
    pub fn atom_at<'m>(&self, molecule: &'m Molecule, point: &Point) -> Option<&'m Atom> {
        molecule
            .atoms()
            .find(|atom| atom.distance_to(point) < self.hit_radius)
    }

    fn atom_at_excluding<'m>(
        &self,
        molecule: &'m Molecule,
        point: &Point,
        excluded: AtomId,
    ) -> Option<&'m Atom> {
        molecule
            .atoms()
            .filter(|atom| atom.id != excluded)
            .find(|atom| atom.distance_to(point) < self.hit_radius)
    }

    /// First bond whose center line passes within the bond tolerance of `point`.
    pub fn bond_at<'m>(&self, molecule: &'m Molecule, point: &Point) -> Option<&'m Bond> {
        molecule.bonds().find(|bond| {
            molecule
                .endpoints(bond)
                .map(|(a1, a2)| {
                    distance_to_segment(point, &a1.pos, &a2.pos) < self.bond_hit_tolerance
                })
                .unwrap_or(false)
        })
    }

    /// Origin atom position and live pointer, while a bond is being dragged.
    pub fn preview(&self, molecule: &Molecule) -> Option<(Point, Point)> {
        match self.state {
            Interaction::DraggingBond { origin, .. } => molecule
                .atom(origin)
                .map(|atom| (atom.pos, self.pointer)),
            Interaction::Idle => None,
        }
    }

    pub fn pointer_down<H: CanvasHost>(
        &mut self,
        host: &mut H,
        tools: &ToolSettings,
        view: &ViewTransform,
        screen: Point,
    ) -> Gesture {
        let world = view.screen_to_world(&screen);
        self.pointer = world;
        self.state = Interaction::Idle;

        let hit = self.atom_at(host.molecule(), &world).map(|atom| atom.id);

        if tools.mode == ToolMode::Eraser {
            return self.erase_at(host, hit, &world);
        }

        if let Some(origin) = hit {
            debug!("bond drag started from {}", origin);
            self.state = Interaction::DraggingBond {
                origin,
                press: world,
            };
            return Gesture::DragStarted(origin);
        }

        if tools.mode.places_atoms() {
            host.request_snapshot();
            let atom = host.add_atom(world, tools.element);
            return Gesture::AtomPlaced(atom.id);
        }

        Gesture::Nothing
    }

    fn erase_at<H: CanvasHost>(
        &mut self,
        host: &mut H,
        hit: Option<AtomId>,
        world: &Point,
    ) -> Gesture {
        if let Some(atom) = hit {
            host.request_snapshot();
            host.delete_atom(atom);
            return Gesture::AtomErased(atom);
        }

        let bond = self.bond_at(host.molecule(), world).map(|bond| bond.id);
        match bond {
            Some(bond) => {
                host.request_snapshot();
                host.delete_bond(bond);
                Gesture::BondErased(bond)
            }
            None => Gesture::Nothing,
        }
    }

    /// Tracks the pointer for the bond preview; never mutates the molecule.
    pub fn pointer_move(&mut self, view: &ViewTransform, screen: Point) {
        self.pointer = view.screen_to_world(&screen);
    }

    pub fn pointer_up<H: CanvasHost>(
        &mut self,
        host: &mut H,
        tools: &ToolSettings,
        view: &ViewTransform,
        screen: Point,
    ) -> Gesture {
        let world = view.screen_to_world(&screen);
        self.pointer = world;

        let Interaction::DraggingBond { origin, press } = std::mem::take(&mut self.state) else {
            return Gesture::Nothing;
        };

        let Some(origin_pos) = host.molecule().atom(origin).map(|atom| atom.pos) else {
            debug!("bond drag origin {} vanished before release", origin);
            return Gesture::DragCancelled;
        };

        if distance(&world, &press) < self.min_drag_distance
            || distance(&world, &origin_pos) < self.min_drag_distance
        {
            return Gesture::DragCancelled;
        }

        let target = self
            .atom_at_excluding(host.molecule(), &world, origin)
            .map(|atom| atom.id);

        match target {
            Some(target) => {
                host.request_snapshot();
                match host.add_or_update_bond(origin, target, tools.bond_order) {
                    Some(edit) => Gesture::BondDrawn {
                        origin,
                        target,
                        edit,
                    },
                    None => Gesture::DragCancelled,
                }
            }
            None => self.grow_branch(host, tools, origin, origin_pos, world),
        }
    }

    fn grow_branch<H: CanvasHost>(
        &self,
        host: &mut H,
        tools: &ToolSettings,
        origin: AtomId,
        origin_pos: Point,
        release: Point,
    ) -> Gesture {
        let drag = release - origin_pos;
        let angle = snap_angle(direction_angle(&drag));
        let length = self.default_bond_length.max(drag.norm());
        let pos = origin_pos + unit_direction(angle) * length;

        host.request_snapshot();
        let atom = host.add_atom(pos, tools.element);
        host.request_snapshot();
        let edit = host.add_or_update_bond(origin, atom.id, tools.bond_order);

        debug!(
            "grew {} from {} at {:.1} deg, length {:.1}",
            atom.id,
            origin,
            angle.to_degrees(),
            length
        );
        Gesture::BranchGrown {
            origin,
            atom: atom.id,
            edit,
        }
    }

    /// Abandons any drag in progress, as on teardown or tool switches.
    pub fn cancel(&mut self) {
        self.state = Interaction::Idle;
    }
}
