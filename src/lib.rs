//! # MolSketch
//!
//! **MolSketch** is the engine behind an interactive 2D molecular sketcher. It turns pointer events into atoms and bonds, keeps the structure consistent under undo and batch replacement, flags over-valent atoms, and paints every frame through an abstract drawing surface. Hosts supply the window, the input events, and the pixels; everything between them lives here.
//!
//! ## Features
//!
//! - **Exact view transform** – `ViewTransform` maps world coordinates to viewport pixels under zoom and rotation, and maps pointer input back through the exact inverse so everything stays clickable where it is drawn.
//! - **Pointer state machine** – `Canvas` hit-tests atoms and bonds, grows new atoms along canonical bond angles, and merges repeated bond requests into a single bond per atom pair.
//! - **Owning document** – `Document` records a bounded undo history before every mutation, invalidates the cached molecule name, and recomputes valence warnings.
//! - **Advisory validation** – `check_valence` reports atoms whose summed bond order exceeds their element's largest valence.
//! - **Surface-agnostic rendering** – `draw_frame` paints the background, starfield, grid, bonds, atoms, and drag preview onto any `Surface`; `DisplayList` records frames for inspection and SVG export.
//! - **Replayable sessions** – TOML scripts drive an `Editor` exactly as pointer events would, for reproducible traces and headless rendering.

mod model;

pub mod editor;
pub mod io;
pub mod ops;
pub mod render;

pub use model::atom::Atom;
pub use model::bond::Bond;
pub use model::history::{DEFAULT_HISTORY_DEPTH, History};
pub use model::molecule::{BondEdit, IndexedBond, Molecule, PlacedAtom, Snapshot};
pub use model::types::{AtomId, BondId, BondOrder, Color, Element, Point, Vector};

pub use editor::{Editor, EditorConfig, GeneratedMolecule, ToolMode};
