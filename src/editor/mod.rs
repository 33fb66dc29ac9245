//! Interactive editing state.
//!
//! The [`canvas`] turns pointer events into structural requests against a
//! [`CanvasHost`](canvas::CanvasHost); the [`document`] is the host that owns the molecule,
//! the undo history, and derived warnings; [`session`] wires both to the view transform and
//! the tool palette.

pub mod canvas;
pub mod config;
pub mod document;
pub mod session;
pub mod tools;

pub use canvas::{Canvas, CanvasHost, Gesture, Interaction};
pub use config::EditorConfig;
pub use document::{Document, GeneratedMolecule, ReplaceReport};
pub use session::Editor;
pub use tools::{ToolMode, ToolSettings};
