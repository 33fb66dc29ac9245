//! Core data structures modeling the sketched molecule.
//!
//! This module defines atoms, bonds, the identity-keyed molecule arena, and the bounded
//! undo history. These types are mutated by the editor document and read by the
//! validator and the renderer.

pub mod atom;
pub mod bond;
pub mod history;
pub mod molecule;
pub mod types;
