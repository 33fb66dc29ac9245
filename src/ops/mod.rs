//! Stateless operations over the molecule model.
//!
//! This module groups the geometry helpers used for hit-testing and bond placement, the
//! valence validator, the view transform between viewport pixels and world space, and the
//! layout normalization applied to generated batches. Each submodule is pure with respect
//! to the molecule, and they share a common error type.

pub mod geometry;
pub mod layout;
pub mod transform;
pub mod valence;

mod error;

pub use geometry::{CANONICAL_BOND_ANGLES, snap_angle, snap_degrees};

pub use layout::{LayoutTarget, fit_to_target};

pub use transform::{ViewTransform, Viewport, ZoomRange};

pub use valence::{ValenceViolation, check_valence, find_violations};

pub use error::Error;
