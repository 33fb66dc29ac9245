//! Normalization of externally generated coordinates into the drawing area.
//!
//! Structure generators emit coordinates in arbitrary units and origins. Before a batch is
//! installed, its bounding box is centered on a target point and its larger extent is
//! rescaled to a target size, so generated molecules land on screen at a readable size.

use crate::model::molecule::PlacedAtom;
use crate::model::types::Point;

/// Target placement for generated batches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTarget {
    pub center: Point,
    /// Length the larger bounding-box extent is scaled to.
    pub size: f64,
}

impl Default for LayoutTarget {
    fn default() -> Self {
        Self {
            center: Point::new(400.0, 300.0),
            size: 160.0,
        }
    }
}

/// Centers and rescales the batch in place.
///
/// The extent used for scaling is at least `1.0`, so single atoms and collinear batches do
/// not blow up. An empty batch is left untouched.
pub fn fit_to_target(atoms: &mut [PlacedAtom], target: &LayoutTarget) {
    let Some(first) = atoms.first() else {
        return;
    };

    let (min, max) = atoms
        .iter()
        .fold((first.pos, first.pos), |(min, max), atom| {
            (min.inf(&atom.pos), max.sup(&atom.pos))
        });

    let source_center = nalgebra::center(&min, &max);
    let extent = max - min;
    let range = extent.x.max(extent.y).max(1.0);
    let multiplier = target.size / range;

    for atom in atoms.iter_mut() {
        atom.pos = target.center + (atom.pos - source_center) * multiplier;
    }
}
