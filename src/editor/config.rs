//! Tunable constants of the drawing surface.
//!
//! Every field has a default matching the stock editor, so partial TOML documents are
//! accepted. [`EditorConfig::validate`] rejects values that would break hit-testing, the
//! zoom clamp, or the undo history.

use crate::model::history::DEFAULT_HISTORY_DEPTH;
use crate::model::types::Point;
use crate::ops::{Error, LayoutTarget, ZoomRange};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Drawn atom radius in world units.
    pub atom_radius: f64,
    /// Hit radius as a multiple of the drawn radius.
    pub hit_tolerance_factor: f64,
    /// Eraser reach around a bond's center line, in world units.
    pub bond_hit_tolerance: f64,
    /// Minimum bond length when dragging a bond into empty space.
    pub default_bond_length: f64,
    /// Releases closer than this to the press point or the origin atom are not drags.
    pub min_drag_distance: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Number of undo snapshots retained.
    pub history_depth: usize,
    /// Spacing of the background grid in world units.
    pub grid_step: f64,
    pub star_count: usize,
    /// Fixed starfield seed; entropy is used when absent.
    pub star_seed: Option<u64>,
    /// Where generated molecules are centered.
    pub layout_center: [f64; 2],
    /// Size of the larger extent of a generated molecule.
    pub layout_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            atom_radius: 10.0,
            hit_tolerance_factor: 1.8,
            bond_hit_tolerance: 6.0,
            default_bond_length: 35.0,
            min_drag_distance: 5.0,
            min_scale: 0.2,
            max_scale: 3.0,
            history_depth: DEFAULT_HISTORY_DEPTH,
            grid_step: 80.0,
            star_count: 500,
            star_seed: None,
            layout_center: [400.0, 300.0],
            layout_size: 160.0,
        }
    }
}

impl EditorConfig {
    /// Checks the invariants the editor relies on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("atom_radius", self.atom_radius),
            ("hit_tolerance_factor", self.hit_tolerance_factor),
            ("bond_hit_tolerance", self.bond_hit_tolerance),
            ("default_bond_length", self.default_bond_length),
            ("grid_step", self.grid_step),
            ("layout_size", self.layout_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::invalid_config(format!(
                    "`{name}` must be a positive number, got {value}"
                )));
            }
        }

        if !(self.min_drag_distance.is_finite() && self.min_drag_distance >= 0.0) {
            return Err(Error::invalid_config(format!(
                "`min_drag_distance` must be non-negative, got {}",
                self.min_drag_distance
            )));
        }
        self.zoom_range()?;
        if self.history_depth == 0 {
            return Err(Error::invalid_config("`history_depth` must be at least 1"));
        }
        if self.layout_center.iter().any(|c| !c.is_finite()) {
            return Err(Error::invalid_config("`layout_center` must be finite"));
        }

        Ok(())
    }

    /// Distance below which a point is considered to be over an atom.
    pub fn hit_radius(&self) -> f64 {
        self.atom_radius * self.hit_tolerance_factor
    }

    /// Zoom bounds built from `min_scale` and `max_scale`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the bounds do not form a positive range.
    pub fn zoom_range(&self) -> Result<ZoomRange, Error> {
        ZoomRange::new(self.min_scale, self.max_scale)
    }

    pub fn layout_target(&self) -> LayoutTarget {
        LayoutTarget {
            center: Point::new(self.layout_center[0], self.layout_center[1]),
            size: self.layout_size,
        }
    }
}
