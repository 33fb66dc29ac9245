//! View transform between viewport pixels and world coordinates.
//!
//! The view is centered on the viewport's geometric center. Rendering maps a world point
//! `p` to `c + s·R(θ)·(p − c)` (translate to center, rotate, scale, translate back), and
//! pointer input is mapped back with the exact inverse, so a point drawn at a world
//! coordinate is clickable where it appears for any zoom and rotation. Stored atom
//! coordinates are never touched by the view.

use super::error::Error;
use crate::model::types::{Point, Vector};
use nalgebra::{Matrix3, Rotation2};

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn max_extent(&self) -> f64 {
        self.width.max(self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Inclusive bounds on the zoom factor; the lower bound is kept strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    min: f64,
    max: f64,
}

impl ZoomRange {
    /// Builds a zoom range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] unless both bounds are finite, `min` is positive,
    /// and `min <= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, Error> {
        if !(min.is_finite() && min > 0.0) {
            return Err(Error::invalid_config(format!(
                "minimum zoom must be a positive number, got {min}"
            )));
        }
        if !max.is_finite() || max < min {
            return Err(Error::invalid_config(format!("zoom range [{min}, {max}] is empty")));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return 1.0_f64.clamp(self.min, self.max);
        }
        scale.clamp(self.min, self.max)
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self { min: 0.2, max: 3.0 }
    }
}

/// Zoom, rotation, and viewport describing how world space is presented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    rotation_deg: f64,
    viewport: Viewport,
    zoom: ZoomRange,
}

impl ViewTransform {
    /// Creates an identity view (scale 1, no rotation) over the given viewport.
    pub fn new(viewport: Viewport, zoom: ZoomRange) -> Self {
        Self {
            scale: zoom.clamp(1.0),
            rotation_deg: 0.0,
            viewport,
            zoom,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom
    }

    /// Sets the zoom factor, clamped into the configured range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = self.zoom.clamp(scale);
    }

    /// Multiplies the zoom factor, clamped into the configured range.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_scale(self.scale * factor);
    }

    /// Sets the rotation in degrees; the angle is free-running and is not wrapped.
    pub fn set_rotation(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.rotation_deg = degrees;
        }
    }

    pub fn rotate_by(&mut self, degrees: f64) {
        self.set_rotation(self.rotation_deg + degrees);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn reset(&mut self) {
        self.scale = self.zoom.clamp(1.0);
        self.rotation_deg = 0.0;
    }

    fn rotation(&self) -> Rotation2<f64> {
        Rotation2::new(self.rotation_deg.to_radians())
    }

    /// Maps a world point to viewport pixels (the render transform).
    pub fn world_to_screen(&self, world: &Point) -> Point {
        let center = self.viewport.center();
        let rotated = self.rotation() * (world - center);
        center + rotated * self.scale
    }

    /// Maps a pointer position in viewport pixels back to world space.
    ///
    /// Undoes the render transform step by step: recenter, divide by the zoom, rotate by
    /// the negated angle, then translate back by the center.
    pub fn screen_to_world(&self, screen: &Point) -> Point {
        let center = self.viewport.center();
        let unscaled: Vector = (screen - center) / self.scale;
        center + self.rotation().inverse() * unscaled
    }

    /// Homogeneous matrix of the render transform.
    pub fn matrix(&self) -> Matrix3<f64> {
        let center = self.viewport.center().coords;
        Matrix3::new_translation(&center)
            * self.rotation().to_homogeneous()
            * Matrix3::new_nonuniform_scaling(&Vector::new(self.scale, self.scale))
            * Matrix3::new_translation(&-center)
    }

    /// Converts a length in screen pixels to world units at the current zoom.
    ///
    /// Renderers divide stroke widths by the scale this way so lines keep a constant
    /// on-screen thickness.
    pub fn screen_length(&self, pixels: f64) -> f64 {
        pixels / self.scale
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(Viewport::default(), ZoomRange::default())
    }
}
