//! Frame rendering over an abstract drawing surface.

pub mod frame;
pub mod looper;
pub mod starfield;
pub mod surface;

pub use frame::{Scene, draw_frame};
pub use looper::{LoopHandle, LoopState, RenderLoop};
pub use starfield::{Star, Starfield};
pub use surface::{
    DisplayList, DrawCommand, GradientStop, Glow, LineCap, RadialGradient, Region, Stroke,
    Surface, TextStyle,
};
