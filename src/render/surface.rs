//! Drawing-surface abstraction and a recording implementation.
//!
//! Scene painting only talks to [`Surface`], so the same frame can be rasterized by a host
//! canvas, recorded into a [`DisplayList`] for inspection, or exported as SVG.

use crate::model::types::{Color, Point, Vector};
use nalgebra::Matrix3;
use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

impl LineCap {
    pub fn name(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

/// Line styling; widths are in the units of the current transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
    pub cap: LineCap,
    /// Dash and gap lengths, or `None` for a solid line.
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub fn solid(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            cap: LineCap::Butt,
            dash: None,
        }
    }

    pub fn with_cap(self, cap: LineCap) -> Self {
        Self { cap, ..self }
    }

    pub fn dashed(self, dash: f64, gap: f64) -> Self {
        Self {
            dash: Some([dash, gap]),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

/// Two-circle radial gradient, as in the HTML canvas model.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub inner_center: Point,
    pub inner_radius: f64,
    pub outer_center: Point,
    pub outer_radius: f64,
    pub stops: Vec<GradientStop>,
}

/// Region filled by a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    Rect { origin: Point, size: Vector },
    Circle { center: Point, radius: f64 },
}

/// Blurred halo drawn behind a filled shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub weight: u16,
    pub color: Color,
}

pub trait Surface {
    fn fill_radial_gradient(&mut self, region: Region, gradient: &RadialGradient);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, glow: Option<Glow>);

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke);

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Draws text centered on `anchor`, both horizontally and vertically.
    fn fill_text(&mut self, anchor: Point, text: &str, style: &TextStyle);

    /// Composes `matrix` onto the current transform until the matching pop.
    fn push_transform(&mut self, matrix: &Matrix3<f64>);

    fn pop_transform(&mut self);
}

/// One recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    RadialGradient {
        region: Region,
        gradient: RadialGradient,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Color,
        glow: Option<Glow>,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        stroke: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        anchor: Point,
        text: SmolStr,
        style: TextStyle,
    },
    PushTransform(Matrix3<f64>),
    PopTransform,
}

/// Surface that records every call in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    depth: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of transforms pushed and not yet popped.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Point, &Point, &Stroke)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line { from, to, stroke } => Some((from, to, stroke)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn fill_radial_gradient(&mut self, region: Region, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::RadialGradient {
            region,
            gradient: gradient.clone(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, glow: Option<Glow>) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
            glow,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: *stroke,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn fill_text(&mut self, anchor: Point, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            anchor,
            text: SmolStr::new(text),
            style: *style,
        });
    }

    fn push_transform(&mut self, matrix: &Matrix3<f64>) {
        self.depth += 1;
        self.commands.push(DrawCommand::PushTransform(*matrix));
    }

    fn pop_transform(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopTransform);
    }
}
