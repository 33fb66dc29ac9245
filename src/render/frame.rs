//! Per-frame scene painter.
//!
//! [`draw_frame`] is a pure function of the molecule, the interaction preview, and the view
//! transform. It paints, in order: the radial background and the starfield in screen space,
//! then, inside the view transform, the grid, the bonds, the atoms, and the bond-drag
//! preview. Line widths inside the transform are divided by the zoom so they keep a constant
//! on-screen thickness.

use super::starfield::Starfield;
use super::surface::{
    GradientStop, Glow, LineCap, RadialGradient, Region, Stroke, Surface, TextStyle,
};
use crate::model::bond::Bond;
use crate::model::molecule::Molecule;
use crate::model::types::{BondOrder, Color, Point, Vector};
use crate::ops::ViewTransform;
use crate::ops::geometry::perpendicular;

const BACKGROUND_INNER: Color = Color::rgb(0x1e, 0x29, 0x3b);
const BACKGROUND_OUTER: Color = Color::rgb(0x0f, 0x17, 0x2a);
const GRID_COLOR: Color = Color::rgba(255, 255, 255, 0.03);
const BOND_COLOR: Color = Color::rgba(100, 116, 139, 0.7);
const ATOM_FILL: Color = Color::rgb(0x0f, 0x17, 0x2a);
const PREVIEW_COLOR: Color = Color::rgba(255, 255, 255, 0.2);

const BOND_WIDTH: f64 = 2.5;
const DOUBLE_BOND_SPREAD: f64 = 1.8;
const TRIPLE_BOND_SPREAD: f64 = 3.2;
const GLOW_BLUR: f64 = 15.0;
const HIGHLIGHT_ALPHA: f64 = 0.5;
const SYMBOL_SIZE: f64 = 7.0;
const SYMBOL_WEIGHT: u16 = 900;
const PREVIEW_DASH: f64 = 8.0;
const GRID_EXTENT_FACTOR: f64 = 4.0;

/// Everything a frame is painted from.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub molecule: &'a Molecule,
    pub view: &'a ViewTransform,
    pub stars: &'a Starfield,
    /// Origin atom center and live pointer of a bond drag in progress.
    pub preview: Option<(Point, Point)>,
    pub atom_radius: f64,
    pub grid_step: f64,
}

pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, scene: &Scene) {
    let view = scene.view;
    let viewport = view.viewport();

    draw_background(surface, scene);
    scene.stars.paint(surface, &viewport);

    surface.push_transform(&view.matrix());

    draw_grid(surface, scene);
    for bond in scene.molecule.bonds() {
        draw_bond(surface, scene, bond);
    }
    draw_atoms(surface, scene);
    if let Some((origin, pointer)) = scene.preview {
        let stroke = Stroke::solid(view.screen_length(1.0), PREVIEW_COLOR)
            .dashed(PREVIEW_DASH, PREVIEW_DASH);
        surface.stroke_line(origin, pointer, &stroke);
    }

    surface.pop_transform();
}

fn draw_background<S: Surface + ?Sized>(surface: &mut S, scene: &Scene) {
    let viewport = scene.view.viewport();
    let center = viewport.center();

    surface.fill_radial_gradient(
        Region::Rect {
            origin: Point::origin(),
            size: Vector::new(viewport.width, viewport.height),
        },
        &RadialGradient {
            inner_center: center,
            inner_radius: 0.0,
            outer_center: center,
            outer_radius: viewport.width,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: BACKGROUND_INNER,
                },
                GradientStop {
                    offset: 1.0,
                    color: BACKGROUND_OUTER,
                },
            ],
        },
    );
}

fn draw_grid<S: Surface + ?Sized>(surface: &mut S, scene: &Scene) {
    let extent = scene.view.viewport().max_extent() * GRID_EXTENT_FACTOR;
    let stroke = Stroke::solid(scene.view.screen_length(1.0), GRID_COLOR);

    let lines = (2.0 * extent / scene.grid_step).ceil() as usize;
    for i in 0..lines {
        let offset = -extent + i as f64 * scene.grid_step;
        surface.stroke_line(
            Point::new(offset, -extent),
            Point::new(offset, extent),
            &stroke,
        );
        surface.stroke_line(
            Point::new(-extent, offset),
            Point::new(extent, offset),
            &stroke,
        );
    }
}

fn draw_bond<S: Surface + ?Sized>(surface: &mut S, scene: &Scene, bond: &Bond) {
    let Some((a1, a2)) = scene.molecule.endpoints(bond) else {
        return;
    };
    let width = scene.view.screen_length(BOND_WIDTH);
    let stroke = Stroke::solid(width, BOND_COLOR).with_cap(LineCap::Round);
    let (start, end) = (a1.pos, a2.pos);

    let normal = perpendicular(&start, &end);
    match (bond.order, normal) {
        (BondOrder::Single, _) | (_, None) => surface.stroke_line(start, end, &stroke),
        (BondOrder::Double, Some(normal)) => {
            let offset = normal * (width * DOUBLE_BOND_SPREAD);
            surface.stroke_line(start + offset, end + offset, &stroke);
            surface.stroke_line(start - offset, end - offset, &stroke);
        }
        (BondOrder::Triple, Some(normal)) => {
            let offset = normal * (width * TRIPLE_BOND_SPREAD);
            surface.stroke_line(start, end, &stroke);
            surface.stroke_line(start + offset, end + offset, &stroke);
            surface.stroke_line(start - offset, end - offset, &stroke);
        }
    }
}

fn draw_atoms<S: Surface + ?Sized>(surface: &mut S, scene: &Scene) {
    let view = scene.view;
    let radius = scene.atom_radius;
    let text = TextStyle {
        size: SYMBOL_SIZE,
        weight: SYMBOL_WEIGHT,
        color: Color::WHITE,
    };

    for atom in scene.molecule.atoms() {
        let color = atom.element.color();

        surface.fill_circle(
            atom.pos,
            radius,
            ATOM_FILL,
            Some(Glow {
                blur: view.screen_length(GLOW_BLUR),
                color,
            }),
        );
        surface.stroke_circle(atom.pos, radius, &Stroke::solid(view.screen_length(1.0), color));
        surface.fill_radial_gradient(
            Region::Circle {
                center: atom.pos,
                radius,
            },
            &highlight(atom.pos, radius, color),
        );
        surface.fill_text(atom.pos, atom.element.symbol(), &text);
    }
}

/// Off-center sheen giving atoms a spherical look.
fn highlight(center: Point, radius: f64, color: Color) -> RadialGradient {
    RadialGradient {
        inner_center: center - Vector::new(radius * 0.3, radius * 0.3),
        inner_radius: radius * 0.1,
        outer_center: center,
        outer_radius: radius,
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: color.with_alpha(HIGHLIGHT_ALPHA),
            },
            GradientStop {
                offset: 0.5,
                color: Color::rgba(0, 0, 0, 0.2 * HIGHLIGHT_ALPHA),
            },
            GradientStop {
                offset: 1.0,
                color: Color::rgba(0, 0, 0, 0.0),
            },
        ],
    }
}
