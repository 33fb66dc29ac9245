//! Decorative starfield painted behind the scene.
//!
//! Stars are generated once per session and reused every frame, so the backdrop never
//! flickers. Positions live in the unit square and are stretched to the viewport at paint
//! time, in screen space, unaffected by zoom or rotation.

use super::surface::Surface;
use crate::model::types::{Color, Point};
use crate::ops::Viewport;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_STAR_SIZE: f64 = 1.2;
const MAX_STAR_OPACITY: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Horizontal position as a fraction of the viewport width.
    pub x: f64,
    /// Vertical position as a fraction of the viewport height.
    pub y: f64,
    pub size: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Generates `count` stars, deterministically when a seed is given.
    pub fn generate(count: usize, seed: Option<u64>) -> Self {
        let mut rng = build_rng(seed);
        let stars = (0..count)
            .map(|_| Star {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                size: rng.random_range(0.0..MAX_STAR_SIZE),
                opacity: rng.random_range(0.0..MAX_STAR_OPACITY),
            })
            .collect();

        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Paints every star as a translucent white dot in viewport pixels.
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S, viewport: &Viewport) {
        for star in &self.stars {
            let center = Point::new(star.x * viewport.width, star.y * viewport.height);
            surface.fill_circle(center, star.size, Color::WHITE.with_alpha(star.opacity), None);
        }
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_os_rng()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{DisplayList, DrawCommand};

    #[test]
    fn seeded_starfield_is_reproducible() {
        let first = Starfield::generate(50, Some(7));
        let second = Starfield::generate(50, Some(7));

        assert_eq!(first, second);
        assert_eq!(first.len(), 50);
    }

    #[test]
    fn stars_stay_within_their_ranges() {
        let field = Starfield::generate(500, Some(42));

        for star in field.stars() {
            assert!((0.0..1.0).contains(&star.x));
            assert!((0.0..1.0).contains(&star.y));
            assert!((0.0..MAX_STAR_SIZE).contains(&star.size));
            assert!((0.0..MAX_STAR_OPACITY).contains(&star.opacity));
        }
    }

    #[test]
    fn paint_scales_unit_positions_to_viewport() {
        let field = Starfield {
            stars: vec![Star {
                x: 0.5,
                y: 0.25,
                size: 1.0,
                opacity: 0.4,
            }],
        };
        let mut list = DisplayList::new();

        field.paint(&mut list, &Viewport::new(800.0, 600.0));

        let DrawCommand::FillCircle { center, color, .. } = &list.commands()[0] else {
            panic!("expected a filled circle");
        };
        assert_eq!(*center, Point::new(400.0, 150.0));
        assert_eq!(color.a, 0.4);
    }
}
