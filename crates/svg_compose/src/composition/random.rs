//! Random scatter inside a padded rectangle, with optional collision avoidance.
use std::f64::consts::TAU;

use glam::DVec2;

use crate::composition::{
    lerp, pick_fill, pick_shape, CompositionStrategy, DroppedShape, Layout, ShapeInstance,
};
use crate::distribution::{Distribution, SelectionContext};
use crate::random::SeededRandom;
use crate::rules::{Canvas, GenerationRules, Palette, SizeMode};

/// Scatters `count` shapes uniformly in `[padding, side - padding]` on both axes.
///
/// With `avoid_overlap`, each candidate position is rejected while it sits
/// closer to an accepted shape than the sum of both half-sizes plus
/// `min_distance`. A shape that exhausts `max_attempts` is dropped and recorded
/// in [`Layout::dropped`].
#[derive(Debug, Clone)]
pub struct RandomComposition {
    pub canvas: Canvas,
    pub count: u32,
    /// Clamped to half the smaller canvas side.
    pub padding: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub size_mode: SizeMode,
    pub enable_rotation: bool,
    pub avoid_overlap: bool,
    /// At least one attempt is always made.
    pub max_attempts: u32,
    /// Extra gap between accepted shapes.
    pub min_distance: f64,
    pub shape_distribution: Distribution,
    pub color_distribution: Distribution,
}

impl RandomComposition {
    pub fn from_rules(rules: &GenerationRules) -> Self {
        let p = &rules.params;
        let canvas = rules.canvas();
        Self {
            canvas,
            count: p.count.unwrap_or(20),
            padding: p
                .padding
                .unwrap_or(50.0)
                .max(0.0)
                .min((canvas.min_side() / 2.0).max(0.0)),
            min_size: p.min_size.unwrap_or(20.0),
            max_size: p.max_size.unwrap_or(80.0),
            size_mode: p.size_distribution.unwrap_or_default(),
            enable_rotation: p.enable_rotation.unwrap_or(false),
            avoid_overlap: p.avoid_overlap.unwrap_or(false),
            max_attempts: p.max_placement_attempts.unwrap_or(50).max(1),
            min_distance: p.min_distance.unwrap_or(5.0),
            shape_distribution: p.shape_distribution.unwrap_or_default(),
            color_distribution: p.color_distribution.unwrap_or_default(),
        }
    }

    fn sample_size(&self, rng: &mut SeededRandom) -> f64 {
        let (min, max) = (self.min_size, self.max_size);
        match self.size_mode {
            SizeMode::Normal => {
                // Box-Muller; ln(0) would be -inf.
                let u1 = rng.next_f64().max(f64::MIN_POSITIVE);
                let u2 = rng.next_f64();
                let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
                let mean = (min + max) / 2.0;
                let std = (max - min) / 6.0;
                (mean + z * std).clamp(min.min(max), max.max(min))
            }
            SizeMode::Bimodal => {
                if rng.chance(0.5) {
                    min + rng.next_f64() * (max - min) * 0.3
                } else {
                    max - rng.next_f64() * (max - min) * 0.3
                }
            }
            _ => lerp(min, max, rng.next_f64()),
        }
    }

    fn sample_position(&self, rng: &mut SeededRandom) -> DVec2 {
        let x = self.padding + rng.next_f64() * (self.canvas.width - 2.0 * self.padding);
        let y = self.padding + rng.next_f64() * (self.canvas.height - 2.0 * self.padding);
        DVec2::new(x, y)
    }

    fn collides(&self, candidate: DVec2, size: f64, placed: &[(DVec2, f64)]) -> bool {
        placed.iter().any(|&(center, other)| {
            candidate.distance(center) < size / 2.0 + other / 2.0 + self.min_distance
        })
    }
}

impl CompositionStrategy for RandomComposition {
    fn compose(&self, palette: &Palette, rng: &mut SeededRandom) -> Layout {
        let n = self.count as usize;
        let mut layout = Layout::with_capacity(n);
        let mut placed: Vec<(DVec2, f64)> = Vec::new();

        for i in 0..n {
            let ctx = SelectionContext::at(i);
            let kind = pick_shape(palette, self.shape_distribution, &ctx, rng);
            let fill = pick_fill(palette, self.color_distribution, &ctx, rng);
            let size = self.sample_size(rng);
            let rotation = if self.enable_rotation {
                360.0 * rng.next_f64()
            } else {
                0.0
            };

            let mut attempts = 0;
            let mut position = None;
            while attempts < self.max_attempts {
                attempts += 1;
                let candidate = self.sample_position(rng);
                if !self.avoid_overlap || !self.collides(candidate, size, &placed) {
                    position = Some(candidate);
                    break;
                }
            }

            let Some(center) = position else {
                layout.dropped.push(DroppedShape { index: i, attempts });
                continue;
            };
            if self.avoid_overlap {
                placed.push((center, size));
            }
            layout.push(ShapeInstance {
                kind,
                center,
                size,
                fill,
                rotation,
            });
        }

        layout
    }
}
