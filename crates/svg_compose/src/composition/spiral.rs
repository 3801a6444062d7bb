//! Archimedean spiral composition.
use std::f64::consts::TAU;

use glam::DVec2;

use crate::composition::{lerp, pick_fill, pick_shape, CompositionStrategy, Layout, ShapeInstance};
use crate::distribution::{Distribution, SelectionContext};
use crate::random::SeededRandom;
use crate::rules::{GenerationRules, Palette, RotationMode, SizeMode};

/// `count` points at angle `2π·turns·i/count + rotation` and radius
/// `start_radius + spacing·angle/2π`.
#[derive(Debug, Clone)]
pub struct SpiralComposition {
    pub count: u32,
    pub center: DVec2,
    pub start_radius: f64,
    pub spacing: f64,
    /// Whole-spiral offset in degrees.
    pub rotation: f64,
    pub turns: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub size_mode: SizeMode,
    pub rotation_mode: RotationMode,
    /// Degrees added to [`RotationMode::Spiral`] orientation.
    pub rotation_offset: f64,
    /// Per-shape rotation used otherwise.
    pub shape_rotation: f64,
    pub shape_distribution: Distribution,
    pub color_distribution: Distribution,
}

impl SpiralComposition {
    pub fn from_rules(rules: &GenerationRules) -> Self {
        let p = &rules.params;
        let canvas = rules.canvas();
        Self {
            count: p.count.unwrap_or(30),
            center: DVec2::new(
                p.center_x.unwrap_or(canvas.width / 2.0),
                p.center_y.unwrap_or(canvas.height / 2.0),
            ),
            start_radius: p.start_radius.unwrap_or(20.0),
            spacing: p.spacing.unwrap_or(15.0),
            rotation: p.rotation.unwrap_or(0.0),
            turns: p.turns.unwrap_or(3.0),
            min_size: p.min_size.unwrap_or(10.0),
            max_size: p.max_size.unwrap_or(40.0),
            size_mode: p.size_distribution.unwrap_or_default(),
            rotation_mode: p.rotation_type.unwrap_or_default(),
            rotation_offset: p.rotation_offset.unwrap_or(0.0),
            shape_rotation: p.shape_rotation.unwrap_or(0.0),
            shape_distribution: p.shape_distribution.unwrap_or_default(),
            color_distribution: p.color_distribution.unwrap_or_default(),
        }
    }
}

impl CompositionStrategy for SpiralComposition {
    fn compose(&self, palette: &Palette, rng: &mut SeededRandom) -> Layout {
        let n = self.count as usize;
        let mut layout = Layout::with_capacity(n);
        let offset = self.rotation.to_radians();

        for i in 0..n {
            let progress = i as f64 / n as f64;
            let angle = TAU * self.turns * progress + offset;
            let radius = self.start_radius + self.spacing * angle / TAU;
            let center = self.center + radius * DVec2::new(angle.cos(), angle.sin());

            // Position along the spiral doubles as its radial coordinate.
            let ctx = SelectionContext::at(i)
                .with_progress(progress)
                .with_radius(progress);
            let kind = pick_shape(palette, self.shape_distribution, &ctx, rng);
            let fill = pick_fill(palette, self.color_distribution, &ctx, rng);

            let size = match self.size_mode {
                SizeMode::Increasing => lerp(self.min_size, self.max_size, progress),
                SizeMode::Decreasing => lerp(self.max_size, self.min_size, progress),
                _ => lerp(self.min_size, self.max_size, rng.next_f64()),
            };

            let rotation = match self.rotation_mode {
                RotationMode::Spiral => angle.to_degrees() + self.rotation_offset,
                RotationMode::Random => 360.0 * rng.next_f64(),
                _ => self.shape_rotation,
            };

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
