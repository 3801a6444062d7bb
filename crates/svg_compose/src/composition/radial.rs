//! Radial composition: points evenly spaced by angle around a center.
use std::f64::consts::TAU;

use glam::DVec2;

use crate::composition::{
    endpoint_progress, lerp, pick_fill, pick_shape, CompositionStrategy, Layout, ShapeInstance,
};
use crate::distribution::{Distribution, SelectionContext};
use crate::random::SeededRandom;
use crate::rules::{GenerationRules, Palette, RadiusMode, RotationMode, ShapeKindId};

/// Optional shape pinned at the radial center, drawn first.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterShape {
    pub kind: ShapeKindId,
    /// Defaults to the first palette color.
    pub color: Option<String>,
    pub size: f64,
}

/// `count` points on a circle (or a widening ring) at angle `start + 2π·i/count`.
#[derive(Debug, Clone)]
pub struct RadialComposition {
    pub count: u32,
    pub center: DVec2,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Fixed radius used by [`RadiusMode::Fixed`].
    pub radius: Option<f64>,
    /// With [`RadiusMode::Fixed`] and no fixed radius: draw the radius instead of using 80%.
    pub random_radius: bool,
    pub radius_mode: RadiusMode,
    /// Radians.
    pub start_angle: f64,
    pub center_shape: Option<CenterShape>,
    /// Base size; defaults to 40% of each point's radius.
    pub size: Option<f64>,
    pub size_variation: f64,
    pub size_by_radius: bool,
    pub rotation_mode: RotationMode,
    /// Degrees added to radial and tangent rotations.
    pub rotation_offset: f64,
    /// Degrees, used by [`RotationMode::Fixed`].
    pub rotation: f64,
    pub shape_distribution: Distribution,
    pub color_distribution: Distribution,
}

impl RadialComposition {
    pub fn from_rules(rules: &GenerationRules) -> Self {
        let p = &rules.params;
        let canvas = rules.canvas();
        let max_radius = p.max_radius.unwrap_or(canvas.min_side() * 0.4);
        Self {
            count: p.count.unwrap_or(8),
            center: DVec2::new(
                p.center_x.unwrap_or(canvas.width / 2.0),
                p.center_y.unwrap_or(canvas.height / 2.0),
            ),
            min_radius: p.min_radius.unwrap_or(0.0),
            max_radius,
            radius: p.radius,
            random_radius: p.random_radius.unwrap_or(false),
            radius_mode: p.radius_distribution.unwrap_or_default(),
            start_angle: p.start_angle.unwrap_or(0.0),
            center_shape: p.center_shape.clone().map(|kind| CenterShape {
                kind,
                color: p.center_color.clone(),
                size: p.center_size.unwrap_or(max_radius * 0.3),
            }),
            size: p.size,
            size_variation: p.size_variation.unwrap_or(0.3),
            size_by_radius: p.size_by_radius.unwrap_or(false),
            rotation_mode: p.rotation_type.unwrap_or_default(),
            rotation_offset: p.rotation_offset.unwrap_or(0.0),
            rotation: p.rotation.unwrap_or(0.0),
            shape_distribution: p.shape_distribution.unwrap_or_default(),
            color_distribution: p.color_distribution.unwrap_or_default(),
        }
    }

    fn radius_at(&self, i: usize, n: usize, rng: &mut SeededRandom) -> f64 {
        let t = endpoint_progress(i, n);
        match self.radius_mode {
            RadiusMode::Linear => lerp(self.min_radius, self.max_radius, t),
            // Exponential growth needs a positive start; otherwise grow linearly.
            RadiusMode::Exponential if self.min_radius > 0.0 && self.max_radius > 0.0 => {
                let steps = n.saturating_sub(1).max(1) as f64;
                let factor = (self.max_radius / self.min_radius).ln() / steps;
                self.min_radius * (factor * i as f64).exp()
            }
            RadiusMode::Exponential => lerp(self.min_radius, self.max_radius, t),
            RadiusMode::Fixed => match self.radius {
                Some(r) => r,
                None => {
                    let t = if self.random_radius {
                        rng.next_f64()
                    } else {
                        0.8
                    };
                    lerp(self.min_radius, self.max_radius, t)
                }
            },
        }
    }

    fn normalized_radius(&self, radius: f64) -> f64 {
        let span = self.max_radius - self.min_radius;
        if span > 0.0 {
            (radius - self.min_radius) / span
        } else {
            0.0
        }
    }
}

impl CompositionStrategy for RadialComposition {
    fn compose(&self, palette: &Palette, rng: &mut SeededRandom) -> Layout {
        let n = self.count as usize;
        let mut layout = Layout::with_capacity(n + 1);

        if let Some(center_shape) = &self.center_shape {
            let fill = match &center_shape.color {
                Some(color) => palette.fill_with(color),
                None => palette.fill(0),
            };
            layout.push(ShapeInstance {
                kind: center_shape.kind.clone(),
                center: self.center,
                size: center_shape.size,
                fill,
                rotation: 0.0,
            });
        }

        for i in 0..n {
            let angle = self.start_angle + TAU * i as f64 / n as f64;
            let radius = self.radius_at(i, n, rng);
            let center = self.center + radius * DVec2::new(angle.cos(), angle.sin());

            let ctx = SelectionContext::at(i)
                .with_radius(self.normalized_radius(radius))
                .with_progress(i as f64 / n as f64);
            let kind = pick_shape(palette, self.shape_distribution, &ctx, rng);
            let fill = pick_fill(palette, self.color_distribution, &ctx, rng);

            let base = self.size.unwrap_or(radius * 0.4);
            let size = if self.size_by_radius && self.max_radius > 0.0 {
                base * (radius / self.max_radius)
            } else {
                lerp(
                    base * (1.0 - self.size_variation),
                    base * (1.0 + self.size_variation),
                    rng.next_f64(),
                )
            };

            let rotation = match self.rotation_mode {
                RotationMode::Radial => angle.to_degrees() + self.rotation_offset,
                RotationMode::Tangent => angle.to_degrees() + 90.0 + self.rotation_offset,
                RotationMode::Random => 360.0 * rng.next_f64(),
                _ => self.rotation,
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
