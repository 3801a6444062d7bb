//! Cluster composition: groups of shapes scattered around random centers.
use std::f64::consts::TAU;

use glam::DVec2;

use crate::composition::{lerp, pick_fill, pick_shape, CompositionStrategy, Layout, ShapeInstance};
use crate::distribution::{Distribution, SelectionContext};
use crate::random::SeededRandom;
use crate::rules::{Canvas, GenerationRules, Palette, SizeMode};

/// Probability that a clustered shape takes its cluster's dominant shape or color.
pub const DOMINANT_PROBABILITY: f64 = 0.8;

/// `cluster_count` centers in a rectangle padded by the cluster radius, each
/// surrounded by `shapes_per_cluster` shapes at a uniform angle and a
/// uniform-in-radius distance.
#[derive(Debug, Clone)]
pub struct ClusterComposition {
    pub canvas: Canvas,
    pub cluster_count: u32,
    pub shapes_per_cluster: u32,
    pub cluster_radius: f64,
    /// Pin a dominant shape per cluster.
    pub cluster_shapes: bool,
    /// Pin a dominant color per cluster.
    pub cluster_colors: bool,
    pub min_size: f64,
    pub max_size: f64,
    pub size_mode: SizeMode,
    pub enable_rotation: bool,
    pub shape_distribution: Distribution,
    pub color_distribution: Distribution,
}

impl ClusterComposition {
    pub fn from_rules(rules: &GenerationRules) -> Self {
        let p = &rules.params;
        Self {
            canvas: rules.canvas(),
            cluster_count: p.cluster_count.unwrap_or(3),
            shapes_per_cluster: p.shapes_per_cluster.unwrap_or(10),
            cluster_radius: p.cluster_radius.unwrap_or(100.0),
            cluster_shapes: p.cluster_shapes.unwrap_or(false),
            cluster_colors: p.cluster_colors.unwrap_or(false),
            min_size: p.min_size.unwrap_or(10.0),
            max_size: p.max_size.unwrap_or(50.0),
            size_mode: p.size_distribution.unwrap_or_default(),
            enable_rotation: p.enable_rotation.unwrap_or(false),
            shape_distribution: p.shape_distribution.unwrap_or_default(),
            color_distribution: p.color_distribution.unwrap_or_default(),
        }
    }

    fn cluster_centers(&self, rng: &mut SeededRandom) -> Vec<DVec2> {
        let half = (self.canvas.min_side() / 2.0).max(0.0);
        let padding = self.cluster_radius.max(0.0).min(half);
        (0..self.cluster_count)
            .map(|_| {
                let x = padding + rng.next_f64() * (self.canvas.width - 2.0 * padding);
                let y = padding + rng.next_f64() * (self.canvas.height - 2.0 * padding);
                DVec2::new(x, y)
            })
            .collect()
    }
}

impl CompositionStrategy for ClusterComposition {
    fn compose(&self, palette: &Palette, rng: &mut SeededRandom) -> Layout {
        let per_cluster = self.shapes_per_cluster as usize;
        let centers = self.cluster_centers(rng);
        let mut layout = Layout::with_capacity(centers.len() * per_cluster);

        for (c, &cluster_center) in centers.iter().enumerate() {
            for i in 0..per_cluster {
                let t = rng.next_f64();
                let distance = t * self.cluster_radius;
                let angle = rng.next_f64() * TAU;
                let center = cluster_center + distance * DVec2::new(angle.cos(), angle.sin());

                let ctx = SelectionContext::at(c * per_cluster + i).with_distance(t);
                let kind = if self.cluster_shapes && rng.chance(DOMINANT_PROBABILITY) {
                    palette.shape(c).to_owned()
                } else {
                    pick_shape(palette, self.shape_distribution, &ctx, rng)
                };
                let fill = if self.cluster_colors && rng.chance(DOMINANT_PROBABILITY) {
                    palette.fill(c)
                } else {
                    pick_fill(palette, self.color_distribution, &ctx, rng)
                };

                let size = match self.size_mode {
                    SizeMode::Distance => lerp(self.max_size, self.min_size, t),
                    _ => lerp(self.min_size, self.max_size, rng.next_f64()),
                };
                let rotation = if self.enable_rotation {
                    360.0 * rng.next_f64()
                } else {
                    0.0
                };

                layout.push(ShapeInstance {
                    kind,
                    center,
                    size,
                    fill,
                    rotation,
                });
            }
        }

        layout
    }
}
