//! Fractal composition: each shape spawns a ring of smaller children.
use std::f64::consts::TAU;

use glam::DVec2;

use crate::composition::{pick_fill, pick_shape, CompositionStrategy, Layout, ShapeInstance};
use crate::distribution::{Distribution, SelectionContext};
use crate::random::SeededRandom;
use crate::rules::{GenerationRules, Palette};

/// Children per node when no explicit count is set.
const ROOT_CHILDREN: u32 = 5;
const INNER_CHILDREN: u32 = 3;

/// Depth-bounded tree of shapes. A node at `size` places its children on a
/// circle of radius `size·distance_factor`, at `size·scale_factor`, evenly
/// spaced starting at angle zero. Output is in pre-order.
#[derive(Debug, Clone)]
pub struct FractalComposition {
    pub center: DVec2,
    pub max_depth: u32,
    pub initial_size: f64,
    pub scale_factor: f64,
    pub distance_factor: f64,
    /// Fixed child count for every node; `None` uses 5 at the root and 3 below.
    pub child_count: Option<u32>,
    /// Key the shape palette by depth.
    pub depth_shapes: bool,
    /// Key the color palette by depth.
    pub depth_colors: bool,
    pub shape_distribution: Distribution,
    pub color_distribution: Distribution,
}

impl FractalComposition {
    pub fn from_rules(rules: &GenerationRules) -> Self {
        let p = &rules.params;
        let canvas = rules.canvas();
        Self {
            center: DVec2::new(
                p.center_x.unwrap_or(canvas.width / 2.0),
                p.center_y.unwrap_or(canvas.height / 2.0),
            ),
            max_depth: p.max_depth.unwrap_or(4),
            initial_size: p.initial_size.unwrap_or(canvas.min_side() * 0.4),
            scale_factor: p.scale_factor.unwrap_or(0.5),
            distance_factor: p.distance_factor.unwrap_or(0.8),
            child_count: p.child_count,
            depth_shapes: p.depth_shapes.unwrap_or(false),
            depth_colors: p.depth_colors.unwrap_or(false),
            shape_distribution: p.shape_distribution.unwrap_or_default(),
            color_distribution: p.color_distribution.unwrap_or_default(),
        }
    }

    pub fn children_at(&self, depth: u32) -> u32 {
        match self.child_count {
            Some(n) => n,
            None if depth == 0 => ROOT_CHILDREN,
            None => INNER_CHILDREN,
        }
    }

    /// Number of shapes the tree produces.
    pub fn node_count(&self) -> usize {
        let mut total = 0usize;
        let mut level = 1usize;
        for depth in 0..=self.max_depth {
            total = total.saturating_add(level);
            level = level.saturating_mul(self.children_at(depth) as usize);
        }
        total
    }
}

impl CompositionStrategy for FractalComposition {
    fn compose(&self, palette: &Palette, rng: &mut SeededRandom) -> Layout {
        let mut layout = Layout::with_capacity(self.node_count().min(1 << 16));
        let mut stack = vec![(self.center, self.initial_size, 0u32)];

        while let Some((center, size, depth)) = stack.pop() {
            let ctx = SelectionContext::at(layout.len());
            let depth_ctx = SelectionContext::at(depth as usize);
            let kind = if self.depth_shapes {
                pick_shape(palette, Distribution::Sequence, &depth_ctx, rng)
            } else {
                pick_shape(palette, self.shape_distribution, &ctx, rng)
            };
            let fill = if self.depth_colors {
                pick_fill(palette, Distribution::Sequence, &depth_ctx, rng)
            } else {
                pick_fill(palette, self.color_distribution, &ctx, rng)
            };
            layout.push(ShapeInstance {
                kind,
                center,
                size,
                fill,
                rotation: 0.0,
            });

            if depth >= self.max_depth {
                continue;
            }
            let n = self.children_at(depth);
            let distance = size * self.distance_factor;
            let child_size = size * self.scale_factor;
            // Reversed so the first child is popped next.
            for i in (0..n).rev() {
                let angle = TAU * i as f64 / n as f64;
                let child = center + distance * DVec2::new(angle.cos(), angle.sin());
                stack.push((child, child_size, depth + 1));
            }
        }

        layout
    }
}
