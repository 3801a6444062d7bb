//! Multi-primitive ("composite") shape kinds.
//!
//! Composite kinds are rendered inside a `<g>` so a single rotation applies to
//! all their parts. Kinds that cut a hole use the second palette entry for the
//! cut-out when a palette fill is supplied, and white otherwise.
use std::fmt::Write;

use glam::DVec2;

use crate::shape::{Fill, Primitive, Shape};

const CUTOUT_COLOR: &str = "white";

/// Circle with an offset cut-out circle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crescent;

impl Shape for Crescent {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        let r = size / 2.0;
        vec![
            Primitive::circle(center, r, fill.primary()),
            Primitive::circle(
                center + DVec2::new(size / 4.0, 0.0),
                r,
                fill.secondary().unwrap_or(CUTOUT_COLOR),
            ),
        ]
    }

    fn is_composite(&self) -> bool {
        true
    }
}

/// Ring: a disc with a concentric cut-out of half its radius.
#[derive(Debug, Clone, Copy, Default)]
pub struct Donut;

impl Shape for Donut {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        vec![
            Primitive::circle(center, size / 2.0, fill.primary()),
            Primitive::circle(center, size / 4.0, fill.secondary().unwrap_or(CUTOUT_COLOR)),
        ]
    }

    fn is_composite(&self) -> bool {
        true
    }
}

/// Plus sign made of two bars a quarter of the size thick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cross;

impl Shape for Cross {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        let bar = size / 4.0;
        let color = fill.primary();
        vec![
            Primitive::centered_rect(center, bar, size, color),
            Primitive::centered_rect(center, size, bar, color),
        ]
    }

    fn is_composite(&self) -> bool {
        true
    }
}

/// Upward arrow: triangular head on a narrow shaft.
#[derive(Debug, Clone, Copy, Default)]
pub struct Arrow;

impl Shape for Arrow {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        let head_w = size / 3.0;
        let height = size / 2.0;
        let shaft_w = size / 6.0;
        let (x, y) = (center.x, center.y);
        let top = y - height / 2.0;
        let shoulder = top + head_w / 2.0;
        let bottom = y + height / 2.0;
        let points = vec![
            DVec2::new(x, top),
            DVec2::new(x + head_w / 2.0, shoulder),
            DVec2::new(x + shaft_w / 2.0, shoulder),
            DVec2::new(x + shaft_w / 2.0, bottom),
            DVec2::new(x - shaft_w / 2.0, bottom),
            DVec2::new(x - shaft_w / 2.0, shoulder),
            DVec2::new(x - head_w / 2.0, shoulder),
        ];
        vec![Primitive::polygon(points, fill.primary())]
    }

    fn is_composite(&self) -> bool {
        true
    }
}

/// Heart drawn as two cubic Bézier lobes on a 30-unit design grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heart;

impl Shape for Heart {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        let s = size / 30.0;
        let (x, y) = (center.x, center.y);
        let mut d = String::new();
        // Writing into a String cannot fail.
        let _ = write!(
            d,
            "M {} {} C {} {}, {} {}, {} {} C {} {}, {} {}, {} {} Z",
            x,
            y + 10.0 * s,
            x,
            y + 7.0 * s,
            x - 15.0 * s,
            y - 13.0 * s,
            x,
            y - 5.0 * s,
            x + 15.0 * s,
            y - 13.0 * s,
            x,
            y + 7.0 * s,
            x,
            y + 10.0 * s,
        );
        vec![Primitive::Path {
            d,
            fill: fill.primary().to_owned(),
        }]
    }

    fn is_composite(&self) -> bool {
        true
    }
}

/// Four overlapping puffs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cloud;

impl Shape for Cloud {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        let r = size / 4.0;
        let color = fill.primary();
        [
            DVec2::new(-size / 4.0, 0.0),
            DVec2::new(0.0, -size / 6.0),
            DVec2::new(size / 4.0, 0.0),
            DVec2::new(0.0, size / 6.0),
        ]
        .into_iter()
        .map(|offset| Primitive::circle(center + offset, r, color))
        .collect()
    }

    fn is_composite(&self) -> bool {
        true
    }
}

/// Concentric rings, outermost first, each with its own color.
#[derive(Debug, Clone)]
pub struct ConcentricCircles {
    /// Ring radii as fractions of `size`, outermost first.
    pub radii: Vec<f64>,
    /// Colors used when the fill supplies none.
    pub default_colors: Vec<String>,
    pub description: String,
}

impl Default for ConcentricCircles {
    fn default() -> Self {
        Self {
            radii: vec![0.5, 0.391, 0.25, 0.123],
            default_colors: ["#fec042", "#f27d39", "#2b2d42", "#fff7e4"]
                .into_iter()
                .map(String::from)
                .collect(),
            description: "Four concentric circles: yellow outer ring, orange middle, dark inner, light center".into(),
        }
    }
}

impl Shape for ConcentricCircles {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        let colors = fill.resolve(self.radii.len(), &self.default_colors);
        self.radii
            .iter()
            .zip(colors)
            .map(|(ratio, color)| Primitive::circle(center, size * ratio, color))
            .collect()
    }

    fn is_composite(&self) -> bool {
        true
    }

    fn description(&self) -> &str {
        &self.description
    }
}
