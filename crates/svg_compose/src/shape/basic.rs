//! Single-primitive shape kinds.
//!
//! Every kind derives its geometry from `size`, the outer diameter (or side) of
//! the shape, centered on the instance position.
use std::f64::consts::PI;

use glam::DVec2;

use crate::shape::{Fill, Primitive, Shape};

/// Circle of diameter `size`. Also the registry fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct Circle;

impl Shape for Circle {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        vec![Primitive::circle(center, size / 2.0, fill.primary())]
    }

    fn description(&self) -> &str {
        "Circle with diameter equal to the size"
    }
}

/// Axis-aligned square, optionally with rounded corners (`corner_ratio` of the size).
#[derive(Debug, Clone, Copy, Default)]
pub struct Square {
    pub corner_ratio: Option<f64>,
}

impl Square {
    pub fn rounded(corner_ratio: f64) -> Self {
        Self {
            corner_ratio: Some(corner_ratio),
        }
    }
}

impl Shape for Square {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        vec![Primitive::Rect {
            origin: center - DVec2::splat(size / 2.0),
            width: size,
            height: size,
            corner_radius: self.corner_ratio.map(|r| size * r),
            fill: fill.primary().to_owned(),
        }]
    }

    fn description(&self) -> &str {
        if self.corner_ratio.is_some() {
            "Square with rounded corners"
        } else {
            "Square with side equal to the size"
        }
    }
}

/// Ellipse `size` wide and two thirds of `size` tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ellipse;

impl Shape for Ellipse {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        vec![Primitive::Ellipse {
            center,
            rx: size / 2.0,
            ry: size / 3.0,
            fill: fill.primary().to_owned(),
        }]
    }
}

/// Equilateral triangle with side `size`, pointing up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Triangle;

impl Shape for Triangle {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        let h = size * 3f64.sqrt() / 2.0;
        let points = vec![
            DVec2::new(center.x, center.y - h / 2.0),
            DVec2::new(center.x - size / 2.0, center.y + h / 2.0),
            DVec2::new(center.x + size / 2.0, center.y + h / 2.0),
        ];
        vec![Primitive::polygon(points, fill.primary())]
    }
}

/// Diamond (square rotated by 45 degrees) spanning `size` on both axes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diamond;

impl Shape for Diamond {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        let h = size / 2.0;
        let points = vec![
            DVec2::new(center.x, center.y - h),
            DVec2::new(center.x + h, center.y),
            DVec2::new(center.x, center.y + h),
            DVec2::new(center.x - h, center.y),
        ];
        vec![Primitive::polygon(points, fill.primary())]
    }
}

/// Regular polygon inscribed in a circle of diameter `size`.
#[derive(Debug, Clone, Copy)]
pub struct RegularPolygon {
    pub sides: u32,
    /// Angle of the first vertex in radians.
    pub phase: f64,
}

impl RegularPolygon {
    pub fn new(sides: u32, phase: f64) -> Self {
        Self {
            sides: sides.max(3),
            phase,
        }
    }

    pub fn hexagon() -> Self {
        Self::new(6, 0.0)
    }

    /// Pentagon with a vertex pointing up.
    pub fn pentagon() -> Self {
        Self::new(5, -PI / 2.0)
    }
}

impl Shape for RegularPolygon {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        let r = size / 2.0;
        let step = 2.0 * PI / self.sides as f64;
        let points = (0..self.sides)
            .map(|i| {
                let angle = step * i as f64 + self.phase;
                center + r * DVec2::new(angle.cos(), angle.sin())
            })
            .collect();
        vec![Primitive::polygon(points, fill.primary())]
    }
}

/// Star with `points` tips on a circle of diameter `size`.
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub points: u32,
    /// Inner radius as a fraction of `size`.
    pub inner_ratio: f64,
}

impl Default for Star {
    fn default() -> Self {
        Self {
            points: 5,
            inner_ratio: 0.2,
        }
    }
}

impl Shape for Star {
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive> {
        let outer = size / 2.0;
        let inner = size * self.inner_ratio;
        let vertices = self.points.max(2) * 2;
        let step = PI / self.points.max(2) as f64;
        let points = (0..vertices)
            .map(|i| {
                let r = if i % 2 == 0 { outer } else { inner };
                let angle = step * i as f64 - PI / 2.0;
                center + r * DVec2::new(angle.cos(), angle.sin())
            })
            .collect();
        vec![Primitive::polygon(points, fill.primary())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid() -> Fill {
        Fill::Solid("#123".into())
    }

    fn polygon_points(p: &Primitive) -> &[DVec2] {
        match p {
            Primitive::Polygon { points, .. } => points,
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn circle_radius_is_half_size() {
        let prims = Circle.primitives(DVec2::new(10.0, 20.0), 8.0, &solid());
        assert_eq!(prims, vec![Primitive::circle(DVec2::new(10.0, 20.0), 4.0, "#123")]);
    }

    #[test]
    fn rounded_square_uses_a_fifth_of_the_size() {
        let prims = Square::rounded(0.2).primitives(DVec2::ZERO, 10.0, &solid());
        match &prims[0] {
            Primitive::Rect {
                origin,
                corner_radius,
                ..
            } => {
                assert_eq!(*origin, DVec2::new(-5.0, -5.0));
                assert_eq!(*corner_radius, Some(2.0));
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn polygon_vertices_lie_on_the_circumcircle() {
        let center = DVec2::new(3.0, 4.0);
        for shape in [RegularPolygon::hexagon(), RegularPolygon::pentagon()] {
            let prims = shape.primitives(center, 20.0, &solid());
            let points = polygon_points(&prims[0]);
            assert_eq!(points.len(), shape.sides as usize);
            for p in points {
                assert!((p.distance(center) - 10.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn pentagon_points_up() {
        let prims = RegularPolygon::pentagon().primitives(DVec2::ZERO, 2.0, &solid());
        let first = polygon_points(&prims[0])[0];
        assert!(first.x.abs() < 1e-12);
        assert!((first.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn star_alternates_outer_and_inner_radii() {
        let prims = Star::default().primitives(DVec2::ZERO, 10.0, &solid());
        let points = polygon_points(&prims[0]);
        assert_eq!(points.len(), 10);
        assert!((points[0].length() - 5.0).abs() < 1e-9);
        assert!((points[1].length() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn single_color_kinds_use_first_palette_entry() {
        let fill = Fill::Palette(vec!["#a".into(), "#b".into()]);
        let prims = Triangle.primitives(DVec2::ZERO, 4.0, &fill);
        assert_eq!(prims[0].fill(), "#a");
    }
}
