//! Shape rendering: the [`Shape`] capability and the [`ShapeRegistry`].
//!
//! This module defines how an abstract (kind, center, size, fill, rotation)
//! tuple becomes SVG primitives:
//! - Implement [`Shape`] for a new kind and register it under an identifier.
//! - Look kinds up through [`ShapeRegistry`]; unknown identifiers render as circles.
//! - Built-in kinds live in [`basic`] (single primitive) and [`composite`] (grouped).
//!
//! Rendering is pure: no IO and no randomness. Any random choice about a
//! shape's fill is made by the strategy before rendering.
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use glam::DVec2;
use tracing::warn;

pub mod basic;
pub mod composite;
pub mod primitive;

pub use primitive::{Primitive, RenderedShape, Rotation};

/// Identifier of the kind unknown identifiers fall back to.
pub const FALLBACK_SHAPE: &str = "circle";

/// Color specification handed to a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(String),
    /// Ordered colors for multi-color kinds.
    Palette(Vec<String>),
}

impl Fill {
    /// First color, used by single-color kinds. An empty palette paints black.
    pub fn primary(&self) -> &str {
        match self {
            Fill::Solid(c) => c,
            Fill::Palette(colors) => colors.first().map(String::as_str).unwrap_or("black"),
        }
    }

    /// Second palette color, if any. Solid fills have none.
    pub fn secondary(&self) -> Option<&str> {
        match self {
            Fill::Solid(_) => None,
            Fill::Palette(colors) => colors.get(1).map(String::as_str),
        }
    }

    /// Exactly `n` colors for a multi-color kind.
    ///
    /// A solid fill paints every part. A palette is truncated to `n` entries, or
    /// backfilled by repeating its last color. An empty palette uses `defaults`
    /// (themselves backfilled the same way).
    pub fn resolve(&self, n: usize, defaults: &[String]) -> Vec<String> {
        let supplied: &[String] = match self {
            Fill::Solid(c) => return vec![c.clone(); n],
            Fill::Palette(colors) if !colors.is_empty() => colors,
            Fill::Palette(_) => defaults,
        };
        match supplied.last() {
            Some(last) => (0..n)
                .map(|i| supplied.get(i).unwrap_or(last).clone())
                .collect(),
            None => vec!["black".to_owned(); n],
        }
    }
}

impl From<&str> for Fill {
    fn from(value: &str) -> Self {
        Fill::Solid(value.to_owned())
    }
}

/// A renderable shape kind.
pub trait Shape: Send + Sync {
    /// Primitives for a shape of characteristic dimension `size` centered on `center`.
    fn primitives(&self, center: DVec2, size: f64, fill: &Fill) -> Vec<Primitive>;

    /// Composite kinds are wrapped in a group carrying the rotation.
    fn is_composite(&self) -> bool {
        false
    }

    fn description(&self) -> &str {
        ""
    }
}

/// Registry mapping shape-kind identifiers to [`Shape`] implementations.
#[non_exhaustive]
pub struct ShapeRegistry {
    shapes: HashMap<String, Arc<dyn Shape>>,
}

impl ShapeRegistry {
    /// Creates a new, empty [`ShapeRegistry`]. Lookups still fall back to a circle.
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
        }
    }

    /// Registry with every built-in kind.
    pub fn with_builtin_shapes() -> Self {
        let mut registry = Self::new();
        registry.register("circle", basic::Circle);
        registry.register("rect", basic::Square::default());
        registry.register("roundedRect", basic::Square::rounded(0.2));
        registry.register("ellipse", basic::Ellipse);
        registry.register("triangle", basic::Triangle);
        registry.register("diamond", basic::Diamond);
        registry.register("hexagon", basic::RegularPolygon::hexagon());
        registry.register("pentagon", basic::RegularPolygon::pentagon());
        registry.register("star", basic::Star::default());
        registry.register("crescent", composite::Crescent);
        registry.register("donut", composite::Donut);
        registry.register("cross", composite::Cross);
        registry.register("arrow", composite::Arrow);
        registry.register("heart", composite::Heart);
        registry.register("cloud", composite::Cloud);
        let concentric: Arc<dyn Shape> = Arc::new(composite::ConcentricCircles::default());
        registry.register_arc("concentricCircles", Arc::clone(&concentric));
        registry.register_arc("concentricCircles1", concentric);
        registry
    }

    /// Process-wide registry of built-in kinds, built on first use.
    pub fn builtin() -> &'static ShapeRegistry {
        static BUILTIN: OnceLock<ShapeRegistry> = OnceLock::new();
        BUILTIN.get_or_init(ShapeRegistry::with_builtin_shapes)
    }

    /// Returns the number of registered kinds.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if there are no registered kinds.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Registers a kind, replacing any previous kind with the same identifier.
    pub fn register<S>(&mut self, id: impl Into<String>, shape: S)
    where
        S: Shape + 'static,
    {
        self.shapes.insert(id.into(), Arc::new(shape));
    }

    /// Registers a kind using an [`Arc`].
    pub fn register_arc(&mut self, id: impl Into<String>, shape: Arc<dyn Shape + 'static>) {
        self.shapes.insert(id.into(), shape);
    }

    /// Extends the registry with the kinds of another registry.
    pub fn extend_from(&mut self, other: &ShapeRegistry) {
        for (k, v) in other.shapes.iter() {
            self.shapes.insert(k.clone(), v.clone());
        }
    }

    /// Unregisters a kind. Returns `true` if it was present.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.shapes.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.shapes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Shape>> {
        self.shapes.get(id).cloned()
    }

    /// Registered identifiers in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.shapes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Render one shape. Unknown kinds render as [`FALLBACK_SHAPE`].
    pub fn render(
        &self,
        kind: &str,
        center: DVec2,
        size: f64,
        fill: &Fill,
        rotation: f64,
    ) -> RenderedShape {
        let size = size.max(0.0);
        let rotation = Rotation::about(rotation, center);
        let render_with = |shape: &dyn Shape| RenderedShape {
            primitives: shape.primitives(center, size, fill),
            rotation,
            grouped: shape.is_composite(),
        };

        if let Some(shape) = self.shapes.get(kind) {
            return render_with(shape.as_ref());
        }
        warn!("Unknown shape kind '{}'; rendering as '{}'.", kind, FALLBACK_SHAPE);
        match self.shapes.get(FALLBACK_SHAPE) {
            Some(shape) => render_with(shape.as_ref()),
            None => render_with(&basic::Circle),
        }
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
