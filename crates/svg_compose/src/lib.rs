#![forbid(unsafe_code)]
//! svg_compose: deterministic procedural SVG composition from declarative rules.
//!
//! Modules:
//! - random, distribution: the seeded sine stream and palette selection policies
//! - rules: generation rules, palettes, and the strategy parameter bag
//! - composition: the seven placement strategies (grid, radial, random, wave, spiral, cluster, fractal)
//! - shape: shape kinds, primitives, and the shape registry
//! - document, generator, events: SVG assembly, the `generate` entry points, progress events
//! - variation, batch: derived rule sets and parallel batch rendering
//! - brand: validation of rule requests against a brand policy
//!
//! For examples, see the README and the `svg_compose_examples` crate.
pub mod batch;
pub mod brand;
pub mod composition;
pub mod distribution;
pub mod document;
pub mod error;
pub mod events;
pub mod generator;
pub mod random;
pub mod rules;
pub mod shape;
pub mod variation;

pub use generator::{generate, generate_with};

/// Convenient re-exports for common types. Import with `use svg_compose::prelude::*;`.
pub mod prelude {
    pub use crate::batch::{plan_batch, render_batch};
    pub use crate::brand::{BrandColor, BrandConfig, BrandEntry, Dimensions, RuleRequest, SizeConstraints};
    pub use crate::composition::{
        compose, ClusterComposition, Composition, CompositionStrategy, DroppedShape,
        FractalComposition, GridComposition, Layout, RadialComposition, RandomComposition,
        ShapeInstance, SpiralComposition, WaveComposition,
    };
    pub use crate::distribution::{select_index, Distribution, SelectionContext};
    pub use crate::document::{Document, Metadata, Timestamp};
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, GenerationEvent, MultiSink, VecSink};
    pub use crate::generator::{generate, generate_with, GenerateConfig, Generator};
    pub use crate::random::SeededRandom;
    pub use crate::rules::{
        Canvas, GenerationRules, Palette, RadiusMode, RotationMode, ShapeKindId, SizeMode,
        StrategyParams,
    };
    pub use crate::shape::{Fill, Primitive, RenderedShape, Shape, ShapeRegistry};
    pub use crate::variation::{apply_variations, Perturbation, VariationSpec};
}
