//! Composition strategies that place shape instances across the canvas.
//!
//! This module defines the [`CompositionStrategy`] trait, the [`Composition`]
//! name used by rule sets to pick a strategy, and the strategy output
//! ([`Layout`] of [`ShapeInstance`]s). Each strategy is built from a rule set
//! with all per-strategy defaults resolved, then run against a validated
//! [`Palette`] and a [`SeededRandom`] stream it owns for the duration of the run.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distribution::{select_index, Distribution, SelectionContext};
use crate::error::Result;
use crate::random::SeededRandom;
use crate::rules::{GenerationRules, Palette, ShapeKindId};
use crate::shape::Fill;

pub mod cluster;
pub mod fractal;
pub mod grid;
pub mod radial;
pub mod random;
pub mod spiral;
pub mod wave;

pub use cluster::ClusterComposition;
pub use fractal::FractalComposition;
pub use grid::GridComposition;
pub use radial::RadialComposition;
pub use random::RandomComposition;
pub use spiral::SpiralComposition;
pub use wave::WaveComposition;

/// Name of a composition strategy. Unknown names select [`Composition::Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Composition {
    #[default]
    Grid,
    Radial,
    Random,
    Wave,
    Spiral,
    Cluster,
    Fractal,
}

impl Composition {
    pub const ALL: [Composition; 7] = [
        Composition::Grid,
        Composition::Radial,
        Composition::Random,
        Composition::Wave,
        Composition::Spiral,
        Composition::Cluster,
        Composition::Fractal,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Radial => "radial",
            Self::Random => "random",
            Self::Wave => "wave",
            Self::Spiral => "spiral",
            Self::Cluster => "cluster",
            Self::Fractal => "fractal",
        }
    }

    /// Build the strategy for `rules`, resolving its parameter defaults.
    pub fn strategy(&self, rules: &GenerationRules) -> Box<dyn CompositionStrategy> {
        match self {
            Self::Grid => Box::new(GridComposition::from_rules(rules)),
            Self::Radial => Box::new(RadialComposition::from_rules(rules)),
            Self::Random => Box::new(RandomComposition::from_rules(rules)),
            Self::Wave => Box::new(WaveComposition::from_rules(rules)),
            Self::Spiral => Box::new(SpiralComposition::from_rules(rules)),
            Self::Cluster => Box::new(ClusterComposition::from_rules(rules)),
            Self::Fractal => Box::new(FractalComposition::from_rules(rules)),
        }
    }
}

impl From<&str> for Composition {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl From<String> for Composition {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Composition> for String {
    fn from(value: Composition) -> Self {
        value.as_str().to_owned()
    }
}

impl std::fmt::Display for Composition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One placed shape prior to rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeInstance {
    pub kind: ShapeKindId,
    pub center: DVec2,
    /// Characteristic dimension (outer diameter or side).
    pub size: f64,
    pub fill: Fill,
    /// Degrees about the instance center.
    pub rotation: f64,
}

/// An instance a strategy gave up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedShape {
    /// Position of the instance in the strategy's generation order.
    pub index: usize,
    /// Placement attempts spent before giving up.
    pub attempts: u32,
}

/// Output of one strategy run, in generation (z-)order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub instances: Vec<ShapeInstance>,
    pub dropped: Vec<DroppedShape>,
}

impl Layout {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            instances: Vec::with_capacity(n),
            dropped: Vec::new(),
        }
    }

    pub fn push(&mut self, instance: ShapeInstance) {
        self.instances.push(instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// A composition strategy.
pub trait CompositionStrategy: Send + Sync {
    /// Place instances; deterministic given the state of `rng` at entry.
    fn compose(&self, palette: &Palette, rng: &mut SeededRandom) -> Layout;
}

/// Validate `rules`, then run the strategy it names with a fresh stream seeded from `rules.seed`.
pub fn compose(rules: &GenerationRules) -> Result<Layout> {
    rules.validate()?;
    let palette = rules.palette()?;
    let mut rng = SeededRandom::new(rules.seed);
    Ok(rules.composition.strategy(rules).compose(&palette, &mut rng))
}

#[inline]
pub(crate) fn pick_shape(
    palette: &Palette,
    policy: Distribution,
    ctx: &SelectionContext,
    rng: &mut SeededRandom,
) -> ShapeKindId {
    let i = select_index(policy, palette.shapes().len(), ctx, rng);
    palette.shape(i).to_owned()
}

#[inline]
pub(crate) fn pick_fill(
    palette: &Palette,
    policy: Distribution,
    ctx: &SelectionContext,
    rng: &mut SeededRandom,
) -> Fill {
    let i = select_index(policy, palette.colors().len(), ctx, rng);
    palette.fill(i)
}

/// `i / (n - 1)`, or 0 when there is a single point.
#[inline]
pub(crate) fn endpoint_progress(i: usize, n: usize) -> f64 {
    if n > 1 {
        i as f64 / (n - 1) as f64
    } else {
        0.0
    }
}

/// Map a [0, 1] value linearly onto `[min, max]`.
#[inline]
pub(crate) fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min + (max - min) * t
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn rules(composition: Composition, shapes: &[&str], colors: &[&str]) -> GenerationRules {
        GenerationRules::new(
            800.0,
            600.0,
            composition,
            shapes.iter().map(|s| s.to_string()).collect(),
            colors.iter().map(|s| s.to_string()).collect(),
        )
        .with_seed(1234)
    }

    pub fn run(strategy: &dyn CompositionStrategy, rules: &GenerationRules) -> Layout {
        let palette = rules.palette().expect("valid palette");
        let mut rng = SeededRandom::new(rules.seed);
        strategy.compose(&palette, &mut rng)
    }
}
