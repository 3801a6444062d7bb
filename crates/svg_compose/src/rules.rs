//! Generation rules: the immutable input of one generation call.
//!
//! [`GenerationRules`] carries the canvas, the composition name, the seed, the
//! shape and color palettes, and a flat [`StrategyParams`] bag whose fields each
//! strategy interprets (missing fields take per-strategy defaults). The same
//! field name can mean slightly different things to different strategies, e.g.
//! `rotation` is the fixed per-shape rotation for radial and wave but the
//! whole-spiral offset for spiral.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::composition::Composition;
use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::shape::Fill;

pub type ShapeKindId = String;

/// Canvas dimensions in user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Validated, non-empty shape and color palettes.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    shapes: Vec<ShapeKindId>,
    colors: Vec<String>,
    palette_fill: bool,
}

impl Palette {
    /// Build a palette; both lists must be non-empty.
    pub fn new(shapes: Vec<ShapeKindId>, colors: Vec<String>) -> Result<Self> {
        if shapes.is_empty() {
            return Err(Error::InvalidRules("shape list is empty".into()));
        }
        if colors.is_empty() {
            return Err(Error::InvalidRules("color list is empty".into()));
        }
        Ok(Self {
            shapes,
            colors,
            palette_fill: false,
        })
    }

    /// Hand composite shapes the whole palette instead of a single color.
    pub fn with_palette_fill(mut self, palette_fill: bool) -> Self {
        self.palette_fill = palette_fill;
        self
    }

    pub fn shapes(&self) -> &[ShapeKindId] {
        &self.shapes
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn shape(&self, index: usize) -> &str {
        &self.shapes[index % self.shapes.len()]
    }

    pub fn color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    /// Fill for the color at `index`; with palette fill enabled the whole palette,
    /// rotated so that the selected color comes first.
    pub fn fill(&self, index: usize) -> Fill {
        let index = index % self.colors.len();
        if self.palette_fill {
            let rotated = self.colors[index..]
                .iter()
                .chain(self.colors[..index].iter())
                .cloned()
                .collect();
            Fill::Palette(rotated)
        } else {
            Fill::Solid(self.colors[index].clone())
        }
    }

    /// Fill for an explicit color value (dominant cluster colors, center shapes).
    pub fn fill_with(&self, color: &str) -> Fill {
        match self.colors.iter().position(|c| c == color) {
            Some(i) => self.fill(i),
            None => Fill::Solid(color.to_owned()),
        }
    }
}

/// Size distribution mode. Each strategy honors the modes it knows and treats
/// the rest as [`SizeMode::Random`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub enum SizeMode {
    #[default]
    Random,
    Uniform,
    Normal,
    Bimodal,
    Wave,
    Progress,
    Increasing,
    Decreasing,
    Distance,
}

impl SizeMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "random" => Some(Self::Random),
            "uniform" => Some(Self::Uniform),
            "normal" => Some(Self::Normal),
            "bimodal" => Some(Self::Bimodal),
            "wave" => Some(Self::Wave),
            "progress" => Some(Self::Progress),
            "increasing" => Some(Self::Increasing),
            "decreasing" => Some(Self::Decreasing),
            "distance" => Some(Self::Distance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Uniform => "uniform",
            Self::Normal => "normal",
            Self::Bimodal => "bimodal",
            Self::Wave => "wave",
            Self::Progress => "progress",
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Distance => "distance",
        }
    }
}

impl From<String> for SizeMode {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

impl From<SizeMode> for String {
    fn from(value: SizeMode) -> Self {
        value.as_str().to_owned()
    }
}

/// Per-shape rotation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub enum RotationMode {
    /// Fixed angle from the parameter bag (0 when absent).
    #[default]
    Fixed,
    Random,
    /// Aligned with the ray from the radial center.
    Radial,
    /// Perpendicular to the radial ray.
    Tangent,
    /// Following the slope of the wave.
    Wave,
    /// Following the spiral angle.
    Spiral,
}

impl RotationMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "fixed" => Some(Self::Fixed),
            "random" => Some(Self::Random),
            "radial" => Some(Self::Radial),
            "tangent" => Some(Self::Tangent),
            "wave" => Some(Self::Wave),
            "spiral" => Some(Self::Spiral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Random => "random",
            Self::Radial => "radial",
            Self::Tangent => "tangent",
            Self::Wave => "wave",
            Self::Spiral => "spiral",
        }
    }
}

impl From<String> for RotationMode {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

impl From<RotationMode> for String {
    fn from(value: RotationMode) -> Self {
        value.as_str().to_owned()
    }
}

/// How the radial strategy spreads radii over its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub enum RadiusMode {
    /// A fixed `radius`, or a random / 80% point between min and max.
    #[default]
    Fixed,
    Linear,
    Exponential,
}

impl RadiusMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "fixed" => Some(Self::Fixed),
            "linear" => Some(Self::Linear),
            "exponential" => Some(Self::Exponential),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Linear => "linear",
            Self::Exponential => "exponential",
        }
    }
}

impl From<String> for RadiusMode {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

impl From<RadiusMode> for String {
    fn from(value: RadiusMode) -> Self {
        value.as_str().to_owned()
    }
}

/// Strategy-specific parameter bag. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct StrategyParams {
    // Palette policies shared by most strategies.
    pub shape_distribution: Option<Distribution>,
    pub color_distribution: Option<Distribution>,
    pub palette_fill: Option<bool>,

    // Sizes and rotation.
    pub size: Option<f64>,
    pub min_size: Option<f64>,
    pub max_size: Option<f64>,
    pub size_variation: Option<f64>,
    pub size_distribution: Option<SizeMode>,
    pub enable_rotation: Option<bool>,
    pub rotation_type: Option<RotationMode>,
    pub rotation: Option<f64>,
    pub rotation_offset: Option<f64>,
    pub shape_rotation: Option<f64>,

    // Grid.
    pub rows: Option<u32>,
    pub cols: Option<u32>,
    pub sparsity: Option<f64>,
    pub padding: Option<f64>,

    // Point counts and centers.
    pub count: Option<u32>,
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,

    // Radial.
    pub min_radius: Option<f64>,
    pub max_radius: Option<f64>,
    pub radius: Option<f64>,
    pub random_radius: Option<bool>,
    pub radius_distribution: Option<RadiusMode>,
    pub start_angle: Option<f64>,
    pub size_by_radius: Option<bool>,
    pub center_shape: Option<ShapeKindId>,
    pub center_color: Option<String>,
    pub center_size: Option<f64>,

    // Random scatter.
    pub avoid_overlap: Option<bool>,
    pub max_placement_attempts: Option<u32>,
    pub min_distance: Option<f64>,

    // Wave.
    pub waves: Option<f64>,
    pub wave_height: Option<f64>,
    pub padding_x: Option<f64>,
    pub phase_shift: Option<f64>,

    // Spiral.
    pub start_radius: Option<f64>,
    pub spacing: Option<f64>,
    pub turns: Option<f64>,

    // Cluster.
    pub cluster_count: Option<u32>,
    pub shapes_per_cluster: Option<u32>,
    pub cluster_radius: Option<f64>,
    pub cluster_shapes: Option<bool>,
    pub cluster_colors: Option<bool>,

    // Fractal.
    pub max_depth: Option<u32>,
    pub initial_size: Option<f64>,
    pub scale_factor: Option<f64>,
    pub child_count: Option<u32>,
    pub distance_factor: Option<f64>,
    pub depth_shapes: Option<bool>,
    pub depth_colors: Option<bool>,
}

/// Mutable handle to a named numeric parameter.
#[derive(Debug)]
pub enum NumericField<'a> {
    Real(&'a mut Option<f64>),
    Count(&'a mut Option<u32>),
}

impl StrategyParams {
    /// Look up a numeric parameter by its rule-file (camelCase) name.
    pub fn numeric_field_mut(&mut self, name: &str) -> Option<NumericField<'_>> {
        use NumericField::{Count, Real};
        let field = match name {
            "size" => Real(&mut self.size),
            "minSize" => Real(&mut self.min_size),
            "maxSize" => Real(&mut self.max_size),
            "sizeVariation" => Real(&mut self.size_variation),
            "rotation" => Real(&mut self.rotation),
            "rotationOffset" => Real(&mut self.rotation_offset),
            "shapeRotation" => Real(&mut self.shape_rotation),
            "rows" => Count(&mut self.rows),
            "cols" => Count(&mut self.cols),
            "sparsity" => Real(&mut self.sparsity),
            "padding" => Real(&mut self.padding),
            "count" => Count(&mut self.count),
            "centerX" => Real(&mut self.center_x),
            "centerY" => Real(&mut self.center_y),
            "minRadius" => Real(&mut self.min_radius),
            "maxRadius" => Real(&mut self.max_radius),
            "radius" => Real(&mut self.radius),
            "startAngle" => Real(&mut self.start_angle),
            "centerSize" => Real(&mut self.center_size),
            "maxPlacementAttempts" => Count(&mut self.max_placement_attempts),
            "minDistance" => Real(&mut self.min_distance),
            "waves" => Real(&mut self.waves),
            "waveHeight" => Real(&mut self.wave_height),
            "paddingX" => Real(&mut self.padding_x),
            "phaseShift" => Real(&mut self.phase_shift),
            "startRadius" => Real(&mut self.start_radius),
            "spacing" => Real(&mut self.spacing),
            "turns" => Real(&mut self.turns),
            "clusterCount" => Count(&mut self.cluster_count),
            "shapesPerCluster" => Count(&mut self.shapes_per_cluster),
            "clusterRadius" => Real(&mut self.cluster_radius),
            "maxDepth" => Count(&mut self.max_depth),
            "initialSize" => Real(&mut self.initial_size),
            "scaleFactor" => Real(&mut self.scale_factor),
            "childCount" => Count(&mut self.child_count),
            "distanceFactor" => Real(&mut self.distance_factor),
            _ => return None,
        };
        Some(field)
    }
}

/// Immutable input of one generation call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct GenerationRules {
    pub width: f64,
    pub height: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub composition: Composition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: i64,
    pub shapes: Vec<ShapeKindId>,
    pub colors: Vec<String>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub params: StrategyParams,
}

impl GenerationRules {
    pub fn new(
        width: f64,
        height: f64,
        composition: Composition,
        shapes: Vec<ShapeKindId>,
        colors: Vec<String>,
    ) -> Self {
        Self {
            width,
            height,
            composition,
            seed: 0,
            shapes,
            colors,
            params: StrategyParams::default(),
        }
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_params(mut self, params: StrategyParams) -> Self {
        self.params = params;
        self
    }

    /// Check the engine's preconditions: finite positive canvas, non-empty palettes.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::InvalidRules(format!(
                "width must be a positive number, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::InvalidRules(format!(
                "height must be a positive number, got {}",
                self.height
            )));
        }
        if self.shapes.is_empty() {
            return Err(Error::InvalidRules("shape list is empty".into()));
        }
        if self.colors.is_empty() {
            return Err(Error::InvalidRules("color list is empty".into()));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    pub fn palette(&self) -> Result<Palette> {
        Ok(Palette::new(self.shapes.clone(), self.colors.clone())?
            .with_palette_fill(self.params.palette_fill.unwrap_or(false)))
    }
}
