//! Brand policy: validation and defaulting of incoming rule requests.
//!
//! A [`BrandConfig`] is plain data, loaded once and passed explicitly to
//! whatever turns loosely specified [`RuleRequest`]s into engine-ready
//! [`GenerationRules`]. Nothing here is global.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::composition::Composition;
use crate::error::{Error, Result};
use crate::rules::{GenerationRules, StrategyParams};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// A named entry of the brand vocabulary with an optional description.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrandEntry {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl BrandEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrandColor {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct SizeConstraints {
    pub min_size: f64,
    pub max_size: f64,
}

/// Allowed vocabulary and bounds for generated documents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct BrandConfig {
    pub default_dimensions: Dimensions,
    /// Allowed composition names; the first is the fallback.
    pub layouts: Vec<BrandEntry>,
    pub shapes: Vec<BrandEntry>,
    pub colors: Vec<BrandColor>,
    pub size_constraints: SizeConstraints,
}

/// Loosely specified rules as they arrive from a caller.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct RuleRequest {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub composition: Option<String>,
    pub seed: Option<i64>,
    pub shapes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub params: StrategyParams,
}

impl BrandConfig {
    /// Reject a brand that cannot produce valid rules.
    pub fn verify(&self) -> Result<()> {
        if self.layouts.is_empty() {
            return Err(Error::InvalidConfig("brand defines no layouts".into()));
        }
        if self.shapes.is_empty() {
            return Err(Error::InvalidConfig("brand defines no shapes".into()));
        }
        if self.colors.is_empty() {
            return Err(Error::InvalidConfig("brand defines no colors".into()));
        }
        let d = self.default_dimensions;
        if !(d.width > 0.0 && d.height > 0.0) {
            return Err(Error::InvalidConfig(
                "default dimensions must be positive".into(),
            ));
        }
        let s = self.size_constraints;
        if s.min_size > s.max_size {
            return Err(Error::InvalidConfig(format!(
                "size constraints are inverted: {} > {}",
                s.min_size, s.max_size
            )));
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: BrandConfig = serde_json::from_str(json)?;
        config.verify()?;
        Ok(config)
    }

    pub fn shape_names(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|s| s.name.as_str())
    }

    pub fn color_values(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().map(|c| c.value.as_str())
    }

    /// Clamp and default `request` into engine-ready rules.
    ///
    /// `fallback_seed` is used when the request carries no seed.
    pub fn validate(&self, request: &RuleRequest, fallback_seed: i64) -> Result<GenerationRules> {
        self.verify()?;

        let positive = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
        let width = positive(request.width).unwrap_or(self.default_dimensions.width);
        let height = positive(request.height).unwrap_or(self.default_dimensions.height);

        let first_layout = self.layouts[0].name.as_str();
        let layout = match request.composition.as_deref() {
            Some(name) if self.layouts.iter().any(|l| l.name == name) => name,
            Some(name) => {
                warn!("Layout '{}' is not allowed; using '{}'.", name, first_layout);
                first_layout
            }
            None => first_layout,
        };
        let composition = Composition::parse(layout).unwrap_or_else(|| {
            warn!("Layout '{}' has no composition strategy; using grid.", layout);
            Composition::default()
        });

        let shapes = restrict(
            request.shapes.as_deref(),
            &self.shape_names().collect::<Vec<_>>(),
            "shape",
        );
        let colors = restrict(
            request.colors.as_deref(),
            &self.color_values().collect::<Vec<_>>(),
            "color",
        );

        let mut params = request.params.clone();
        let bounds = self.size_constraints;
        if let Some(min) = params.min_size {
            params.min_size = Some(min.min(bounds.max_size).max(bounds.min_size));
        }
        if let Some(max) = params.max_size {
            let floor = params.min_size.unwrap_or(bounds.min_size);
            params.max_size = Some(max.min(bounds.max_size).max(floor));
        }

        Ok(GenerationRules::new(width, height, composition, shapes, colors)
            .with_seed(request.seed.unwrap_or(fallback_seed))
            .with_params(params))
    }
}

/// Keep allowed entries; an emptied list becomes the first two allowed entries,
/// an absent list all of them.
fn restrict(requested: Option<&[String]>, allowed: &[&str], what: &str) -> Vec<String> {
    let Some(requested) = requested else {
        return allowed.iter().map(|s| s.to_string()).collect();
    };
    let kept: Vec<String> = requested
        .iter()
        .filter(|v| allowed.contains(&v.as_str()))
        .cloned()
        .collect();
    if kept.len() < requested.len() {
        warn!(
            "Dropped {} {}(s) outside the brand vocabulary.",
            requested.len() - kept.len(),
            what
        );
    }
    if kept.is_empty() {
        return allowed.iter().take(2).map(|s| s.to_string()).collect();
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand() -> BrandConfig {
        BrandConfig {
            default_dimensions: Dimensions {
                width: 800.0,
                height: 600.0,
            },
            layouts: vec![BrandEntry::new("radial"), BrandEntry::new("grid")],
            shapes: ["circle", "rect", "star"].map(BrandEntry::new).to_vec(),
            colors: [("ink", "#111"), ("paper", "#fff"), ("accent", "#f60")]
                .map(|(name, value)| BrandColor {
                    name: name.into(),
                    value: value.into(),
                })
                .to_vec(),
            size_constraints: SizeConstraints {
                min_size: 10.0,
                max_size: 100.0,
            },
        }
    }

    #[test]
    fn empty_request_takes_every_default() {
        let rules = brand().validate(&RuleRequest::default(), 42).unwrap();
        assert_eq!((rules.width, rules.height), (800.0, 600.0));
        assert_eq!(rules.composition, Composition::Radial);
        assert_eq!(rules.shapes, vec!["circle", "rect", "star"]);
        assert_eq!(rules.colors, vec!["#111", "#fff", "#f60"]);
        assert_eq!(rules.seed, 42);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn disallowed_entries_are_filtered_or_replaced() {
        let request = RuleRequest {
            width: Some(-5.0),
            composition: Some("fractal".into()),
            shapes: Some(vec!["blob".into(), "star".into()]),
            colors: Some(vec!["#000".into()]),
            seed: Some(9),
            ..Default::default()
        };
        let rules = brand().validate(&request, 0).unwrap();
        assert_eq!(rules.width, 800.0);
        assert_eq!(rules.composition, Composition::Radial);
        assert_eq!(rules.shapes, vec!["star"]);
        assert_eq!(rules.colors, vec!["#111", "#fff"]);
        assert_eq!(rules.seed, 9);
    }

    #[test]
    fn sizes_are_clamped_into_bounds() {
        let mut request = RuleRequest::default();
        request.params.min_size = Some(2.0);
        request.params.max_size = Some(500.0);
        let rules = brand().validate(&request, 0).unwrap();
        assert_eq!(rules.params.min_size, Some(10.0));
        assert_eq!(rules.params.max_size, Some(100.0));

        let mut request = RuleRequest::default();
        request.params.min_size = Some(60.0);
        request.params.max_size = Some(30.0);
        let rules = brand().validate(&request, 0).unwrap();
        assert_eq!(rules.params.max_size, Some(60.0));
    }

    #[test]
    fn unusable_brand_is_a_config_error() {
        let mut b = brand();
        b.colors.clear();
        assert!(matches!(
            b.validate(&RuleRequest::default(), 0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn brand_and_request_parse_from_json() {
        let b = BrandConfig::from_json_str(
            r##"{
                "defaultDimensions": { "width": 400, "height": 400 },
                "layouts": [{ "name": "spiral" }],
                "shapes": [{ "name": "circle", "description": "round" }],
                "colors": [{ "name": "red", "value": "#f00" }],
                "sizeConstraints": { "minSize": 5, "maxSize": 50 }
            }"##,
        )
        .unwrap();
        let request: RuleRequest =
            serde_json::from_str(r##"{ "turns": 5, "colors": ["#f00", "#0f0"] }"##).unwrap();
        let rules = b.validate(&request, 1).unwrap();
        assert_eq!(rules.composition, Composition::Spiral);
        assert_eq!(rules.colors, vec!["#f00"]);
        assert_eq!(rules.params.turns, Some(5.0));
    }
}
