//! Variation engine: derive related rule sets from a base by declared perturbations.
//!
//! A [`VariationSpec`] names numeric fields to perturb, shape/color entries to
//! add or remove, and an optional composition override. [`apply_variations`]
//! returns a new [`GenerationRules`] and never touches the base.
use std::collections::BTreeMap;

use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::composition::Composition;
use crate::random::rand01;
use crate::rules::{GenerationRules, NumericField};

/// Fraction used by [`Perturbation::Range`] when none is given.
pub const DEFAULT_RANGE: f64 = 0.2;

/// How a numeric field is perturbed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "RawPerturbation", into = "RawPerturbation")
)]
pub enum Perturbation {
    /// Uniform in `[v·(1 − f), v·(1 + f)]`.
    Range(f64),
    /// `v + delta`.
    Increment(f64),
    /// `v · k`.
    Factor(f64),
}

impl Perturbation {
    pub fn apply(&self, value: f64, rng: &mut dyn RngCore) -> f64 {
        match *self {
            Perturbation::Range(fraction) => {
                let f = fraction.abs();
                let low = value * (1.0 - f);
                let high = value * (1.0 + f);
                low + (high - low) * rand01(rng)
            }
            Perturbation::Increment(delta) => value + delta,
            Perturbation::Factor(k) => value * k,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum PerturbationKind {
    Range,
    Increment,
    Factor,
}

/// Rule-file form: `{ "kind": "range", "value": 0.1 }`.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPerturbation {
    kind: PerturbationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
}

#[cfg(feature = "serde")]
impl From<RawPerturbation> for Perturbation {
    fn from(raw: RawPerturbation) -> Self {
        match raw.kind {
            PerturbationKind::Range => Perturbation::Range(raw.value.unwrap_or(DEFAULT_RANGE)),
            PerturbationKind::Increment => Perturbation::Increment(raw.value.unwrap_or(0.0)),
            PerturbationKind::Factor => Perturbation::Factor(raw.value.unwrap_or(1.0)),
        }
    }
}

#[cfg(feature = "serde")]
impl From<Perturbation> for RawPerturbation {
    fn from(p: Perturbation) -> Self {
        let (kind, value) = match p {
            Perturbation::Range(v) => (PerturbationKind::Range, v),
            Perturbation::Increment(v) => (PerturbationKind::Increment, v),
            Perturbation::Factor(v) => (PerturbationKind::Factor, v),
        };
        Self {
            kind,
            value: Some(value),
        }
    }
}

/// Declarative description of how to derive a rule set from a base.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct VariationSpec {
    /// Perturbations keyed by rule-file field name (`width`, `seed`, `rows`, ...).
    pub fields: BTreeMap<String, Perturbation>,
    pub add_shapes: Vec<String>,
    pub remove_shapes: Vec<String>,
    pub add_colors: Vec<String>,
    pub remove_colors: Vec<String>,
    pub composition: Option<Composition>,
}

impl VariationSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn perturb(mut self, field: impl Into<String>, perturbation: Perturbation) -> Self {
        self.fields.insert(field.into(), perturbation);
        self
    }

    pub fn add_shapes<I, S>(mut self, shapes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_shapes.extend(shapes.into_iter().map(Into::into));
        self
    }

    pub fn remove_shapes<I, S>(mut self, shapes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove_shapes.extend(shapes.into_iter().map(Into::into));
        self
    }

    pub fn add_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_colors.extend(colors.into_iter().map(Into::into));
        self
    }

    pub fn remove_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove_colors.extend(colors.into_iter().map(Into::into));
        self
    }

    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = Some(composition);
        self
    }

    /// `true` when applying this spec is the identity.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
            && self.add_shapes.is_empty()
            && self.remove_shapes.is_empty()
            && self.add_colors.is_empty()
            && self.remove_colors.is_empty()
            && self.composition.is_none()
    }
}

/// Derive a new rule set from `base`.
///
/// Fields are perturbed in name order, so a seeded `rng` gives a reproducible
/// result. Only [`Perturbation::Range`] draws from `rng`.
pub fn apply_variations(
    base: &GenerationRules,
    spec: &VariationSpec,
    rng: &mut dyn RngCore,
) -> GenerationRules {
    let mut rules = base.clone();

    for (name, perturbation) in &spec.fields {
        match name.as_str() {
            "width" => rules.width = perturbation.apply(rules.width, rng).max(1.0),
            "height" => rules.height = perturbation.apply(rules.height, rng).max(1.0),
            "seed" => rules.seed = vary_seed(rules.seed, perturbation, rng),
            other => match rules.params.numeric_field_mut(other) {
                Some(NumericField::Real(slot)) => {
                    if let Some(v) = slot {
                        *v = perturbation.apply(*v, rng);
                    }
                }
                Some(NumericField::Count(slot)) => {
                    if let Some(n) = slot {
                        *n = perturbation.apply(*n as f64, rng).round().max(0.0) as u32;
                    }
                }
                None => warn!("Ignoring variation of unknown field '{}'.", other),
            },
        }
    }

    rules.shapes = vary_list(&base.shapes, &spec.remove_shapes, &spec.add_shapes, "shapes");
    rules.colors = vary_list(&base.colors, &spec.remove_colors, &spec.add_colors, "colors");
    if let Some(composition) = spec.composition {
        rules.composition = composition;
    }
    rules
}

/// Increments stay in integer arithmetic so large seeds keep every bit.
fn vary_seed(seed: i64, perturbation: &Perturbation, rng: &mut dyn RngCore) -> i64 {
    match *perturbation {
        Perturbation::Increment(delta) => seed.saturating_add(delta.round() as i64),
        _ => perturbation.apply(seed as f64, rng).round() as i64,
    }
}

/// Remove by value, then append. An emptied list keeps the base list.
fn vary_list(base: &[String], remove: &[String], add: &[String], what: &str) -> Vec<String> {
    let mut out: Vec<String> = base
        .iter()
        .filter(|v| !remove.contains(v))
        .cloned()
        .collect();
    out.extend(add.iter().cloned());
    if out.is_empty() && !base.is_empty() {
        warn!("Variation would empty the {} list; keeping the base list.", what);
        return base.to_vec();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    fn base() -> GenerationRules {
        let mut rules = GenerationRules::new(
            400.0,
            300.0,
            Composition::Grid,
            vec!["circle".into(), "rect".into()],
            vec!["#a".into(), "#b".into()],
        )
        .with_seed(100);
        rules.params.rows = Some(4);
        rules.params.padding = Some(0.2);
        rules
    }

    #[test]
    fn empty_spec_is_identity() {
        let spec = VariationSpec::new();
        assert!(spec.is_empty());
        let mut rng = SeededRandom::new(1);
        assert_eq!(apply_variations(&base(), &spec, &mut rng), base());
        // No draw consumed.
        assert_eq!(rng.state(), 1);
    }

    #[test]
    fn seed_increment_is_exact_for_large_seeds() {
        let mut rules = base();
        rules.seed = (1_i64 << 53) + 1;
        let spec = VariationSpec::new().perturb("seed", Perturbation::Increment(2.0));
        let derived = apply_variations(&rules, &spec, &mut SeededRandom::new(0));
        assert_eq!(derived.seed, (1_i64 << 53) + 3);

        rules.seed = i64::MAX - 1;
        let derived = apply_variations(&rules, &spec, &mut SeededRandom::new(0));
        assert_eq!(derived.seed, i64::MAX);
    }

    #[test]
    fn increment_and_factor_are_exact() {
        let spec = VariationSpec::new()
            .perturb("width", Perturbation::Factor(1.5))
            .perturb("seed", Perturbation::Increment(3.0))
            .perturb("rows", Perturbation::Increment(2.0))
            .perturb("padding", Perturbation::Factor(0.5));
        let b = base();
        let derived = apply_variations(&b, &spec, &mut SeededRandom::new(1));
        assert_eq!(derived.width, 600.0);
        assert_eq!(derived.height, 300.0);
        assert_eq!(derived.seed, 103);
        assert_eq!(derived.params.rows, Some(6));
        assert_eq!(derived.params.padding, Some(0.1));
        assert_eq!(b, base());
    }

    #[test]
    fn range_stays_within_the_fraction() {
        let spec = VariationSpec::new().perturb("width", Perturbation::Range(0.1));
        let mut rng = SeededRandom::new(5);
        for _ in 0..200 {
            let w = apply_variations(&base(), &spec, &mut rng).width;
            assert!((360.0..=440.0).contains(&w), "{w}");
        }
    }

    #[test]
    fn counts_round_and_floor_at_zero() {
        let spec = VariationSpec::new().perturb("rows", Perturbation::Increment(-10.0));
        let derived = apply_variations(&base(), &spec, &mut SeededRandom::new(1));
        assert_eq!(derived.params.rows, Some(0));

        let spec = VariationSpec::new().perturb("rows", Perturbation::Factor(1.4));
        let derived = apply_variations(&base(), &spec, &mut SeededRandom::new(1));
        assert_eq!(derived.params.rows, Some(6));
    }

    #[test]
    fn canvas_never_collapses() {
        let spec = VariationSpec::new().perturb("height", Perturbation::Increment(-1000.0));
        let derived = apply_variations(&base(), &spec, &mut SeededRandom::new(1));
        assert_eq!(derived.height, 1.0);
    }

    #[test]
    fn absent_and_unknown_fields_pass_through() {
        let spec = VariationSpec::new()
            .perturb("cols", Perturbation::Increment(1.0))
            .perturb("bogus", Perturbation::Factor(2.0));
        let derived = apply_variations(&base(), &spec, &mut SeededRandom::new(1));
        assert_eq!(derived, base());
    }

    #[test]
    fn lists_remove_then_add_independently() {
        let spec = VariationSpec::new()
            .remove_shapes(["rect"])
            .add_shapes(["star", "circle"])
            .add_colors(["#c"]);
        let derived = apply_variations(&base(), &spec, &mut SeededRandom::new(1));
        assert_eq!(derived.shapes, vec!["circle", "star", "circle"]);
        assert_eq!(derived.colors, vec!["#a", "#b", "#c"]);
    }

    #[test]
    fn emptied_list_keeps_the_base() {
        let spec = VariationSpec::new().remove_colors(["#a", "#b"]);
        let derived = apply_variations(&base(), &spec, &mut SeededRandom::new(1));
        assert_eq!(derived.colors, base().colors);
        assert!(derived.validate().is_ok());
    }

    #[test]
    fn composition_override_replaces_the_name() {
        let spec = VariationSpec::new().with_composition(Composition::Spiral);
        let derived = apply_variations(&base(), &spec, &mut SeededRandom::new(1));
        assert_eq!(derived.composition, Composition::Spiral);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn spec_parses_from_json_with_default_range() {
        let spec: VariationSpec = serde_json::from_str(
            r#"{
                "fields": {
                    "count": { "kind": "range" },
                    "turns": { "kind": "factor", "value": 2 }
                },
                "removeShapes": ["rect"],
                "composition": "fractal"
            }"#,
        )
        .unwrap();
        assert_eq!(spec.fields["count"], Perturbation::Range(DEFAULT_RANGE));
        assert_eq!(spec.fields["turns"], Perturbation::Factor(2.0));
        assert_eq!(spec.remove_shapes, vec!["rect"]);
        assert_eq!(spec.composition, Some(Composition::Fractal));
    }
}
