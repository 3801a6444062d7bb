//! Distribution policies for picking palette entries.
//!
//! A [`Distribution`] decides which entry of a finite list (shape palette or
//! color palette) applies to one shape instance. Strategies describe where the
//! instance sits through a [`SelectionContext`] and call [`select_index`], so a
//! policy such as `sequence` behaves the same in every strategy.
//!
//! Normalized policies (`radius`, `progress`, `waveHeight`, `distance`) map a
//! value in `[0, 1]` linearly onto `[0, len)`, floor, and clamp to `len - 1`.
//! Unknown names and policies whose context value is missing fall back to
//! [`Distribution::Random`].
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::random::SeededRandom;

/// Named index-selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Distribution {
    /// One draw from the random stream.
    #[default]
    Random,
    /// Linear index modulo the list length.
    Sequence,
    /// Row index modulo the list length.
    Row,
    /// Column index modulo the list length.
    Column,
    /// Normalized radius.
    Radius,
    /// Normalized progress along the strategy's path.
    Progress,
    /// Normalized wave height, `(sin + 1) / 2`.
    WaveHeight,
    /// Normalized distance from a cluster center.
    Distance,
}

impl Distribution {
    /// Parse a policy name; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "random" => Some(Self::Random),
            "sequence" => Some(Self::Sequence),
            "row" => Some(Self::Row),
            "column" | "col" => Some(Self::Column),
            "radius" => Some(Self::Radius),
            "progress" => Some(Self::Progress),
            "wave" | "waveHeight" => Some(Self::WaveHeight),
            "distance" => Some(Self::Distance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Sequence => "sequence",
            Self::Row => "row",
            Self::Column => "column",
            Self::Radius => "radius",
            Self::Progress => "progress",
            Self::WaveHeight => "waveHeight",
            Self::Distance => "distance",
        }
    }
}

impl From<&str> for Distribution {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl From<String> for Distribution {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Distribution> for String {
    fn from(value: Distribution) -> Self {
        value.as_str().to_owned()
    }
}

/// Position context a strategy knows about the instance being placed.
///
/// Fields a strategy cannot provide stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionContext {
    pub index: usize,
    pub row: Option<usize>,
    pub col: Option<usize>,
    pub radius: Option<f64>,
    pub progress: Option<f64>,
    pub wave_height: Option<f64>,
    pub distance: Option<f64>,
}

impl SelectionContext {
    pub fn at(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn with_cell(mut self, row: usize, col: usize) -> Self {
        self.row = Some(row);
        self.col = Some(col);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_wave_height(mut self, wave_height: f64) -> Self {
        self.wave_height = Some(wave_height);
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }
}

/// Select an index in `[0, len)` under `policy`.
///
/// Only [`Distribution::Random`] (and the fallbacks to it) consume a draw from `rng`.
/// `len` must be non-zero; the engine validates palettes before any strategy runs.
pub fn select_index(
    policy: Distribution,
    len: usize,
    ctx: &SelectionContext,
    rng: &mut SeededRandom,
) -> usize {
    debug_assert!(len > 0, "select_index called with an empty list");
    let by_position = match policy {
        Distribution::Random => None,
        Distribution::Sequence => Some(ctx.index),
        Distribution::Row => ctx.row,
        Distribution::Column => ctx.col,
        Distribution::Radius => ctx.radius.map(|v| scale_normalized(v, len)),
        Distribution::Progress => ctx.progress.map(|v| scale_normalized(v, len)),
        Distribution::WaveHeight => ctx.wave_height.map(|v| scale_normalized(v, len)),
        Distribution::Distance => ctx.distance.map(|v| scale_normalized(v, len)),
    };

    match by_position {
        Some(i) if len > 0 => i % len,
        _ => rng.index(len),
    }
}

/// Map a normalized value onto `[0, len)`: floor, clamp to `len - 1`.
#[inline]
pub(crate) fn scale_normalized(value: f64, len: usize) -> usize {
    if len == 0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value * len as f64).floor() as usize).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_row_and_column_wrap() {
        let mut rng = SeededRandom::new(1);
        let ctx = SelectionContext::at(7).with_cell(5, 4);
        assert_eq!(select_index(Distribution::Sequence, 3, &ctx, &mut rng), 1);
        assert_eq!(select_index(Distribution::Row, 3, &ctx, &mut rng), 2);
        assert_eq!(select_index(Distribution::Column, 3, &ctx, &mut rng), 1);
        // No draw consumed by positional policies.
        assert_eq!(rng.state(), 1);
    }

    #[test]
    fn normalized_policies_floor_and_clamp() {
        let mut rng = SeededRandom::new(1);
        let at = |v: f64| SelectionContext::at(0).with_progress(v);
        assert_eq!(select_index(Distribution::Progress, 4, &at(0.0), &mut rng), 0);
        assert_eq!(select_index(Distribution::Progress, 4, &at(0.49), &mut rng), 1);
        assert_eq!(select_index(Distribution::Progress, 4, &at(0.99), &mut rng), 3);
        assert_eq!(select_index(Distribution::Progress, 4, &at(1.0), &mut rng), 3);
        assert_eq!(select_index(Distribution::Progress, 4, &at(-0.5), &mut rng), 0);
    }

    #[test]
    fn unknown_name_behaves_like_random() {
        let policy = Distribution::from("zigzag");
        assert_eq!(policy, Distribution::Random);

        let ctx = SelectionContext::at(3);
        let mut a = SeededRandom::new(11);
        let mut b = SeededRandom::new(11);
        for _ in 0..32 {
            assert_eq!(
                select_index(policy, 5, &ctx, &mut a),
                select_index(Distribution::Random, 5, &ctx, &mut b)
            );
        }
    }

    #[test]
    fn missing_context_falls_back_to_random() {
        let ctx = SelectionContext::at(0);
        let mut rng = SeededRandom::new(5);
        let idx = select_index(Distribution::Radius, 6, &ctx, &mut rng);
        assert!(idx < 6);
        assert_eq!(rng.state(), 6);
    }

    #[test]
    fn single_entry_lists_always_select_zero() {
        let mut rng = SeededRandom::new(2);
        let ctx = SelectionContext::at(9).with_cell(4, 4).with_distance(0.7);
        for policy in [
            Distribution::Random,
            Distribution::Sequence,
            Distribution::Row,
            Distribution::Column,
            Distribution::Distance,
        ] {
            assert_eq!(select_index(policy, 1, &ctx, &mut rng), 0);
        }
    }

    #[test]
    fn wave_alias_parses() {
        assert_eq!(Distribution::from("wave"), Distribution::WaveHeight);
        assert_eq!(Distribution::from("waveHeight"), Distribution::WaveHeight);
    }
}
