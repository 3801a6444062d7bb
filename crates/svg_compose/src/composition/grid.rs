//! Grid composition: one shape centered in each cell of a rows × cols grid.
use glam::DVec2;

use crate::composition::{pick_fill, pick_shape, CompositionStrategy, Layout, ShapeInstance};
use crate::distribution::{Distribution, SelectionContext};
use crate::random::SeededRandom;
use crate::rules::{Canvas, GenerationRules, Palette};

/// Rows × cols grid with optional per-cell skipping.
#[derive(Debug, Clone)]
pub struct GridComposition {
    pub canvas: Canvas,
    pub rows: u32,
    pub cols: u32,
    /// Cell padding as a fraction of the smaller cell side.
    pub padding: f64,
    /// Probability of leaving a cell empty.
    pub sparsity: f64,
    /// Size jitter as a fraction of the largest size.
    pub size_variation: f64,
    pub enable_rotation: bool,
    pub shape_distribution: Distribution,
    pub color_distribution: Distribution,
}

impl GridComposition {
    pub fn from_rules(rules: &GenerationRules) -> Self {
        let p = &rules.params;
        Self {
            canvas: rules.canvas(),
            rows: p.rows.unwrap_or(4),
            cols: p.cols.unwrap_or(4),
            padding: p.padding.unwrap_or(0.2),
            sparsity: p.sparsity.unwrap_or(0.0),
            size_variation: p.size_variation.unwrap_or(0.3),
            enable_rotation: p.enable_rotation.unwrap_or(false),
            shape_distribution: p.shape_distribution.unwrap_or_default(),
            color_distribution: p.color_distribution.unwrap_or_default(),
        }
    }
}

impl CompositionStrategy for GridComposition {
    fn compose(&self, palette: &Palette, rng: &mut SeededRandom) -> Layout {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut layout = Layout::with_capacity(rows * cols);
        if rows == 0 || cols == 0 {
            return layout;
        }

        let cell = DVec2::new(
            self.canvas.width / cols as f64,
            self.canvas.height / rows as f64,
        );
        let max_size = cell.x.min(cell.y) * (1.0 - self.padding);
        let min_size = max_size * 0.4;
        let base_size = (max_size + min_size) / 2.0;

        for row in 0..rows {
            for col in 0..cols {
                let center = DVec2::new((col as f64 + 0.5) * cell.x, (row as f64 + 0.5) * cell.y);

                // The skip draw is only taken when sparsity is in use.
                if self.sparsity > 0.0 && rng.chance(self.sparsity) {
                    continue;
                }

                let ctx = SelectionContext::at(row * cols + col).with_cell(row, col);
                let kind = pick_shape(palette, self.shape_distribution, &ctx, rng);
                let fill = pick_fill(palette, self.color_distribution, &ctx, rng);
                let size = base_size + (rng.next_f64() - 0.5) * max_size * self.size_variation;
                let rotation = if self.enable_rotation {
                    360.0 * rng.next_f64()
                } else {
                    0.0
                };

                layout.push(ShapeInstance {
                    kind,
                    center,
                    size,
                    fill,
                    rotation,
                });
            }
        }

        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::test_support::{rules, run};
    use crate::composition::Composition;
    use crate::shape::Fill;

    #[test]
    fn two_by_two_places_one_shape_per_cell_center() {
        let mut r = rules(Composition::Grid, &["circle"], &["#fff"]).with_seed(1);
        r.width = 200.0;
        r.height = 100.0;
        r.params.rows = Some(2);
        r.params.cols = Some(2);

        let layout = run(&GridComposition::from_rules(&r), &r);
        let centers: Vec<DVec2> = layout.instances.iter().map(|s| s.center).collect();
        assert_eq!(
            centers,
            vec![
                DVec2::new(50.0, 25.0),
                DVec2::new(150.0, 25.0),
                DVec2::new(50.0, 75.0),
                DVec2::new(150.0, 75.0),
            ]
        );
        assert!(layout
            .instances
            .iter()
            .all(|s| s.fill == Fill::Solid("#fff".into()) && s.rotation == 0.0));
    }

    #[test]
    fn sizes_stay_within_jitter_band() {
        let mut r = rules(Composition::Grid, &["rect"], &["#000"]);
        r.params.rows = Some(6);
        r.params.cols = Some(8);
        let grid = GridComposition::from_rules(&r);
        let layout = run(&grid, &r);
        assert_eq!(layout.len(), 48);

        let max_size = (800.0_f64 / 8.0).min(600.0 / 6.0) * 0.8;
        let base = max_size * 0.7;
        let jitter = max_size * 0.3 / 2.0;
        for s in &layout.instances {
            assert!(s.size >= base - jitter && s.size <= base + jitter, "{}", s.size);
        }
    }

    #[test]
    fn sparsity_skips_some_cells() {
        let mut r = rules(Composition::Grid, &["circle"], &["#000"]);
        r.params.rows = Some(10);
        r.params.cols = Some(10);
        r.params.sparsity = Some(0.5);
        let layout = run(&GridComposition::from_rules(&r), &r);
        assert!(layout.len() < 100);
        assert!(!layout.is_empty());

        r.params.sparsity = Some(1.0);
        assert!(run(&GridComposition::from_rules(&r), &r).is_empty());
    }

    #[test]
    fn row_and_column_policies_key_the_palette() {
        let mut r = rules(Composition::Grid, &["circle", "rect"], &["#a", "#b", "#c"]);
        r.params.rows = Some(3);
        r.params.cols = Some(3);
        r.params.shape_distribution = Some(Distribution::Row);
        r.params.color_distribution = Some(Distribution::Column);
        let layout = run(&GridComposition::from_rules(&r), &r);
        let kinds: Vec<&str> = layout.instances.iter().map(|s| s.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec!["circle", "circle", "circle", "rect", "rect", "rect", "circle", "circle", "circle"]
        );
        let colors: Vec<&str> = layout.instances.iter().map(|s| s.fill.primary()).collect();
        assert_eq!(colors, vec!["#a", "#b", "#c", "#a", "#b", "#c", "#a", "#b", "#c"]);
    }

    #[test]
    fn zero_rows_yield_empty_layout() {
        let mut r = rules(Composition::Grid, &["circle"], &["#000"]);
        r.params.rows = Some(0);
        assert!(run(&GridComposition::from_rules(&r), &r).is_empty());
    }
}
