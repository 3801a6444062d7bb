//! Sine wave composition.
use std::f64::consts::TAU;

use glam::DVec2;

use crate::composition::{
    endpoint_progress, lerp, pick_fill, pick_shape, CompositionStrategy, Layout, ShapeInstance,
};
use crate::distribution::{Distribution, SelectionContext};
use crate::random::SeededRandom;
use crate::rules::{Canvas, GenerationRules, Palette, RotationMode, SizeMode};

/// `count` points spread along x, displaced by `sin(phase + 2π·waves·progress)·wave_height`.
#[derive(Debug, Clone)]
pub struct WaveComposition {
    pub canvas: Canvas,
    pub count: u32,
    pub waves: f64,
    pub wave_height: f64,
    /// Clamped to half the canvas width.
    pub padding_x: f64,
    pub center_y: f64,
    /// Radians.
    pub phase_shift: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub size_mode: SizeMode,
    pub rotation_mode: RotationMode,
    pub rotation: f64,
    pub shape_distribution: Distribution,
    pub color_distribution: Distribution,
}

impl WaveComposition {
    pub fn from_rules(rules: &GenerationRules) -> Self {
        let p = &rules.params;
        let canvas = rules.canvas();
        Self {
            canvas,
            count: p.count.unwrap_or(15),
            waves: p.waves.unwrap_or(2.0),
            wave_height: p.wave_height.unwrap_or((canvas.height / 4.0).min(100.0)),
            padding_x: p
                .padding_x
                .unwrap_or(50.0)
                .max(0.0)
                .min((canvas.width / 2.0).max(0.0)),
            center_y: p.center_y.unwrap_or(canvas.height / 2.0),
            phase_shift: p.phase_shift.unwrap_or(0.0),
            min_size: p.min_size.unwrap_or(20.0),
            max_size: p.max_size.unwrap_or(60.0),
            size_mode: p.size_distribution.unwrap_or_default(),
            rotation_mode: p.rotation_type.unwrap_or_default(),
            rotation: p.rotation.unwrap_or(0.0),
            shape_distribution: p.shape_distribution.unwrap_or_default(),
            color_distribution: p.color_distribution.unwrap_or_default(),
        }
    }

    fn phase_at(&self, progress: f64) -> f64 {
        self.phase_shift + progress * TAU * self.waves
    }
}

impl CompositionStrategy for WaveComposition {
    fn compose(&self, palette: &Palette, rng: &mut SeededRandom) -> Layout {
        let n = self.count as usize;
        let mut layout = Layout::with_capacity(n);
        let span = self.canvas.width - 2.0 * self.padding_x;

        for i in 0..n {
            let progress = endpoint_progress(i, n);
            let phase = self.phase_at(progress);
            let offset = phase.sin();
            let center = DVec2::new(
                self.padding_x + progress * span,
                self.center_y + offset * self.wave_height,
            );
            let crest = (offset + 1.0) / 2.0;

            let ctx = SelectionContext::at(i)
                .with_progress(progress)
                .with_wave_height(crest);
            let kind = pick_shape(palette, self.shape_distribution, &ctx, rng);
            let fill = pick_fill(palette, self.color_distribution, &ctx, rng);

            let size = match self.size_mode {
                SizeMode::Wave => lerp(self.min_size, self.max_size, crest),
                SizeMode::Progress => lerp(self.min_size, self.max_size, progress),
                _ => lerp(self.min_size, self.max_size, rng.next_f64()),
            };

            let rotation = match self.rotation_mode {
                RotationMode::Wave => {
                    let slope = phase.cos();
                    (slope * self.wave_height / (self.canvas.width / n as f64))
                        .atan()
                        .to_degrees()
                }
                RotationMode::Random => 360.0 * rng.next_f64(),
                _ => self.rotation,
            };

            layout.push(ShapeInstance {
                kind,
                center,
                size,
                fill,
                rotation,
            });
        }

        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::test_support::{rules, run};
    use crate::composition::Composition;

    #[test]
    fn points_span_the_padded_width_on_the_sine() {
        let mut r = rules(Composition::Wave, &["circle"], &["#000"]);
        r.params.count = Some(5);
        r.params.waves = Some(1.0);
        r.params.wave_height = Some(100.0);
        let layout = run(&WaveComposition::from_rules(&r), &r);
        assert_eq!(layout.len(), 5);
        let expected = [
            DVec2::new(50.0, 300.0),
            DVec2::new(225.0, 400.0),
            DVec2::new(400.0, 300.0),
            DVec2::new(575.0, 200.0),
            DVec2::new(750.0, 300.0),
        ];
        for (s, want) in layout.instances.iter().zip(expected) {
            assert!((s.center - want).length() < 1e-9, "{} vs {want}", s.center);
        }
    }

    #[test]
    fn single_point_sits_at_the_left_padding() {
        let mut r = rules(Composition::Wave, &["circle"], &["#000"]);
        r.params.count = Some(1);
        let layout = run(&WaveComposition::from_rules(&r), &r);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.instances[0].center, DVec2::new(50.0, 300.0));
    }

    #[test]
    fn wave_sizes_follow_the_crest() {
        let mut r = rules(Composition::Wave, &["circle"], &["#000"]);
        r.params.count = Some(5);
        r.params.waves = Some(1.0);
        r.params.size_distribution = Some(SizeMode::Wave);
        let layout = run(&WaveComposition::from_rules(&r), &r);
        let sizes: Vec<f64> = layout.instances.iter().map(|s| s.size).collect();
        for (got, want) in sizes.iter().zip([40.0, 60.0, 40.0, 20.0, 40.0]) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn slope_rotation_is_zero_at_the_crest() {
        let mut r = rules(Composition::Wave, &["rect"], &["#000"]);
        r.params.count = Some(5);
        r.params.waves = Some(1.0);
        r.params.rotation_type = Some(RotationMode::Wave);
        let layout = run(&WaveComposition::from_rules(&r), &r);
        assert!(layout.instances[1].rotation.abs() < 1e-9);
        assert!(layout.instances[0].rotation > 0.0);
        assert!(layout.instances[2].rotation < 0.0);
    }

    #[test]
    fn color_by_progress_walks_the_palette() {
        let mut r = rules(Composition::Wave, &["circle"], &["#a", "#b"]);
        r.params.count = Some(4);
        r.params.color_distribution = Some(Distribution::Progress);
        let layout = run(&WaveComposition::from_rules(&r), &r);
        let colors: Vec<&str> = layout.instances.iter().map(|s| s.fill.primary()).collect();
        assert_eq!(colors, vec!["#a", "#a", "#b", "#b"]);
    }
}
