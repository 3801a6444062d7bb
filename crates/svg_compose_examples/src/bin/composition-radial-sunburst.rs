use svg_compose::prelude::*;
use svg_compose_examples::{demo_rules, init_tracing, write_svg};

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Exponentially spaced, tangent-oriented points around a concentric-circles
    // hub that takes the whole palette.
    let mut rules = demo_rules(Composition::Radial, &["triangle", "star"], 3);
    rules.params = StrategyParams {
        count: Some(24),
        min_radius: Some(60.0),
        max_radius: Some(340.0),
        radius_distribution: Some(RadiusMode::Exponential),
        rotation_type: Some(RotationMode::Tangent),
        size_by_radius: Some(true),
        size: Some(70.0),
        center_shape: Some("concentricCircles".into()),
        center_size: Some(160.0),
        shape_distribution: Some(Distribution::Sequence),
        color_distribution: Some(Distribution::Radius),
        palette_fill: Some(true),
        ..Default::default()
    };

    write_svg("composition-radial-sunburst.svg", &generate(&rules)?)
}
