use svg_compose::prelude::*;
use svg_compose_examples::{demo_rules, init_tracing, write_svg};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut rules = demo_rules(Composition::Spiral, &["circle", "pentagon", "heart"], 8);
    rules.params = StrategyParams {
        count: Some(90),
        turns: Some(5.0),
        start_radius: Some(10.0),
        spacing: Some(70.0),
        rotation: Some(15.0),
        min_size: Some(6.0),
        max_size: Some(44.0),
        size_distribution: Some(SizeMode::Increasing),
        rotation_type: Some(RotationMode::Spiral),
        rotation_offset: Some(90.0),
        color_distribution: Some(Distribution::Progress),
        ..Default::default()
    };

    write_svg("composition-spiral-galaxy.svg", &generate(&rules)?)
}
