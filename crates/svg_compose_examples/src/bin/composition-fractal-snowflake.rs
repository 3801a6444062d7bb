use svg_compose::prelude::*;
use svg_compose_examples::{demo_rules, init_tracing, write_svg};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Six-way branching, banded by depth.
    let mut rules = demo_rules(Composition::Fractal, &["hexagon", "star", "circle"], 1);
    rules.params = StrategyParams {
        max_depth: Some(3),
        child_count: Some(6),
        initial_size: Some(220.0),
        scale_factor: Some(0.42),
        distance_factor: Some(0.95),
        depth_shapes: Some(true),
        depth_colors: Some(true),
        ..Default::default()
    };

    let fractal = FractalComposition::from_rules(&rules);
    info!("Fractal will place {} shapes", fractal.node_count());

    write_svg("composition-fractal-snowflake.svg", &generate(&rules)?)
}
