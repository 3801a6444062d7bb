use svg_compose::prelude::*;
use svg_compose_examples::{demo_rules, init_tracing, write_svg};

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Each island pins its own dominant shape and color; sizes shrink toward
    // the rim.
    let mut rules = demo_rules(
        Composition::Cluster,
        &["circle", "cloud", "crescent", "cross"],
        21,
    );
    rules.params = StrategyParams {
        cluster_count: Some(4),
        shapes_per_cluster: Some(25),
        cluster_radius: Some(120.0),
        cluster_shapes: Some(true),
        cluster_colors: Some(true),
        size_distribution: Some(SizeMode::Distance),
        min_size: Some(8.0),
        max_size: Some(48.0),
        enable_rotation: Some(true),
        ..Default::default()
    };

    write_svg("composition-cluster-islands.svg", &generate(&rules)?)
}
