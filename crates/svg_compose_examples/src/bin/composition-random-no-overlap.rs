use svg_compose::prelude::*;
use svg_compose_examples::{demo_rules, init_tracing, write_svg};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Dense scatter with collision avoidance. Some shapes will not find room;
    // they are reported through the event sink instead of overlapping.
    let mut rules = demo_rules(Composition::Random, &["circle", "hexagon", "donut"], 42);
    rules.params = StrategyParams {
        count: Some(120),
        padding: Some(30.0),
        min_size: Some(20.0),
        max_size: Some(90.0),
        size_distribution: Some(SizeMode::Bimodal),
        avoid_overlap: Some(true),
        min_distance: Some(4.0),
        max_placement_attempts: Some(40),
        ..Default::default()
    };

    let mut sink = VecSink::new();
    let svg = generate_with(&rules, &mut sink)?;
    let dropped = sink.dropped();
    info!(
        "Placed {} of {} shapes; dropped indices: {:?}",
        120 - dropped.len(),
        120,
        dropped.iter().map(|d| d.index).collect::<Vec<_>>()
    );

    write_svg("composition-random-no-overlap.svg", &svg)
}
