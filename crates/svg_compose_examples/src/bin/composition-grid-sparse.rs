use svg_compose::prelude::*;
use svg_compose_examples::{demo_rules, init_tracing, write_svg};

fn main() -> anyhow::Result<()> {
    init_tracing();
    // 8×8 grid, roughly a quarter of the cells left empty, shapes keyed by row
    // and colors by column.
    let mut rules = demo_rules(Composition::Grid, &["circle", "roundedRect", "diamond"], 11);
    rules.params = StrategyParams {
        rows: Some(8),
        cols: Some(8),
        sparsity: Some(0.25),
        padding: Some(0.25),
        enable_rotation: Some(true),
        shape_distribution: Some(Distribution::Row),
        color_distribution: Some(Distribution::Column),
        ..Default::default()
    };

    write_svg("composition-grid-sparse.svg", &generate(&rules)?)
}
