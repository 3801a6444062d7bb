use svg_compose::prelude::*;
use svg_compose_examples::{demo_rules, init_tracing, write_svg};

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Shapes ride three periods of a sine, sized by crest height and tilted
    // along the slope.
    let mut rules = demo_rules(Composition::Wave, &["circle", "rect", "star"], 5);
    rules.params = StrategyParams {
        count: Some(40),
        waves: Some(3.0),
        wave_height: Some(180.0),
        padding_x: Some(40.0),
        phase_shift: Some(0.5),
        size_distribution: Some(SizeMode::Wave),
        rotation_type: Some(RotationMode::Wave),
        shape_distribution: Some(Distribution::WaveHeight),
        color_distribution: Some(Distribution::Progress),
        ..Default::default()
    };

    write_svg("composition-wave-ribbon.svg", &generate(&rules)?)
}
