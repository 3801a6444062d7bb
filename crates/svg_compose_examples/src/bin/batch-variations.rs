use rand::rngs::StdRng;
use rand::SeedableRng;
use svg_compose::prelude::*;
use svg_compose_examples::{demo_rules, init_tracing, write_svg};

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Two base designs, twelve derived members rendered in parallel.
    let mut spiral = demo_rules(Composition::Spiral, &["circle", "star"], 100);
    spiral.params.count = Some(60);
    spiral.params.turns = Some(4.0);
    let mut radial = demo_rules(Composition::Radial, &["diamond", "donut"], 200);
    radial.params.count = Some(16);
    radial.params.rotation_type = Some(RotationMode::Radial);

    let spec = VariationSpec::new()
        .perturb("seed", Perturbation::Increment(1.0))
        .perturb("turns", Perturbation::Range(0.3))
        .perturb("count", Perturbation::Range(0.25))
        .add_colors(["#e63946"])
        .remove_colors(["#fff7e4"]);

    let mut rng = StdRng::seed_from_u64(7);
    let members = plan_batch(&[spiral, radial], &spec, 12, &mut rng)?;
    let generator = Generator::default();

    for (i, svg) in render_batch(&members, &generator).into_iter().enumerate() {
        let path = format!("batch-variations/member-{i:02}-{}.svg", members[i].composition);
        write_svg(path, &svg?)?;
    }
    Ok(())
}
