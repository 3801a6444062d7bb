use svg_compose::prelude::*;

fn rules(composition: Composition, shapes: &[&str], colors: &[&str]) -> GenerationRules {
    GenerationRules::new(
        800.0,
        600.0,
        composition,
        shapes.iter().map(|s| s.to_string()).collect(),
        colors.iter().map(|s| s.to_string()).collect(),
    )
    .with_seed(2024)
}

fn body(svg: &str) -> &str {
    let start = svg.find("</metadata>").expect("metadata") + "</metadata>".len();
    let end = svg.rfind("</svg>").expect("closing tag");
    &svg[start..end]
}

#[test]
fn grid_two_by_two_emits_four_white_circles() {
    let mut r = rules(Composition::Grid, &["circle"], &["#fff"]).with_seed(1);
    r.width = 200.0;
    r.height = 100.0;
    r.params.rows = Some(2);
    r.params.cols = Some(2);

    let svg = generate(&r).unwrap();
    let shapes = body(&svg);
    assert_eq!(shapes.matches("<circle").count(), 4);
    assert_eq!(shapes.matches("fill=\"#fff\"").count(), 4);
    for (x, y) in [(50, 25), (150, 25), (50, 75), (150, 75)] {
        assert!(shapes.contains(&format!("cx=\"{x}\" cy=\"{y}\"")), "{shapes}");
    }
    assert!(!shapes.contains("transform"));
}

#[test]
fn fractal_depth_one_three_children_emits_four_primitives() {
    let mut r = rules(Composition::Fractal, &["circle"], &["#000"]);
    r.params.max_depth = Some(1);
    r.params.child_count = Some(3);
    let svg = generate(&r).unwrap();
    assert_eq!(body(&svg).matches("<circle").count(), 4);
}

#[test]
fn random_with_overlap_avoidance_places_all_ten_apart() {
    let mut r = rules(Composition::Random, &["circle"], &["#000"]);
    r.params.count = Some(10);
    r.params.avoid_overlap = Some(true);
    r.params.min_distance = Some(0.0);

    let layout = compose(&r).unwrap();
    assert_eq!(layout.len(), 10);
    assert!(layout.dropped.is_empty());
    for (i, a) in layout.instances.iter().enumerate() {
        for b in &layout.instances[i + 1..] {
            assert!(a.center.distance(b.center) >= a.size / 2.0 + b.size / 2.0);
        }
    }
    assert_eq!(body(&generate(&r).unwrap()).matches("<circle").count(), 10);
}

#[test]
fn generation_is_deterministic_and_seed_sensitive() {
    for c in Composition::ALL {
        let r = rules(c, &["circle", "rect", "triangle"], &["#1", "#2", "#3"]);
        let a = generate(&r).unwrap();
        assert_eq!(a, generate(&r).unwrap(), "{c}");
        assert_ne!(a, generate(&r.clone().with_seed(77)).unwrap(), "{c}");
    }
}

#[test]
fn shape_counts_match_the_requested_layout() {
    let mut r = rules(Composition::Spiral, &["circle"], &["#000"]);
    r.params.count = Some(12);
    assert_eq!(body(&generate(&r).unwrap()).matches("<circle").count(), 12);

    let mut r = rules(Composition::Cluster, &["circle"], &["#000"]);
    r.params.cluster_count = Some(2);
    r.params.shapes_per_cluster = Some(5);
    assert_eq!(body(&generate(&r).unwrap()).matches("<circle").count(), 10);

    let mut r = rules(Composition::Wave, &["circle"], &["#000"]);
    r.params.count = Some(9);
    assert_eq!(body(&generate(&r).unwrap()).matches("<circle").count(), 9);
}

#[test]
fn unknown_kind_and_policy_fall_back_without_error() {
    let mut r = rules(Composition::Grid, &["not-a-shape"], &["#000"]);
    r.params.shape_distribution = Some(Distribution::from("sideways"));
    let svg = generate(&r).unwrap();
    assert_eq!(body(&svg).matches("<circle").count(), 16);
}

#[test]
fn markup_in_colors_is_escaped() {
    let color = r#"red"/><script>alert(1)</script><x a=""#;
    let mut r = rules(Composition::Grid, &["circle"], &[color]);
    r.params.rows = Some(1);
    r.params.cols = Some(1);
    let svg = generate(&r).unwrap();
    assert!(!svg.contains("<script>"));
    assert!(svg.contains("fill=\"red&quot;/&gt;&lt;script&gt;"));
    assert_eq!(svg.matches("<circle").count(), 1);
}

#[test]
fn composite_shapes_are_grouped_with_their_rotation() {
    let mut r = rules(Composition::Radial, &["cross"], &["#000"]);
    r.params.count = Some(4);
    r.params.rotation_type = Some(RotationMode::Tangent);
    let svg = generate(&r).unwrap();
    let shapes = body(&svg);
    assert_eq!(shapes.matches("<g transform=\"rotate(").count(), 4);
    assert_eq!(shapes.matches("<rect").count(), 8);
}

#[test]
fn derived_rules_render_and_leave_the_base_untouched() {
    let base = rules(Composition::Grid, &["circle", "rect"], &["#a", "#b"]);
    let snapshot = base.clone();
    let spec = VariationSpec::new()
        .perturb("seed", Perturbation::Increment(1.0))
        .perturb("width", Perturbation::Range(0.25))
        .remove_shapes(["rect"])
        .with_composition(Composition::Radial);
    let derived = apply_variations(&base, &spec, &mut SeededRandom::new(3));
    assert_eq!(base, snapshot);
    assert_eq!(derived.seed, 2025);
    assert_eq!(derived.shapes, vec!["circle"]);
    assert!((600.0..=1000.0).contains(&derived.width));
    assert!(generate(&derived).is_ok());

    let unchanged = apply_variations(&base, &VariationSpec::new(), &mut SeededRandom::new(3));
    assert_eq!(unchanged, base);
}

#[cfg(feature = "serde")]
#[test]
fn rules_load_from_rule_file_json() {
    let r: GenerationRules = serde_json::from_str(
        r##"{
            "width": 300,
            "height": 300,
            "composition": "spiral",
            "seed": 5,
            "shapes": ["circle", "star"],
            "colors": ["#f00", "#0f0"],
            "count": 6,
            "turns": 2,
            "sizeDistribution": "increasing",
            "colorDistribution": "sequence"
        }"##,
    )
    .unwrap();
    assert_eq!(r.composition, Composition::Spiral);
    assert_eq!(r.params.count, Some(6));
    let svg = generate(&r).unwrap();
    assert!(svg.contains("viewBox=\"0 0 300 300\""));
}
