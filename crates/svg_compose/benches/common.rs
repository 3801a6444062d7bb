use std::time::Duration;

use criterion::{Criterion, Throughput};
use svg_compose::prelude::{Composition, GenerationRules};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

pub fn rules(composition: Composition) -> GenerationRules {
    GenerationRules::new(
        1024.0,
        1024.0,
        composition,
        ["circle", "rect", "star", "hexagon", "donut", "heart"]
            .map(String::from)
            .to_vec(),
        ["#fec042", "#f27d39", "#2b2d42", "#fff7e4"]
            .map(String::from)
            .to_vec(),
    )
    .with_seed(0xA11CE)
}
