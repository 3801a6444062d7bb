//! Batch planning and parallel rendering of related documents.
//!
//! Planning is sequential and draws from one caller-supplied rng, so a seeded
//! rng yields the same batch every time. Rendering runs members in parallel on
//! the rayon pool; each member owns its own random stream and the only shared
//! state is the read-only shape registry.
use rand::RngCore;
use rayon::prelude::*;
use tracing::info;

use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::random::rand01;
use crate::rules::GenerationRules;
use crate::variation::{apply_variations, VariationSpec};

/// Derive `count` members, each from a uniformly chosen base.
pub fn plan_batch(
    bases: &[GenerationRules],
    spec: &VariationSpec,
    count: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<GenerationRules>> {
    if bases.is_empty() {
        return Err(Error::InvalidRules("batch needs at least one base rule set".into()));
    }
    let members = (0..count)
        .map(|_| {
            let pick = ((rand01(rng) * bases.len() as f64) as usize).min(bases.len() - 1);
            apply_variations(&bases[pick], spec, rng)
        })
        .collect();
    Ok(members)
}

/// Render every member; the output order equals the input order.
pub fn render_batch(members: &[GenerationRules], generator: &Generator<'_>) -> Vec<Result<String>> {
    info!("Rendering batch of {} documents", members.len());
    members
        .par_iter()
        .map(|rules| generator.generate(rules))
        .collect()
}
