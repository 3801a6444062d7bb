//! High-level entry points turning [`GenerationRules`] into SVG text.
use tracing::{debug, info};

use crate::composition::Layout;
use crate::document::{Document, Metadata, Timestamp};
use crate::error::Result;
use crate::events::{EventSink, GenerationEvent};
use crate::random::SeededRandom;
use crate::rules::GenerationRules;
use crate::shape::{ShapeRegistry, FALLBACK_SHAPE};

/// Configuration shared by every document a [`Generator`] produces.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerateConfig {
    /// Source of the `generatedAt` metadata.
    pub timestamp: Timestamp,
}

impl GenerateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timestamp policy.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Runs composition strategies and renders their output through a shape registry.
///
/// A generator holds no per-run state: every call owns its own random stream,
/// so one generator can serve many threads.
#[derive(Clone, Copy)]
pub struct Generator<'a> {
    pub config: GenerateConfig,
    pub registry: &'a ShapeRegistry,
}

impl<'a> Generator<'a> {
    pub fn new(config: GenerateConfig, registry: &'a ShapeRegistry) -> Self {
        Self { config, registry }
    }

    pub fn generate(&self, rules: &GenerationRules) -> Result<String> {
        self.generate_with(rules, &mut ())
    }

    pub fn generate_with(&self, rules: &GenerationRules, sink: &mut dyn EventSink) -> Result<String> {
        Ok(self.document_with(rules, sink)?.into_string())
    }

    /// Assemble the document without serializing it.
    pub fn document_with(
        &self,
        rules: &GenerationRules,
        sink: &mut dyn EventSink,
    ) -> Result<Document> {
        rules.validate()?;
        let palette = rules.palette()?;

        sink.send(GenerationEvent::Started {
            composition: rules.composition,
            seed: rules.seed,
            width: rules.width,
            height: rules.height,
        });
        for kind in palette.shapes().iter().filter(|k| !self.registry.contains(k)) {
            sink.send(GenerationEvent::Warning {
                context: kind.clone(),
                message: format!("unknown shape kind, rendering as '{FALLBACK_SHAPE}'"),
            });
        }

        let mut rng = SeededRandom::new(rules.seed);
        let Layout { instances, dropped } = rules
            .composition
            .strategy(rules)
            .compose(&palette, &mut rng);

        let mut document = Document::new(rules.canvas(), Metadata::new(self.config.timestamp));
        for (index, instance) in instances.iter().enumerate() {
            let rendered = self.registry.render(
                &instance.kind,
                instance.center,
                instance.size,
                &instance.fill,
                instance.rotation,
            );
            document.push(&rendered);
            sink.send(GenerationEvent::ShapePlaced {
                index,
                kind: instance.kind.clone(),
                center: instance.center,
                primitives: rendered.primitive_count(),
            });
        }

        if !dropped.is_empty() {
            let indices: Vec<usize> = dropped.iter().map(|d| d.index).collect();
            debug!(
                "{} strategy dropped {} shape(s) at {:?}",
                rules.composition,
                dropped.len(),
                indices
            );
        }
        for d in &dropped {
            sink.send(GenerationEvent::ShapeDropped(*d));
        }

        sink.send(GenerationEvent::Finished {
            placed: document.shape_count(),
            dropped: dropped.len(),
            primitives: document.primitive_count(),
        });
        info!(
            "Generated {} document: {} shapes, {} primitives, {} dropped (seed {})",
            rules.composition,
            document.shape_count(),
            document.primitive_count(),
            dropped.len(),
            rules.seed
        );

        Ok(document)
    }
}

impl Default for Generator<'static> {
    fn default() -> Self {
        Self::new(GenerateConfig::default(), ShapeRegistry::builtin())
    }
}

/// Generate a document with the built-in shapes and a fixed timestamp.
pub fn generate(rules: &GenerationRules) -> Result<String> {
    Generator::default().generate(rules)
}

/// Like [`generate`], reporting progress to `sink`.
pub fn generate_with(rules: &GenerationRules, sink: &mut dyn EventSink) -> Result<String> {
    Generator::default().generate_with(rules, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Composition;
    use crate::error::Error;
    use crate::events::VecSink;

    fn rules(composition: Composition) -> GenerationRules {
        GenerationRules::new(
            400.0,
            300.0,
            composition,
            vec!["circle".into(), "donut".into()],
            vec!["#123".into(), "#456".into()],
        )
        .with_seed(7)
    }

    #[test]
    fn generate_is_byte_identical_for_identical_rules() {
        for c in Composition::ALL {
            let r = rules(c);
            assert_eq!(generate(&r).unwrap(), generate(&r).unwrap());
        }
    }

    #[test]
    fn empty_palette_is_an_error_not_a_panic() {
        let mut r = rules(Composition::Grid);
        r.shapes.clear();
        assert!(matches!(generate(&r), Err(Error::InvalidRules(_))));
    }

    #[test]
    fn events_bracket_the_run() {
        let mut r = rules(Composition::Grid);
        r.params.rows = Some(2);
        r.params.cols = Some(3);
        let mut sink = VecSink::new();
        generate_with(&r, &mut sink).unwrap();
        let events = sink.as_slice();
        assert!(matches!(events[0], GenerationEvent::Started { seed: 7, .. }));
        let placed = events
            .iter()
            .filter(|e| matches!(e, GenerationEvent::ShapePlaced { .. }))
            .count();
        assert_eq!(placed, 6);
        assert!(matches!(
            events.last(),
            Some(GenerationEvent::Finished {
                placed: 6,
                dropped: 0,
                ..
            })
        ));
    }

    #[test]
    fn unknown_kinds_are_reported_and_rendered_as_circles() {
        let mut r = rules(Composition::Radial);
        r.shapes = vec!["blob".into()];
        let mut sink = VecSink::new();
        let svg = generate_with(&r, &mut sink).unwrap();
        assert_eq!(svg.matches("<circle").count(), 8);
        assert!(sink.as_slice().iter().any(
            |e| matches!(e, GenerationEvent::Warning { context, .. } if context == "blob")
        ));
    }

    #[test]
    fn dropped_shapes_reach_the_sink() {
        let mut r = rules(Composition::Random);
        r.width = 100.0;
        r.height = 100.0;
        r.params.count = Some(4);
        r.params.padding = Some(0.0);
        r.params.min_size = Some(150.0);
        r.params.max_size = Some(150.0);
        r.params.avoid_overlap = Some(true);
        r.params.max_placement_attempts = Some(3);
        let mut sink = VecSink::new();
        generate_with(&r, &mut sink).unwrap();
        assert_eq!(sink.dropped().len(), 3);
        assert!(matches!(
            sink.as_slice().last(),
            Some(GenerationEvent::Finished {
                placed: 1,
                dropped: 3,
                ..
            })
        ));
    }

    #[test]
    fn custom_registry_and_timestamp() {
        let mut registry = ShapeRegistry::new();
        registry.register("square", crate::shape::basic::Square::default());
        let generator = Generator::new(
            GenerateConfig::new().with_timestamp(Timestamp::Fixed(
                chrono::DateTime::from_timestamp(86_400, 0).unwrap(),
            )),
            &registry,
        );
        let mut r = rules(Composition::Grid);
        r.shapes = vec!["square".into()];
        let svg = generator.generate(&r).unwrap();
        assert!(svg.contains("1970-01-02T00:00:00.000Z"));
        assert_eq!(svg.matches("<rect").count(), 16);
    }
}
