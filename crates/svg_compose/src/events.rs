//! Event types and sinks for observing document generation.
//!
//! [`crate::generator::Generator::generate_with`] reports progress as
//! [`GenerationEvent`]s to an [`EventSink`]. Pass `&mut ()` to ignore them,
//! a [`VecSink`] to collect them, or a [`FnSink`] to react inline.
use glam::DVec2;

use crate::composition::{Composition, DroppedShape};
use crate::rules::ShapeKindId;

/// Describes events emitted while generating one document.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// Emitted once the rules have been validated and the strategy is about to run.
    Started {
        composition: Composition,
        seed: i64,
        width: f64,
        height: f64,
    },

    /// Emitted for every shape instance written to the document, in z-order.
    ShapePlaced {
        /// Position in the document's shape sequence.
        index: usize,
        kind: ShapeKindId,
        center: DVec2,
        /// Number of primitives the shape rendered to.
        primitives: usize,
    },

    /// Emitted when a strategy gave up on an instance.
    ShapeDropped(DroppedShape),

    /// Emitted when the document is complete.
    Finished {
        placed: usize,
        dropped: usize,
        /// Total primitive elements in the document.
        primitives: usize,
    },

    /// Non-fatal warning generated during generation.
    Warning {
        /// Context string (e.g. a shape kind).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// A generic event sink that accepts [`GenerationEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = GenerationEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}
}

/// Sink backed by a closure.
pub struct FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        (self.f)(event);
    }
}

/// Records every event in order; the usual sink in tests.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<GenerationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Instances dropped during the run, in order.
    pub fn dropped(&self) -> Vec<DroppedShape> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GenerationEvent::ShapeDropped(d) => Some(*d),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        self.events.push(event);
    }
}

/// Delivers each event to every inner sink.
pub struct MultiSink<S: EventSink> {
    sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self { sinks: Vec::new() }
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: GenerationEvent) {
        let Some((last, rest)) = self.sinks.split_last_mut() else {
            return;
        };
        for sink in rest {
            sink.send(event.clone());
        }
        last.send(event);
    }
}
