//! SVG document envelope: canvas element, metadata and the shape body.
use std::fmt::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::rules::Canvas;
use crate::shape::RenderedShape;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Tool identifier written into every document.
pub fn generator_name() -> String {
    format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Where the `generatedAt` metadata comes from.
///
/// The default is a fixed instant (the Unix epoch), which keeps identical rules
/// producing byte-identical documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Fixed(DateTime<Utc>),
    /// Wall clock at the time the document is assembled.
    Now,
}

impl Timestamp {
    pub fn resolve(&self) -> DateTime<Utc> {
        match self {
            Timestamp::Fixed(at) => *at,
            Timestamp::Now => Utc::now(),
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Fixed(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Document metadata block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub generator: String,
    pub generated_at: DateTime<Utc>,
}

impl Metadata {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            generator: generator_name(),
            generated_at: timestamp.resolve(),
        }
    }

    /// RFC 3339 with millisecond precision and a `Z` suffix.
    pub fn generated_at_rfc3339(&self) -> String {
        self.generated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<metadata><generator>{}</generator><generatedAt>{}</generatedAt></metadata>",
            self.generator,
            self.generated_at_rfc3339()
        )
    }
}

/// An SVG document under assembly. Shapes are drawn in push order.
#[derive(Debug, Clone)]
pub struct Document {
    canvas: Canvas,
    metadata: Metadata,
    body: String,
    shapes: usize,
    primitives: usize,
}

impl Document {
    pub fn new(canvas: Canvas, metadata: Metadata) -> Self {
        Self {
            canvas,
            metadata,
            body: String::new(),
            shapes: 0,
            primitives: 0,
        }
    }

    pub fn push(&mut self, shape: &RenderedShape) {
        // Writing into a String cannot fail.
        let _ = write!(self.body, "{shape}");
        self.shapes += 1;
        self.primitives += shape.primitive_count();
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn shape_count(&self) -> usize {
        self.shapes
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives
    }

    /// The concatenated shape elements without the envelope.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_string(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Canvas { width, height } = self.canvas;
        write!(
            f,
            "<svg xmlns=\"{SVG_NS}\" viewBox=\"0 0 {width} {height}\" width=\"{width}\" height=\"{height}\">"
        )?;
        write!(f, "{}", self.metadata)?;
        f.write_str(&self.body)?;
        f.write_str("</svg>")
    }
}
