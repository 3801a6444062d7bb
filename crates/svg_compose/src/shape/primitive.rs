//! Drawable SVG primitives and the rendered form of one shape instance.
use std::fmt::{self, Write};

use glam::DVec2;

/// Rotation about a pivot, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f64,
    pub pivot: DVec2,
}

impl Rotation {
    /// `None` for a zero or non-finite angle, so unrotated shapes carry no transform.
    pub fn about(degrees: f64, pivot: DVec2) -> Option<Self> {
        (degrees != 0.0 && degrees.is_finite()).then_some(Self { degrees, pivot })
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " transform=\"rotate({}, {}, {})\"",
            self.degrees, self.pivot.x, self.pivot.y
        )
    }
}

/// One drawable SVG element.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle {
        center: DVec2,
        r: f64,
        fill: String,
    },
    Rect {
        origin: DVec2,
        width: f64,
        height: f64,
        corner_radius: Option<f64>,
        fill: String,
    },
    Ellipse {
        center: DVec2,
        rx: f64,
        ry: f64,
        fill: String,
    },
    Polygon {
        points: Vec<DVec2>,
        fill: String,
    },
    Path {
        d: String,
        fill: String,
    },
}

impl Primitive {
    pub fn circle(center: DVec2, r: f64, fill: impl Into<String>) -> Self {
        Self::Circle {
            center,
            r,
            fill: fill.into(),
        }
    }

    /// Axis-aligned rectangle centered on `center`.
    pub fn centered_rect(center: DVec2, width: f64, height: f64, fill: impl Into<String>) -> Self {
        Self::Rect {
            origin: center - DVec2::new(width / 2.0, height / 2.0),
            width,
            height,
            corner_radius: None,
            fill: fill.into(),
        }
    }

    pub fn polygon(points: Vec<DVec2>, fill: impl Into<String>) -> Self {
        Self::Polygon {
            points,
            fill: fill.into(),
        }
    }

    /// SVG element name, e.g. `circle`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Rect { .. } => "rect",
            Self::Ellipse { .. } => "ellipse",
            Self::Polygon { .. } => "polygon",
            Self::Path { .. } => "path",
        }
    }

    pub fn fill(&self) -> &str {
        match self {
            Self::Circle { fill, .. }
            | Self::Rect { fill, .. }
            | Self::Ellipse { fill, .. }
            | Self::Polygon { fill, .. }
            | Self::Path { fill, .. } => fill,
        }
    }

    /// Write the element, optionally carrying a rotation transform.
    pub fn write_svg<W: Write>(&self, out: &mut W, rotation: Option<&Rotation>) -> fmt::Result {
        match self {
            Self::Circle { center, r, fill } => write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"",
                center.x,
                center.y,
                r,
                escape_xml(fill)
            )?,
            Self::Rect {
                origin,
                width,
                height,
                corner_radius,
                fill,
            } => {
                write!(
                    out,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                    origin.x, origin.y, width, height
                )?;
                if let Some(rc) = corner_radius {
                    write!(out, " rx=\"{rc}\" ry=\"{rc}\"")?;
                }
                write!(out, " fill=\"{}\"", escape_xml(fill))?;
            }
            Self::Ellipse {
                center,
                rx,
                ry,
                fill,
            } => write!(
                out,
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"{}\"",
                center.x,
                center.y,
                rx,
                ry,
                escape_xml(fill)
            )?,
            Self::Polygon { points, fill } => {
                out.write_str("<polygon points=\"")?;
                for (i, p) in points.iter().enumerate() {
                    if i > 0 {
                        out.write_char(' ')?;
                    }
                    write!(out, "{},{}", p.x, p.y)?;
                }
                write!(out, "\" fill=\"{}\"", escape_xml(fill))?;
            }
            Self::Path { d, fill } => write!(
                out,
                "<path d=\"{}\" fill=\"{}\"",
                escape_xml(d),
                escape_xml(fill)
            )?,
        }
        if let Some(rotation) = rotation {
            write!(out, "{rotation}")?;
        }
        out.write_str(" />")
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_svg(f, None)
    }
}

/// Rendered form of one shape instance.
///
/// Single-primitive kinds carry the rotation on the element itself; composite
/// kinds are wrapped in a `<g>` that carries it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedShape {
    pub primitives: Vec<Primitive>,
    pub rotation: Option<Rotation>,
    pub grouped: bool,
}

impl RenderedShape {
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }
}

impl fmt::Display for RenderedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.grouped {
            f.write_str("<g")?;
            if let Some(rotation) = &self.rotation {
                write!(f, "{rotation}")?;
            }
            f.write_char('>')?;
            for p in &self.primitives {
                p.write_svg(f, None)?;
            }
            f.write_str("</g>")
        } else {
            for p in &self.primitives {
                p.write_svg(f, self.rotation.as_ref())?;
            }
            Ok(())
        }
    }
}
