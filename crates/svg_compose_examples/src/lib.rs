#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use svg_compose::prelude::{Composition, GenerationRules};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Palette shared by the demos.
pub const DEMO_COLORS: [&str; 4] = ["#fec042", "#f27d39", "#2b2d42", "#fff7e4"];

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Read a JSON or RON (by `.ron` extension) document.
pub fn load<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value = match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => {
            ron::from_str(&text).with_context(|| format!("parsing RON {}", path.display()))?
        }
        _ => serde_json::from_str(&text)
            .with_context(|| format!("parsing JSON {}", path.display()))?,
    };
    Ok(value)
}

/// Write an SVG document, creating parent directories as needed.
pub fn write_svg(path: impl AsRef<Path>, svg: &str) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {} ({} bytes)", path.display(), svg.len());
    Ok(())
}

/// 800×800 rules over the demo palette.
pub fn demo_rules(composition: Composition, shapes: &[&str], seed: i64) -> GenerationRules {
    GenerationRules::new(
        800.0,
        800.0,
        composition,
        shapes.iter().map(|s| s.to_string()).collect(),
        DEMO_COLORS.iter().map(|s| s.to_string()).collect(),
    )
    .with_seed(seed)
}
