//! Command-line front end: render rule files, optionally through a brand policy.
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use svg_compose::prelude::*;
use svg_compose_examples::{init_tracing, load, write_svg};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "svg-compose")]
#[command(version, about = "Render procedural SVG compositions from rule files", long_about = None)]
struct Cli {
    /// Brand configuration (JSON or RON) to validate rule files against
    #[arg(short, long, global = true)]
    brand: Option<PathBuf>,

    /// Stamp documents with the current time instead of the epoch
    #[arg(long, global = true)]
    now: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one rule file
    Generate {
        /// Rule file (JSON or RON)
        rules: PathBuf,

        /// Output path
        #[arg(short, long, default_value = "output.svg")]
        out: PathBuf,
    },

    /// Derive and render a family of documents from one or more base rule files
    Batch {
        /// Base rule files
        #[arg(required = true)]
        rules: Vec<PathBuf>,

        /// Variation spec (JSON or RON)
        #[arg(short, long)]
        variation: PathBuf,

        /// Number of members to derive
        #[arg(short = 'n', long, default_value = "8")]
        count: usize,

        /// Seed for base selection and range perturbations
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Output directory
        #[arg(short, long, default_value = "./batch")]
        out_dir: PathBuf,
    },

    /// List the registered shape kinds
    Shapes,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let brand = match &cli.brand {
        Some(path) => {
            let brand: BrandConfig = load(path)?;
            brand.verify().context("brand configuration")?;
            Some(brand)
        }
        None => None,
    };
    let timestamp = if cli.now {
        Timestamp::Now
    } else {
        Timestamp::default()
    };
    let generator = Generator::new(
        GenerateConfig::new().with_timestamp(timestamp),
        ShapeRegistry::builtin(),
    );

    match cli.command {
        Commands::Generate { rules, out } => {
            let rules = load_rules(&rules, brand.as_ref())?;
            write_svg(&out, &generator.generate(&rules)?)
        }
        Commands::Batch {
            rules,
            variation,
            count,
            seed,
            out_dir,
        } => {
            let bases = rules
                .iter()
                .map(|path| load_rules(path, brand.as_ref()))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let spec: VariationSpec = load(&variation)?;
            if spec.is_empty() {
                warn!("Variation spec is empty; every member repeats a base.");
            }
            let members = plan_batch(&bases, &spec, count, &mut StdRng::seed_from_u64(seed))?;
            for (i, svg) in render_batch(&members, &generator).into_iter().enumerate() {
                write_svg(out_dir.join(format!("member-{i:03}.svg")), &svg?)?;
            }
            info!("Rendered {} members into {}", members.len(), out_dir.display());
            Ok(())
        }
        Commands::Shapes => {
            let registry = ShapeRegistry::builtin();
            for id in registry.ids() {
                let description = registry
                    .get(id)
                    .map(|s| s.description().to_owned())
                    .unwrap_or_default();
                println!("{id:<18} {description}");
            }
            Ok(())
        }
    }
}

/// Rules straight from the file, or a request validated through the brand.
fn load_rules(path: &Path, brand: Option<&BrandConfig>) -> anyhow::Result<GenerationRules> {
    match brand {
        Some(brand) => {
            let request: RuleRequest = load(path)?;
            let fallback_seed = Utc::now().timestamp_millis() % 10_000;
            Ok(brand.validate(&request, fallback_seed)?)
        }
        None => load(path),
    }
}
