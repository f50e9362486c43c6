//! subdiv CLI - subdivision pattern generation for planar regions
//!
//! Reads a JSON job (boundary polygon plus pattern configuration),
//! generates the pattern, and writes the result as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

use subdiv_math::Point3;
use subdiv_pattern::{generate, PatternConfig, PatternShape, PlanarRegion, Severity};

#[derive(Parser)]
#[command(name = "subdiv")]
#[command(about = "Planar subdivision pattern generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a pattern from a job file
    Generate {
        /// Input job file (.json)
        input: PathBuf,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Display information about a job file without writing output
    Info {
        /// Input job file (.json)
        input: PathBuf,
    },
}

/// One generation job: a boundary polygon and a pattern configuration.
#[derive(Deserialize)]
struct PatternJob {
    /// Boundary vertices as [x, y, z] triples, in order.
    boundary: Vec<[f64; 3]>,
    /// Pattern parameters; missing fields take their defaults.
    #[serde(default)]
    config: PatternConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output } => generate_pattern(&input, output.as_deref()),
        Commands::Info { input } => show_info(&input),
    }
}

fn load_job(input: &std::path::Path) -> Result<(PlanarRegion, PatternConfig)> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let job: PatternJob =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", input.display()))?;

    let vertices: Vec<Point3> = job
        .boundary
        .iter()
        .map(|[x, y, z]| Point3::new(*x, *y, *z))
        .collect();
    let region = PlanarRegion::new(vertices)
        .with_context(|| format!("invalid boundary in {}", input.display()))?;

    Ok((region, job.config))
}

fn generate_pattern(input: &std::path::Path, output: Option<&std::path::Path>) -> Result<()> {
    let (region, config) = load_job(input)?;
    let outcome = generate(&region, &config);

    for diag in &outcome.diagnostics {
        let tag = match diag.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        eprintln!("{}: {}", tag, diag.message);
    }

    let json = serde_json::to_string_pretty(&outcome)?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote pattern to {}", path.display());
        }
        None => println!("{json}"),
    }

    if outcome.has_errors() {
        anyhow::bail!("generation reported errors");
    }
    Ok(())
}

fn show_info(input: &std::path::Path) -> Result<()> {
    let (region, config) = load_job(input)?;

    println!("pattern job: {}", input.display());
    println!("  Boundary vertices: {}", region.vertices().len());
    let c = region.centroid();
    println!("  Centroid: ({:.3}, {:.3}, {:.3})", c.x, c.y, c.z);
    let n = region.normal();
    println!("  Normal: ({:.3}, {:.3}, {:.3})", n.x, n.y, n.z);
    println!("  Mode: {:?}", config.subdivision_mode);
    println!("  Spacing: {:?} ({})", config.spacing_mode, config.primary_spacing);

    let outcome = generate(&region, &config);
    match &outcome.shape {
        PatternShape::Segments(segments) => {
            let total: f64 = segments.iter().map(|s| s.length()).sum();
            println!("\nResult:");
            println!("  Segments: {}", segments.len());
            println!("  Total length: {:.3}", total);
        }
        PatternShape::Fused(wires) => {
            let total: f64 = wires.iter().map(|w| w.length()).sum();
            let closed = wires.iter().filter(|w| w.closed).count();
            println!("\nResult:");
            println!("  Wires: {} ({} closed)", wires.len(), closed);
            println!("  Total length: {:.3}", total);
        }
    }
    if !outcome.diagnostics.is_empty() {
        println!("  Diagnostics:");
        for diag in &outcome.diagnostics {
            println!("    {:?}: {}", diag.severity, diag.message);
        }
    }

    Ok(())
}
