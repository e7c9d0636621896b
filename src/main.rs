//! printview CLI - G-code toolpath preview summary
//!
//! Loads a slicer G-code file, builds the preview geometry, and prints
//! what a renderer would receive.

use anyhow::{Context, Result};
use clap::Parser;
use printview::{init_logging, Config, FeatureType, GcodeFileReader, Preview, PreviewSummary};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "printview", version = printview::VERSION)]
#[command(about = "Summarize the toolpath preview of a slicer G-code file", long_about = None)]
struct Cli {
    /// G-code file to preview
    file: PathBuf,

    /// Configuration file (.toml or .json); defaults to the platform config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep only the most recent N layers (0 keeps all)
    #[arg(short, long)]
    last: Option<f64>,

    /// Feature to leave out of the scene; repeatable
    #[arg(long = "hide", value_name = "FEATURE")]
    hidden: Vec<FeatureType>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let mut config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(last) = cli.last {
        config.parse.last = last;
    }
    config.geometry.hidden.extend(cli.hidden);
    config.validate()?;

    let reader = GcodeFileReader::new(&cli.file)?;
    let text = reader
        .read_all(config.fetch.max_bytes)
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;

    let preview = Preview::build(&text, &config)?;
    let summary = preview.summary();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&cli.file, reader.file_size(), &summary);
    }

    Ok(())
}

fn print_summary(file: &std::path::Path, bytes: u64, summary: &PreviewSummary) {
    println!("File:       {} ({} bytes)", file.display(), bytes);
    println!("Layers:     {}", summary.max_layer);
    println!(
        "Lines:      {} ({} extrusion, {} travel moves)",
        summary.stats.lines, summary.stats.extrusion_moves, summary.stats.travel_moves
    );
    if summary.clipped {
        println!("Clipped:    yes, segment cap reached");
    }

    println!();
    println!("Segments:");
    for (feature, count) in &summary.segments {
        println!("  {:<10} {:>9}", feature.to_string(), count);
    }

    println!();
    println!("Meshes (draw order):");
    for mesh in summary.meshes.iter().filter(|m| m.triangles > 0) {
        println!(
            "  {:<10} {:>9} vertices {:>9} triangles",
            mesh.feature.to_string(),
            mesh.vertices,
            mesh.triangles
        );
    }

    let b = &summary.bbox_model;
    println!();
    println!(
        "Model box:  ({:.2}, {:.2}, {:.2}) - ({:.2}, {:.2}, {:.2})",
        b.min_x, b.min_y, b.min_z, b.max_x, b.max_y, b.max_z
    );
    let b = &summary.bbox_all;
    println!(
        "Full box:   ({:.2}, {:.2}, {:.2}) - ({:.2}, {:.2}, {:.2})",
        b.min_x, b.min_y, b.min_z, b.max_x, b.max_y, b.max_z
    );

    let c = &summary.camera;
    println!(
        "Camera:     eye ({:.1}, {:.1}, {:.1}) target ({:.1}, {:.1}, {:.1}) distance {:.1}",
        c.eye[0], c.eye[1], c.eye[2], c.target[0], c.target[1], c.target[2], c.distance
    );
    println!(
        "Grid:       {:.0} mm, {} divisions, centered at ({:.1}, {:.1})",
        summary.grid.size, summary.grid.divisions, summary.grid.center_x, summary.grid.center_y
    );
}
