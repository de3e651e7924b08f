use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use tracing::info;
use tracing_subscriber::EnvFilter;

use track_viz::{cumulative_distances, elevations, parse_gpx, profile, select_segment};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a GPX track segment as an elevation profile chart", long_about = None)]
struct Cli {
    /// GPX file to read
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Track index within the file
    track: usize,

    /// Segment index within the track
    segment: usize,

    /// Output image path (PNG, or SVG by extension)
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let data = fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let gpx =
        parse_gpx(&data).with_context(|| format!("failed to parse {}", cli.input.display()))?;
    let segment = select_segment(&gpx, cli.track, cli.segment)?;

    let distances = cumulative_distances(segment);
    let elevation = elevations(segment);
    profile::render(&distances, &elevation, &cli.output)
        .with_context(|| format!("failed to render {}", cli.output.display()))?;

    info!(
        "Wrote profile: {} ({} points)",
        cli.output.display(),
        distances.len()
    );
    Ok(())
}
