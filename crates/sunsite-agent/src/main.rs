//! SunSite — Solar site suitability ranking.
//! Entry point for the `sunsite` binary.

mod config;
mod report;

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, ConfigOverrides};
use sunsite_dataset::RegionDataset;

/// Rank regions by solar site suitability.
#[derive(Debug, Parser)]
#[command(name = "sunsite", version)]
struct Cli {
    /// Path to sunsite.toml (defaults to $SUNSITE_CONFIG, then ./sunsite.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Region dataset CSV
    #[arg(long)]
    data: Option<PathBuf>,

    /// Show the metric table for one region
    #[arg(long)]
    region: Option<String>,

    /// Number of regions in the top list
    #[arg(long)]
    top: Option<usize>,

    /// Score at or above which a region counts as highly suitable
    #[arg(long)]
    threshold: Option<f64>,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sunsite=debug,info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("SunSite {}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(ConfigOverrides {
        dataset_path: cli.data,
        top_k: cli.top,
        high_suitability_threshold: cli.threshold,
        json: cli.json,
    });
    config.validate()?;

    let dataset = RegionDataset::load_from_path(&config.dataset.path).await?;
    info!(
        regions = dataset.len(),
        loaded_at = %dataset.loaded_at(),
        "Region dataset loaded"
    );

    let source = dataset.source_file().display().to_string();
    let report = report::prepare(
        dataset.regions(),
        &source,
        &config.report,
        cli.region.as_deref(),
    )?;
    let rendered = report::render(report.as_ref(), config.report.format)?;
    println!("{rendered}");

    Ok(())
}
