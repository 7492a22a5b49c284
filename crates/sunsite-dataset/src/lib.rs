//! Regional deployment dataset loader.
//!
//! Loads per-region metrics from the tabular CSV export and keeps the raw
//! load in memory so a host can re-score without re-reading the file.
//!
//! Expected header (extra columns are ignored):
//! `Region, Solar_Irradiance_kWh_m2_day, Rural_Pop_Density_per_km2,
//!  Grid_Access_Percent, Infrastructure_Index, Electricity_Cost_USD_per_kWh,
//!  Terrain_Ruggedness_Score`
//!
//! A missing metric column or an empty cell loads as an absent metric; the
//! scorer decides what to do with it. `NaN` and `inf` cells are rejected.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use sunsite_common::{Feature, RegionMetrics};
use tracing::{debug, info, warn};

/// Default dataset file name, relative to the working directory.
pub const DEFAULT_DATASET_FILE: &str = "PrimeFrontier_SolarDeploymentDataset.csv";

/// One CSV row as published.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Solar_Irradiance_kWh_m2_day", default)]
    solar_irradiance: Option<f64>,
    #[serde(rename = "Rural_Pop_Density_per_km2", default)]
    rural_population_density: Option<f64>,
    #[serde(rename = "Grid_Access_Percent", default)]
    grid_access_percent: Option<f64>,
    #[serde(rename = "Infrastructure_Index", default)]
    infrastructure_index: Option<f64>,
    #[serde(rename = "Electricity_Cost_USD_per_kWh", default)]
    electricity_cost: Option<f64>,
    #[serde(rename = "Terrain_Ruggedness_Score", default)]
    terrain_ruggedness: Option<f64>,
}

impl From<DatasetRow> for RegionMetrics {
    fn from(row: DatasetRow) -> Self {
        RegionMetrics {
            region_id: row.region,
            solar_irradiance: row.solar_irradiance,
            grid_access_percent: row.grid_access_percent,
            infrastructure_index: row.infrastructure_index,
            electricity_cost: row.electricity_cost,
            rural_population_density: row.rural_population_density,
            terrain_ruggedness: row.terrain_ruggedness,
        }
    }
}

/// In-memory copy of one dataset load.
#[derive(Debug, Clone)]
pub struct RegionDataset {
    /// Rows in file order
    regions: Vec<RegionMetrics>,
    /// When the file was loaded
    loaded_at: DateTime<Utc>,
    /// Source file path, or a label for in-memory sources
    source_file: PathBuf,
}

impl RegionDataset {
    /// Load the dataset from a CSV file.
    ///
    /// If the file doesn't exist, returns an error naming the expected path.
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            anyhow::bail!(
                "Region dataset not found at {:?}\n\
                 Pass --data <file.csv> or set dataset.path in sunsite.toml",
                path
            );
        }

        info!(dataset = %path.display(), "Loading region dataset");

        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_reader(content.as_slice(), path)
    }

    /// Parse a dataset from any reader. `source` is recorded for diagnostics.
    pub fn from_reader<R: Read>(reader: R, source: impl Into<PathBuf>) -> Result<Self> {
        let source_file = source.into();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().context("Failed to read CSV header")?.clone();
        if !headers.iter().any(|h| h == "Region") {
            anyhow::bail!(
                "Region dataset {:?} has no 'Region' column (found: {})",
                source_file,
                headers.iter().collect::<Vec<_>>().join(", ")
            );
        }
        for feature in Feature::ALL {
            if !headers.iter().any(|h| h == feature.column()) {
                warn!(
                    column = feature.column(),
                    "Dataset column missing; every region will lack this metric"
                );
            }
        }

        let mut regions = Vec::new();
        for (idx, result) in reader.deserialize::<DatasetRow>().enumerate() {
            // Header is line 1
            let row = result.with_context(|| {
                format!("Invalid row {} in {}", idx + 2, source_file.display())
            })?;
            let metrics = RegionMetrics::from(row);
            if let Some(feature) = Feature::ALL
                .into_iter()
                .find(|f| metrics.get(*f).is_some_and(|v| !v.is_finite()))
            {
                anyhow::bail!(
                    "Invalid row {} in {}: {} for region '{}' is not a finite number",
                    idx + 2,
                    source_file.display(),
                    feature.column(),
                    metrics.region_id
                );
            }
            regions.push(metrics);
        }

        debug!(rows = regions.len(), source = %source_file.display(), "Parsed region dataset");

        Ok(Self {
            regions,
            loaded_at: Utc::now(),
            source_file,
        })
    }

    /// Wrap an already-built batch (e.g. from another source).
    pub fn from_regions(regions: Vec<RegionMetrics>, source: impl Into<PathBuf>) -> Self {
        Self {
            regions,
            loaded_at: Utc::now(),
            source_file: source.into(),
        }
    }

    pub fn regions(&self) -> &[RegionMetrics] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    /// First row for `region_id`.
    pub fn region(&self, region_id: &str) -> Option<&RegionMetrics> {
        self.regions.iter().find(|r| r.region_id == region_id)
    }

    /// Distinct region identifiers in first-seen order.
    pub fn region_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.regions
            .iter()
            .map(|r| r.region_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }
}
