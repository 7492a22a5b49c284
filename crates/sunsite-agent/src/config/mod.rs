//! Configuration loading for SunSite.
//! Reads sunsite.toml from the current directory or path in SUNSITE_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sunsite_common::SunsiteError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self { path: default_dataset_path() }
    }
}

fn default_dataset_path() -> PathBuf { PathBuf::from(sunsite_dataset::DEFAULT_DATASET_FILE) }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_high_threshold")]
    pub high_suitability_threshold: f64,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            high_suitability_threshold: default_high_threshold(),
            format: OutputFormat::default(),
        }
    }
}

fn default_top_k()          -> usize { 10 }
fn default_high_threshold() -> f64   { 0.60 }

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub dataset_path: Option<PathBuf>,
    pub top_k: Option<usize>,
    pub high_suitability_threshold: Option<f64>,
    pub json: bool,
}

mod tests;

impl Config {
    /// Load configuration from sunsite.toml.
    /// An explicit path must exist; otherwise SUNSITE_CONFIG, then ./sunsite.toml,
    /// falling back to defaults when neither is present.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(
                std::env::var("SUNSITE_CONFIG").unwrap_or_else(|_| "sunsite.toml".to_string()),
            ),
        };

        if !path.exists() {
            if explicit.is_some() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            tracing::warn!(path = %path.display(), "No config file found; using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.dataset_path {
            self.dataset.path = path;
        }
        if let Some(k) = overrides.top_k {
            self.report.top_k = k;
        }
        if let Some(t) = overrides.high_suitability_threshold {
            self.report.high_suitability_threshold = t;
        }
        if overrides.json {
            self.report.format = OutputFormat::Json;
        }
    }

    pub fn validate(&self) -> sunsite_common::Result<()> {
        let t = self.report.high_suitability_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(SunsiteError::Config(format!(
                "report.high_suitability_threshold must be within [0, 1], got {t}"
            )));
        }
        if self.report.top_k == 0 {
            return Err(SunsiteError::Config("report.top_k must be at least 1".to_string()));
        }
        Ok(())
    }
}
