//! Ranked-region report: region lookup, full ranking, top-K and summary.
//! Reads scores produced by the ranker; never re-scores a filtered subset.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use sunsite_common::{Feature, RegionMetrics, ScoredRegion};
use sunsite_ranker::{score_regions, ScoredBatch};

use crate::config::{OutputFormat, ReportConfig};

const BAR_WIDTH: usize = 40;

pub const NO_DATA: &str = "No data available.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: &'static str,
    pub value: Option<f64>,
}

/// Metric table for a single selected region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionDetail {
    pub region_id: String,
    pub rank: usize,
    pub suitability_score: f64,
    pub metrics: Vec<MetricRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub region_id: String,
    pub suitability_score: f64,
}

impl From<&ScoredRegion> for RankedRow {
    fn from(r: &ScoredRegion) -> Self {
        Self {
            rank: r.rank,
            region_id: r.region_id().to_string(),
            suitability_score: r.suitability_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub best_region: String,
    pub best_score: f64,
    pub threshold: f64,
    /// Regions scoring at or above `threshold`
    pub high_suitability_count: usize,
    pub total_regions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub requested_region: Option<String>,
    /// None when no region was requested or the requested one is absent
    pub selected: Option<RegionDetail>,
    pub ranked: Vec<RankedRow>,
    pub top: Vec<RankedRow>,
    pub summary: Option<Summary>,
    pub zero_range_features: Vec<Feature>,
}

/// Metric table for `region_id`, or None if the batch has no such region.
pub fn select_region(batch: &ScoredBatch, region_id: &str) -> Option<RegionDetail> {
    let region = batch.find(region_id)?;
    let metrics = Feature::ALL
        .into_iter()
        .map(|f| MetricRow {
            metric: f.column(),
            value: region.metrics.get(f),
        })
        .collect();
    Some(RegionDetail {
        region_id: region.region_id().to_string(),
        rank: region.rank,
        suitability_score: region.suitability_score,
        metrics,
    })
}

/// The first `k` ranked regions (fewer if the batch is smaller).
pub fn top_k(batch: &ScoredBatch, k: usize) -> &[ScoredRegion] {
    &batch.regions[..k.min(batch.regions.len())]
}

pub fn summarize(batch: &ScoredBatch, threshold: f64) -> Option<Summary> {
    let best = batch.regions.first()?;
    Some(Summary {
        best_region: best.region_id().to_string(),
        best_score: best.suitability_score,
        threshold,
        high_suitability_count: batch
            .regions
            .iter()
            .filter(|r| r.suitability_score >= threshold)
            .count(),
        total_regions: batch.len(),
    })
}

pub fn build_report(
    batch: &ScoredBatch,
    source: &str,
    cfg: &ReportConfig,
    region: Option<&str>,
) -> Report {
    Report {
        generated_at: Utc::now(),
        source: source.to_string(),
        requested_region: region.map(str::to_string),
        selected: region.and_then(|id| select_region(batch, id)),
        ranked: batch.regions.iter().map(RankedRow::from).collect(),
        top: top_k(batch, cfg.top_k).iter().map(RankedRow::from).collect(),
        summary: summarize(batch, cfg.high_suitability_threshold),
        zero_range_features: batch.warnings.iter().map(|w| w.feature).collect(),
    }
}

/// Score a loaded dataset and build its report. A dataset with no rows has
/// nothing to rank and yields None rather than an `EmptyBatch` error.
pub fn prepare(
    regions: &[RegionMetrics],
    source: &str,
    cfg: &ReportConfig,
    region: Option<&str>,
) -> sunsite_common::Result<Option<Report>> {
    if regions.is_empty() {
        return Ok(None);
    }
    let scored = score_regions(regions)?;
    Ok(Some(build_report(&scored, source, cfg, region)))
}

pub fn render(report: Option<&Report>, format: OutputFormat) -> sunsite_common::Result<String> {
    match (report, format) {
        (None, _) => Ok(NO_DATA.to_string()),
        (Some(r), OutputFormat::Text) => Ok(render_text(r)),
        (Some(r), OutputFormat::Json) => render_json(r),
    }
}

pub fn render_json(report: &Report) -> sunsite_common::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_text(report: &Report) -> String {
    write_text(report).unwrap_or_default()
}

fn write_text(report: &Report) -> Result<String, std::fmt::Error> {
    let mut buf = String::new();
    let out = &mut buf;
    writeln!(out, "Solar Site Suitability & Region Metrics")?;
    writeln!(out, "Source: {}", report.source)?;
    writeln!(out)?;

    if let Some(id) = &report.requested_region {
        match &report.selected {
            Some(detail) => {
                writeln!(out, "Metrics for {id}")?;
                for row in &detail.metrics {
                    match row.value {
                        Some(v) => writeln!(out, "  {:<32} {v:>10.3}", row.metric)?,
                        None => writeln!(out, "  {:<32} {:>10}", row.metric, "-")?,
                    }
                }
                writeln!(
                    out,
                    "  {:<32} {:>10.3}",
                    "Solar_Site_Suitability_Score", detail.suitability_score
                )?;
                writeln!(out, "  {:<32} {:>10}", "Rank", detail.rank)?;
            }
            None => writeln!(out, "No data available for selected region.")?,
        }
        writeln!(out)?;
    }

    writeln!(out, "Ranked List of Regions by Solar Site Suitability Score")?;
    writeln!(out, "{:>5}  {:<24} {:>8}", "Rank", "Region", "Score")?;
    for row in &report.ranked {
        writeln!(out, "{:>5}  {:<24} {:>8.4}", row.rank, row.region_id, row.suitability_score)?;
    }
    writeln!(out)?;

    writeln!(out, "Top {} Regions by Solar Site Suitability Score", report.top.len())?;
    for row in &report.top {
        writeln!(
            out,
            "  {:<24} {:<width$} {:.2}",
            row.region_id,
            score_bar(row.suitability_score),
            row.suitability_score,
            width = BAR_WIDTH
        )?;
    }
    writeln!(out)?;

    match &report.summary {
        Some(s) => {
            writeln!(out, "Summary")?;
            writeln!(
                out,
                "  Best region: {} (score {:.2})",
                s.best_region, s.best_score
            )?;
            writeln!(
                out,
                "  {} of {} regions score at or above {:.2}",
                s.high_suitability_count, s.total_regions, s.threshold
            )?;
        }
        None => writeln!(out, "{NO_DATA}")?,
    }

    if !report.zero_range_features.is_empty() {
        let names: Vec<&str> = report.zero_range_features.iter().map(|f| f.name()).collect();
        writeln!(out, "  Constant across all regions (contributes 0): {}", names.join(", "))?;
    }
    Ok(buf)
}

fn score_bar(score: f64) -> String {
    let filled = (score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}
