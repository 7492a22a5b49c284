//! Composite suitability score computation.
//!
//! S(r) = Σ(w_i × n_i(r)), where n_i is the batch-relative min-max
//! normalisation of feature i after directional inversion.
//! Bounds come from the batch passed in, so scoring a subset changes every score.

use serde::{Deserialize, Serialize};
use sunsite_common::{Feature, NormalizedFeatures, RegionMetrics, Result, ScoredRegion, SunsiteError};
use tracing::{debug, warn};

use crate::normalise::{invert_against_max, invert_percent, minmax_normalise_batch};
use crate::weights::WeightVector;

/// A feature had zero variance across the batch; every region got 0.0 for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeroRangeWarning {
    pub feature: Feature,
}

/// Output of one scoring call, ordered by rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBatch {
    pub regions: Vec<ScoredRegion>,
    pub warnings: Vec<ZeroRangeWarning>,
}

impl ScoredBatch {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// First scored row for `region_id` (duplicates keep input order).
    pub fn find(&self, region_id: &str) -> Option<&ScoredRegion> {
        self.regions.iter().find(|r| r.region_id() == region_id)
    }

    pub fn has_zero_range(&self, feature: Feature) -> bool {
        self.warnings.iter().any(|w| w.feature == feature)
    }
}

/// Compute the weighted sum of normalised components.
pub fn compute_suitability_score(normed: &NormalizedFeatures, weights: &WeightVector) -> f64 {
    normed
        .as_array()
        .iter()
        .zip(weights.as_array().iter())
        .map(|(n, w)| n * w)
        .sum()
}

/// Score and rank a full batch of regions.
///
/// Fails with `EmptyBatch` on zero records and with `MissingField` for the
/// first record (in input order) lacking one of the six metrics. A `NaN` or
/// infinite metric counts as missing. Out-of-range values are not validated.
pub fn score_regions(batch: &[RegionMetrics]) -> Result<ScoredBatch> {
    if batch.is_empty() {
        return Err(SunsiteError::EmptyBatch);
    }

    let rows = complete_rows(batch)?;
    let weights = WeightVector::SUITABILITY;

    let mut normalized = vec![NormalizedFeatures::default(); batch.len()];
    let mut warnings = Vec::new();

    for (idx, feature) in Feature::ALL.into_iter().enumerate() {
        let column: Vec<f64> = rows.iter().map(|row| row[idx]).collect();
        let directed = direction_corrected(feature, column);
        let (normed, zero_range) = minmax_normalise_batch(&directed);

        if zero_range {
            warn!(
                feature = %feature,
                regions = batch.len(),
                "Feature has zero range across batch; normalised to 0.0"
            );
            warnings.push(ZeroRangeWarning { feature });
        }

        for (slot, value) in normalized.iter_mut().zip(normed) {
            slot.set(feature, value);
        }
    }

    let scored: Vec<ScoredRegion> = batch
        .iter()
        .zip(normalized)
        .map(|(metrics, normed)| ScoredRegion {
            metrics: metrics.clone(),
            normalized: normed,
            suitability_score: compute_suitability_score(&normed, &weights),
            rank: 0,
        })
        .collect();

    let regions = assign_ranks(scored);

    debug!(
        regions = regions.len(),
        zero_range_features = warnings.len(),
        top_region = regions.first().map(|r| r.region_id()).unwrap_or_default(),
        "Scored region batch"
    );

    Ok(ScoredBatch { regions, warnings })
}

/// Stable sort by score descending, then assign ranks 1..N.
/// Equal scores keep their incoming order; NaN scores sort last.
pub fn assign_ranks(mut regions: Vec<ScoredRegion>) -> Vec<ScoredRegion> {
    regions.sort_by(|a, b| {
        let (sa, sb) = (a.suitability_score, b.suitability_score);
        sa.is_nan().cmp(&sb.is_nan()).then_with(|| sb.total_cmp(&sa))
    });
    for (i, region) in regions.iter_mut().enumerate() {
        region.rank = i + 1;
    }
    regions
}

/// Extract all six metrics per record, in `Feature::ALL` order.
fn complete_rows(batch: &[RegionMetrics]) -> Result<Vec<[f64; 6]>> {
    batch
        .iter()
        .map(|metrics| -> Result<[f64; 6]> {
            let mut row = [0.0; 6];
            for (slot, feature) in row.iter_mut().zip(Feature::ALL) {
                *slot = metrics
                    .get(feature)
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| SunsiteError::MissingField {
                        region_id: metrics.region_id.clone(),
                        field: feature.name(),
                    })?;
            }
            if !(0.0..=100.0).contains(&row[1]) {
                debug!(
                    region_id = %metrics.region_id,
                    grid_access_percent = row[1],
                    "Grid access outside 0–100; passed through unclamped"
                );
            }
            Ok(row)
        })
        .collect()
}

/// Flip lower-is-better features so that a higher value is always more suitable.
fn direction_corrected(feature: Feature, column: Vec<f64>) -> Vec<f64> {
    match feature {
        Feature::GridAccess => column.into_iter().map(invert_percent).collect(),
        Feature::TerrainRuggedness => invert_against_max(&column),
        _ => column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunsite_test_utils::{region, scenario_batch};

    fn score_of<'a>(batch: &'a ScoredBatch, id: &str) -> &'a ScoredRegion {
        batch.find(id).unwrap()
    }

    #[test]
    fn test_scenario_intermediate_values() {
        let batch = score_regions(&scenario_batch()).unwrap();

        let a = score_of(&batch, "A").normalized;
        let b = score_of(&batch, "B").normalized;
        let c = score_of(&batch, "C").normalized;

        let expect = |got: f64, want: f64| assert!((got - want).abs() < 1e-9, "got {got}, want {want}");

        expect(a.solar_irradiance, 0.0);
        expect(b.solar_irradiance, 1.0);
        expect(c.solar_irradiance, 0.5);

        expect(a.grid_access_inverse, 0.0);
        expect(b.grid_access_inverse, 1.0);
        expect(c.grid_access_inverse, 0.5);

        expect(a.terrain_ruggedness_inverse, 0.0);
        expect(b.terrain_ruggedness_inverse, 1.0);
        expect(c.terrain_ruggedness_inverse, 0.5);

        expect(a.infrastructure_index, 0.0);
        expect(b.infrastructure_index, 1.0);
        expect(c.infrastructure_index, 0.5);

        expect(a.electricity_cost, 0.0);
        expect(b.electricity_cost, 1.0);
        expect(c.electricity_cost, 0.5);

        expect(a.rural_population_density, 1.0);
        expect(b.rural_population_density, 0.0);
        expect(c.rural_population_density, 1.0 / 3.0);
    }

    #[test]
    fn test_scenario_ordering_and_scores() {
        let batch = score_regions(&scenario_batch()).unwrap();
        let order: Vec<&str> = batch.regions.iter().map(|r| r.region_id()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);

        let ranks: Vec<usize> = batch.regions.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);

        // B: 0.30 + 0.20 + 0.15 + 0.15 + 0.0 + 0.10
        assert!((batch.regions[0].suitability_score - 0.90).abs() < 1e-9);
        // C: half of everything except population (1/3)
        assert!((batch.regions[1].suitability_score - (0.45 + 0.10 / 3.0)).abs() < 1e-9);
        // A: population only
        assert!((batch.regions[2].suitability_score - 0.10).abs() < 1e-9);
        assert!(batch.warnings.is_empty());
    }

    #[test]
    fn test_electricity_cost_contributes_positively() {
        // Identical except cost: the pricier region scores higher by the cost weight
        let batch = score_regions(&[
            region("cheap", 5.0, 50.0, 10.0, 0.10, 5.0, 1.0),
            region("pricey", 5.0, 50.0, 10.0, 0.30, 5.0, 1.0),
        ])
        .unwrap();
        assert_eq!(batch.regions[0].region_id(), "pricey");
        assert!((batch.regions[0].suitability_score - 0.15).abs() < 1e-12);
        assert_eq!(batch.regions[1].suitability_score, 0.0);
    }

    #[test]
    fn test_empty_batch_is_error() {
        let err = score_regions(&[]).unwrap_err();
        assert!(matches!(err, SunsiteError::EmptyBatch));
    }

    #[test]
    fn test_missing_field_is_error() {
        let mut batch = scenario_batch();
        batch[1].infrastructure_index = None;
        let err = score_regions(&batch).unwrap_err();
        match err {
            SunsiteError::MissingField { region_id, field } => {
                assert_eq!(region_id, "B");
                assert_eq!(field, "infrastructure_index");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_metric_is_missing_field() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut batch = scenario_batch();
            batch[2].solar_irradiance = Some(bad);
            match score_regions(&batch).unwrap_err() {
                SunsiteError::MissingField { region_id, field } => {
                    assert_eq!(region_id, "C");
                    assert_eq!(field, "solar_irradiance");
                }
                other => panic!("unexpected error for {bad}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_assign_ranks_puts_nan_scores_last() {
        let with_score = |id: &str, score: f64| ScoredRegion {
            metrics: region(id, 5.0, 50.0, 10.0, 0.2, 5.0, 1.0),
            normalized: NormalizedFeatures::default(),
            suitability_score: score,
            rank: 0,
        };
        let ranked = assign_ranks(vec![
            with_score("A", 0.1),
            with_score("B", f64::NAN),
            with_score("C", 0.333),
            with_score("D", f64::NAN),
            with_score("E", 0.9),
        ]);
        let order: Vec<&str> = ranked.iter().map(|r| r.region_id()).collect();
        assert_eq!(order, vec!["E", "C", "A", "B", "D"]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_zero_range_irradiance_falls_back_to_zero() {
        let mut batch = scenario_batch();
        for r in &mut batch {
            r.solar_irradiance = Some(6.0);
        }
        let scored = score_regions(&batch).unwrap();
        assert!(scored.regions.iter().all(|r| r.normalized.solar_irradiance == 0.0));
        assert!(scored.has_zero_range(Feature::SolarIrradiance));
        assert_eq!(scored.warnings.len(), 1);
    }

    #[test]
    fn test_single_region_scores_zero() {
        let scored = score_regions(&[region("solo", 7.5, 12.0, 90.0, 0.4, 3.0, 55.0)]).unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored.regions[0].suitability_score, 0.0);
        assert_eq!(scored.regions[0].rank, 1);
        assert_eq!(scored.warnings.len(), Feature::ALL.len());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let batch = score_regions(&[
            region("first", 5.0, 50.0, 10.0, 0.2, 5.0, 1.0),
            region("second", 5.0, 50.0, 10.0, 0.2, 5.0, 1.0),
            region("best", 9.0, 50.0, 10.0, 0.2, 5.0, 1.0),
        ])
        .unwrap();
        let order: Vec<&str> = batch.regions.iter().map(|r| r.region_id()).collect();
        assert_eq!(order, vec!["best", "first", "second"]);
    }

    #[test]
    fn test_duplicate_region_ids_scored_independently() {
        let mut batch = scenario_batch();
        let first = batch[0].clone();
        batch.push(first);
        let scored = score_regions(&batch).unwrap();
        assert_eq!(scored.len(), 4);
        let a_rows = scored.regions.iter().filter(|r| r.region_id() == "A").count();
        assert_eq!(a_rows, 2);
    }

    #[test]
    fn test_grid_access_above_hundred_passes_through() {
        let mut batch = scenario_batch();
        batch[0].grid_access_percent = Some(120.0);
        let scored = score_regions(&batch).unwrap();
        // A's inverse is now -20, the batch minimum
        assert_eq!(score_of(&scored, "A").normalized.grid_access_inverse, 0.0);
        assert!(scored.regions.iter().all(|r| (0.0..=1.0).contains(&r.suitability_score)));
    }

    #[test]
    fn test_compute_suitability_score_all_ones_is_one() {
        let normed = NormalizedFeatures {
            solar_irradiance: 1.0,
            grid_access_inverse: 1.0,
            infrastructure_index: 1.0,
            electricity_cost: 1.0,
            rural_population_density: 1.0,
            terrain_ruggedness_inverse: 1.0,
        };
        let s = compute_suitability_score(&normed, &WeightVector::SUITABILITY);
        assert!((s - 1.0).abs() < 1e-12);
    }
}
