//! Feature normalisation and directional inversion.
//! All bounds are batch-relative: they come from the values passed in, never from a fixed scale.

/// Ranges narrower than this are treated as zero (constant feature).
pub const ZERO_RANGE_EPSILON: f64 = 10.0 * f64::EPSILON;

/// Observed bounds of one feature across a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxRange {
    pub min: f64,
    pub max: f64,
}

impl MinMaxRange {
    /// Fit bounds over `values`. Returns None for an empty slice.
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when every value in the batch was (numerically) identical.
    pub fn is_degenerate(&self) -> bool {
        self.span() < ZERO_RANGE_EPSILON
    }

    pub fn normalise(&self, value: f64) -> f64 {
        minmax_normalise(value, self.min, self.max)
    }
}

/// Min-max normalisation: `(value - min) / (max - min)`.
/// A zero range maps every value to 0.0. Values outside [min, max] are not clamped.
pub fn minmax_normalise(value: f64, min_val: f64, max_val: f64) -> f64 {
    if (max_val - min_val) < ZERO_RANGE_EPSILON {
        return 0.0;
    }
    (value - min_val) / (max_val - min_val)
}

/// Normalise a whole feature column against its own bounds.
/// The flag is true when the column had zero range and fell back to 0.0.
pub fn minmax_normalise_batch(values: &[f64]) -> (Vec<f64>, bool) {
    let Some(range) = MinMaxRange::fit(values) else {
        return (vec![], false);
    };
    if range.is_degenerate() {
        return (vec![0.0; values.len()], true);
    }
    (values.iter().map(|&v| range.normalise(v)).collect(), false)
}

/// Flip a percentage so that lower raw values score higher: `100 - value`.
/// Percentages above 100 are not clamped and come out negative.
pub fn invert_percent(value: f64) -> f64 {
    100.0 - value
}

/// Flip a lower-is-better column against its batch maximum: `max - value`.
/// The worst region in the batch maps to 0.
pub fn invert_against_max(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values.iter().map(|&v| max - v).collect()
}
