//! sunsite-ranker — Region suitability scoring engine.
//! Inverts, min-max normalises and weights six regional metrics, then ranks the batch.

pub mod scorer;
pub mod normalise;
pub mod weights;

pub use scorer::{score_regions, ScoredBatch, ZeroRangeWarning};
pub use weights::WeightVector;
