//! sunsite-common — Shared region types and errors used across all SunSite crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use entities::{Feature, NormalizedFeatures, RegionMetrics, ScoredRegion};
pub use error::{Result, SunsiteError};
