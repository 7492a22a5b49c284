//! Shared fixtures for SunSite tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use tempfile::NamedTempFile;
use sunsite_common::RegionMetrics;

/// Shorthand for a complete record. Argument order follows `Feature::ALL`.
pub fn region(
    id: &str,
    irradiance: f64,
    grid_access: f64,
    infrastructure: f64,
    cost: f64,
    population: f64,
    terrain: f64,
) -> RegionMetrics {
    RegionMetrics::new(id, irradiance, grid_access, infrastructure, cost, population, terrain)
}

/// Three-region reference batch. Expected order after scoring: B > C > A.
pub fn scenario_batch() -> Vec<RegionMetrics> {
    vec![
        region("A", 5.0, 80.0, 50.0, 0.10, 20.0, 30.0),
        region("B", 7.0, 40.0, 70.0, 0.20, 5.0, 10.0),
        region("C", 6.0, 60.0, 60.0, 0.15, 10.0, 20.0),
    ]
}

/// The same batch as `scenario_batch`, in the dataset's CSV layout
/// (column order as published, plus an unused extra column).
pub const SCENARIO_CSV: &str = "\
Region,Solar_Irradiance_kWh_m2_day,Rural_Pop_Density_per_km2,Grid_Access_Percent,Infrastructure_Index,Electricity_Cost_USD_per_kWh,Terrain_Ruggedness_Score,Country
A,5,20,80,50,0.10,30,X
B,7,5,40,70,0.20,10,X
C,6,10,60,60,0.15,20,Y
";

/// Deterministic random batch with values in realistic ranges.
pub fn random_batch(seed: u64, n: usize) -> Vec<RegionMetrics> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            region(
                &format!("R{i:03}"),
                rng.gen_range(2.0..8.0),
                rng.gen_range(0.0..=100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.02..0.60),
                rng.gen_range(0.0..500.0),
                rng.gen_range(0.0..100.0),
            )
        })
        .collect()
}

/// Write `contents` to a temporary `.csv` file, removed when the handle drops.
pub fn write_temp_csv(contents: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("sunsite-test-")
        .suffix(".csv")
        .tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
