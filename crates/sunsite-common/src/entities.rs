/// Region entity types shared by the loader, the scorer and the report.
/// Raw metrics are optional so an incomplete row can reach the scorer and be rejected there.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Feature
// ---------------------------------------------------------------------------

/// The six per-region metrics that feed the suitability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    SolarIrradiance,
    GridAccess,
    InfrastructureIndex,
    ElectricityCost,
    RuralPopulationDensity,
    TerrainRuggedness,
}

impl Feature {
    /// Canonical order, matching the weight table.
    pub const ALL: [Feature; 6] = [
        Feature::SolarIrradiance,
        Feature::GridAccess,
        Feature::InfrastructureIndex,
        Feature::ElectricityCost,
        Feature::RuralPopulationDensity,
        Feature::TerrainRuggedness,
    ];

    /// Field name on `RegionMetrics`.
    pub fn name(self) -> &'static str {
        match self {
            Feature::SolarIrradiance        => "solar_irradiance",
            Feature::GridAccess             => "grid_access_percent",
            Feature::InfrastructureIndex    => "infrastructure_index",
            Feature::ElectricityCost        => "electricity_cost",
            Feature::RuralPopulationDensity => "rural_population_density",
            Feature::TerrainRuggedness      => "terrain_ruggedness",
        }
    }

    /// Column header in the regional deployment dataset.
    pub fn column(self) -> &'static str {
        match self {
            Feature::SolarIrradiance        => "Solar_Irradiance_kWh_m2_day",
            Feature::GridAccess             => "Grid_Access_Percent",
            Feature::InfrastructureIndex    => "Infrastructure_Index",
            Feature::ElectricityCost        => "Electricity_Cost_USD_per_kWh",
            Feature::RuralPopulationDensity => "Rural_Pop_Density_per_km2",
            Feature::TerrainRuggedness      => "Terrain_Ruggedness_Score",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Region metrics (input)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMetrics {
    pub region_id: String,
    pub solar_irradiance: Option<f64>,         // kWh/m²/day
    pub grid_access_percent: Option<f64>,      // 0–100
    pub infrastructure_index: Option<f64>,     // unitless, dataset range
    pub electricity_cost: Option<f64>,         // currency/kWh
    pub rural_population_density: Option<f64>,// per km²
    pub terrain_ruggedness: Option<f64>,       // higher = more rugged
}

impl RegionMetrics {
    /// Build a complete record. Argument order follows `Feature::ALL`.
    pub fn new(
        region_id: impl Into<String>,
        solar_irradiance: f64,
        grid_access_percent: f64,
        infrastructure_index: f64,
        electricity_cost: f64,
        rural_population_density: f64,
        terrain_ruggedness: f64,
    ) -> Self {
        Self {
            region_id: region_id.into(),
            solar_irradiance: Some(solar_irradiance),
            grid_access_percent: Some(grid_access_percent),
            infrastructure_index: Some(infrastructure_index),
            electricity_cost: Some(electricity_cost),
            rural_population_density: Some(rural_population_density),
            terrain_ruggedness: Some(terrain_ruggedness),
        }
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::SolarIrradiance        => self.solar_irradiance,
            Feature::GridAccess             => self.grid_access_percent,
            Feature::InfrastructureIndex    => self.infrastructure_index,
            Feature::ElectricityCost        => self.electricity_cost,
            Feature::RuralPopulationDensity => self.rural_population_density,
            Feature::TerrainRuggedness      => self.terrain_ruggedness,
        }
    }

    /// First metric (in `Feature::ALL` order) that is absent, if any.
    pub fn first_missing(&self) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| self.get(*f).is_none())
    }
}

// ---------------------------------------------------------------------------
// Scored region (output)
// ---------------------------------------------------------------------------

/// Normalised, direction-corrected feature values (all in [0, 1]).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedFeatures {
    pub solar_irradiance: f64,
    /// `100 - grid_access_percent`, then normalised
    pub grid_access_inverse: f64,
    pub infrastructure_index: f64,
    /// Not inverted, see `WeightVector::SUITABILITY`
    pub electricity_cost: f64,
    pub rural_population_density: f64,
    /// `max(terrain) - terrain`, then normalised
    pub terrain_ruggedness_inverse: f64,
}

impl NormalizedFeatures {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.solar_irradiance,
            self.grid_access_inverse,
            self.infrastructure_index,
            self.electricity_cost,
            self.rural_population_density,
            self.terrain_ruggedness_inverse,
        ]
    }

    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::SolarIrradiance        => self.solar_irradiance,
            Feature::GridAccess             => self.grid_access_inverse,
            Feature::InfrastructureIndex    => self.infrastructure_index,
            Feature::ElectricityCost        => self.electricity_cost,
            Feature::RuralPopulationDensity => self.rural_population_density,
            Feature::TerrainRuggedness      => self.terrain_ruggedness_inverse,
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        let slot = match feature {
            Feature::SolarIrradiance        => &mut self.solar_irradiance,
            Feature::GridAccess             => &mut self.grid_access_inverse,
            Feature::InfrastructureIndex    => &mut self.infrastructure_index,
            Feature::ElectricityCost        => &mut self.electricity_cost,
            Feature::RuralPopulationDensity => &mut self.rural_population_density,
            Feature::TerrainRuggedness      => &mut self.terrain_ruggedness_inverse,
        };
        *slot = value;
    }
}

/// A region with its batch-relative suitability score and rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRegion {
    pub metrics: RegionMetrics,
    pub normalized: NormalizedFeatures,
    pub suitability_score: f64,
    /// 1-based; 0 until ranks are assigned
    pub rank: usize,
}

impl ScoredRegion {
    pub fn region_id(&self) -> &str {
        &self.metrics.region_id
    }
}
