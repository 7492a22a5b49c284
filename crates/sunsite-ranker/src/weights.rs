//! Weight vector for region suitability scoring.

use serde::{Deserialize, Serialize};
use sunsite_common::Feature;

/// The 6-component weight vector W.
/// Weights are positive and sum to 1.0, so the score is a convex combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    /// Solar irradiance (kWh/m²/day)
    pub solar_irradiance: f64,
    /// Grid access, inverted (100 - percent)
    pub grid_access_inverse: f64,
    /// Infrastructure index
    pub infrastructure_index: f64,
    /// Electricity cost, applied to the non-inverted normalised value
    pub electricity_cost: f64,
    /// Rural population density
    pub rural_population_density: f64,
    /// Terrain ruggedness, inverted against the batch maximum
    pub terrain_ruggedness_inverse: f64,
}

impl WeightVector {
    /// The fixed suitability weights.
    ///
    /// Electricity cost contributes positively even though lower cost is
    /// preferable. Scores reproduce the published dashboard output exactly,
    /// so the direction stays as is.
    pub const SUITABILITY: WeightVector = WeightVector {
        solar_irradiance:           0.30,
        grid_access_inverse:        0.20,
        infrastructure_index:       0.15,
        electricity_cost:           0.15,
        rural_population_density:   0.10,
        terrain_ruggedness_inverse: 0.10,
    };

    /// Validate that all weights are non-negative and sum to ~1.0
    pub fn validate(&self) -> bool {
        let arr = self.as_array();
        let sum: f64 = arr.iter().sum();
        arr.iter().all(|w| *w >= 0.0) && (sum - 1.0).abs() < 1e-9
    }

    /// Convert to array for iteration, in `Feature::ALL` order.
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

    pub fn weight_of(&self, feature: Feature) -> f64 {
        match feature {
            Feature::SolarIrradiance        => self.solar_irradiance,
            Feature::GridAccess             => self.grid_access_inverse,
            Feature::InfrastructureIndex    => self.infrastructure_index,
            Feature::ElectricityCost        => self.electricity_cost,
            Feature::RuralPopulationDensity => self.rural_population_density,
            Feature::TerrainRuggedness      => self.terrain_ruggedness_inverse,
        }
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::SUITABILITY
    }
}
