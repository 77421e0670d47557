//! Planner configuration.
//!
//! Every run owns its own [`PlannerConfig`]; nothing is read from global state.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fleet parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Effective tons one truck can take per visit.
    pub truck_capacity: f64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            truck_capacity: 12.0 * 0.9,
        }
    }
}

/// Hygiene and curb-storage rules applied when enumerating patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternRules {
    /// Longest allowed run of days between two visits, wraparound included.
    pub max_gap_days: u32,
    /// Tonnage that may accumulate on the street between visits.
    pub street_capacity_tons: f64,
}

impl Default for PatternRules {
    fn default() -> Self {
        Self {
            max_gap_days: 4,
            street_capacity_tons: 600.0,
        }
    }
}

/// Weights of the scalar schedule cost.
///
/// `cost = trucks * max_daily_trucks + variance * var(daily_trucks) - cohesion * cohesion_score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    pub trucks: f64,
    pub variance: f64,
    pub cohesion: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            trucks: 5000.0,
            variance: 50.0,
            cohesion: 300.0,
        }
    }
}

/// Geometric cooling schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingSchedule {
    pub initial_temperature: f64,
    pub min_temperature: f64,
    /// Multiplier applied to the temperature after every iteration.
    pub cooling_rate: f64,
    /// Optional hard cap on loop iterations.
    pub max_iterations: Option<usize>,
}

impl Default for AnnealingSchedule {
    fn default() -> Self {
        Self {
            initial_temperature: 3000.0,
            min_temperature: 0.1,
            cooling_rate: 0.99,
            max_iterations: None,
        }
    }
}

impl AnnealingSchedule {
    /// Number of iterations the cooling schedule runs before reaching the
    /// minimum temperature, ignoring `max_iterations`. `None` when the
    /// schedule never cools below the minimum.
    pub fn natural_length(&self) -> Option<usize> {
        let cools = self.initial_temperature.is_finite()
            && self.min_temperature.is_finite()
            && self.min_temperature > 0.0
            && self.cooling_rate > 0.0
            && self.cooling_rate < 1.0;
        if !cools {
            return None;
        }

        let mut temperature = self.initial_temperature;
        let mut steps = 0;
        while temperature > self.min_temperature {
            temperature *= self.cooling_rate;
            steps += 1;
        }
        Some(steps)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub fleet: FleetConfig,
    pub rules: PatternRules,
    pub weights: CostWeights,
    pub annealing: AnnealingSchedule,
    pub seed: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            fleet: FleetConfig::default(),
            rules: PatternRules::default(),
            weights: CostWeights::default(),
            annealing: AnnealingSchedule::default(),
            seed: 42,
        }
    }
}

impl PlannerConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_truck_capacity(mut self, truck_capacity: f64) -> Self {
        self.fleet.truck_capacity = truck_capacity;
        self
    }

    pub fn with_rules(mut self, rules: PatternRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_annealing(mut self, annealing: AnnealingSchedule) -> Self {
        self.annealing = annealing;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacity = self.fleet.truck_capacity;
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(ConfigError::TruckCapacity(capacity));
        }

        let street = self.rules.street_capacity_tons;
        if !street.is_finite() || street < 0.0 {
            return Err(ConfigError::StreetCapacity(street));
        }
        if self.rules.max_gap_days == 0 {
            return Err(ConfigError::MaxGapDays(self.rules.max_gap_days));
        }

        // Negative weights are legal; they invert the pressure of a term.
        for (name, value) in [
            ("trucks", self.weights.trucks),
            ("variance", self.weights.variance),
            ("cohesion", self.weights.cohesion),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Weight { name, value });
            }
        }

        let initial = self.annealing.initial_temperature;
        let min = self.annealing.min_temperature;
        if !(initial.is_finite() && min.is_finite() && min > 0.0 && initial > min) {
            return Err(ConfigError::Temperature { initial, min });
        }

        let rate = self.annealing.cooling_rate;
        if !(rate > 0.0 && rate < 1.0) {
            return Err(ConfigError::CoolingRate(rate));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PlannerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_truck_capacity_is_ninety_percent_of_nominal() {
        let config = PlannerConfig::default();
        assert!((config.fleet.truck_capacity - 10.8).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_zero_truck_capacity() {
        let config = PlannerConfig::default().with_truck_capacity(0.0);
        assert_eq!(config.validate(), Err(ConfigError::TruckCapacity(0.0)));
    }

    #[test]
    fn test_rejects_cooling_rate_of_one() {
        let mut config = PlannerConfig::default();
        config.annealing.cooling_rate = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::CoolingRate(1.0)));
    }

    #[test]
    fn test_rejects_inverted_temperatures() {
        let mut config = PlannerConfig::default();
        config.annealing.initial_temperature = 0.05;
        assert!(matches!(config.validate(), Err(ConfigError::Temperature { .. })));
    }

    #[test]
    fn test_negative_variance_weight_is_allowed() {
        let config = PlannerConfig::default().with_weights(CostWeights {
            variance: -100.0,
            ..CostWeights::default()
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_nan_weight() {
        let config = PlannerConfig::default().with_weights(CostWeights {
            cohesion: f64::NAN,
            ..CostWeights::default()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Weight { name: "cohesion", .. })
        ));
    }

    #[test]
    fn test_natural_length_matches_geometric_schedule() {
        let schedule = AnnealingSchedule {
            initial_temperature: 100.0,
            min_temperature: 1.0,
            cooling_rate: 0.5,
            max_iterations: None,
        };
        // 100 -> 50 -> 25 -> 12.5 -> 6.25 -> 3.125 -> 1.5625 -> 0.78
        assert_eq!(schedule.natural_length(), Some(7));
    }

    #[test]
    fn test_natural_length_of_non_cooling_schedule() {
        let stalled = AnnealingSchedule {
            cooling_rate: 1.0,
            ..AnnealingSchedule::default()
        };
        assert_eq!(stalled.natural_length(), None);

        let unreachable = AnnealingSchedule {
            min_temperature: 0.0,
            ..AnnealingSchedule::default()
        };
        assert_eq!(unreachable.natural_length(), None);

        let already_cold = AnnealingSchedule {
            initial_temperature: 0.05,
            ..AnnealingSchedule::default()
        };
        assert_eq!(already_cold.natural_length(), Some(0));
    }
}
