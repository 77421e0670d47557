//! Error types for input validation and configuration.

use std::fmt;

/// Rejected district table or topology.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    EmptyDistrictTable,
    EmptyId,
    DuplicateDistrict(String),
    NegativeTonnage { id: String, value: f64 },
    NonFiniteValue { id: String, field: &'static str },
    InvalidQuantile(f64),
    AsymmetricAdjacency { from: String, to: String },
    SelfLoop(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyDistrictTable => write!(f, "district table is empty"),
            InputError::EmptyId => write!(f, "district id must not be empty"),
            InputError::DuplicateDistrict(id) => write!(f, "district {} appears more than once", id),
            InputError::NegativeTonnage { id, value } => {
                write!(f, "district {} has negative daily tonnage {}", id, value)
            }
            InputError::NonFiniteValue { id, field } => {
                write!(f, "district {} has a non-finite {}", id, field)
            }
            InputError::InvalidQuantile(q) => write!(f, "risk quantile {} is outside [0, 1]", q),
            InputError::AsymmetricAdjacency { from, to } => write!(
                f,
                "{} lists {} as a neighbor but {} does not list {}",
                from, to, to, from
            ),
            InputError::SelfLoop(id) => write!(f, "district {} lists itself as a neighbor", id),
        }
    }
}

impl std::error::Error for InputError {}

/// Rejected planner configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    TruckCapacity(f64),
    StreetCapacity(f64),
    MaxGapDays(u32),
    Weight { name: &'static str, value: f64 },
    Temperature { initial: f64, min: f64 },
    CoolingRate(f64),
    NoChains,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TruckCapacity(value) => {
                write!(f, "truck capacity must be finite and positive, got {}", value)
            }
            ConfigError::StreetCapacity(value) => {
                write!(f, "street capacity must be finite and non-negative, got {}", value)
            }
            ConfigError::MaxGapDays(value) => {
                write!(f, "max gap days must be at least 1, got {}", value)
            }
            ConfigError::Weight { name, value } => {
                write!(f, "cost weight {} must be finite, got {}", name, value)
            }
            ConfigError::Temperature { initial, min } => write!(
                f,
                "temperatures must satisfy initial > min > 0, got initial {} and min {}",
                initial, min
            ),
            ConfigError::CoolingRate(value) => {
                write!(f, "cooling rate must lie strictly between 0 and 1, got {}", value)
            }
            ConfigError::NoChains => write!(f, "at least one annealing chain is required"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Any reason a planning run is refused before optimization starts.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    Input(InputError),
    Config(ConfigError),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::Input(err) => write!(f, "invalid input: {}", err),
            PlannerError::Config(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlannerError::Input(err) => Some(err),
            PlannerError::Config(err) => Some(err),
        }
    }
}

impl From<InputError> for PlannerError {
    fn from(err: InputError) -> Self {
        PlannerError::Input(err)
    }
}

impl From<ConfigError> for PlannerError {
    fn from(err: ConfigError) -> Self {
        PlannerError::Config(err)
    }
}
