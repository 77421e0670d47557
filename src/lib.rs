//! collection-planner core
//!
//! Assigns weekly collection patterns to service districts so that adjacent
//! districts can pool trucks, minimizing the peak daily fleet.

pub mod traits;
pub mod error;
pub mod config;
pub mod features;
pub mod topology;
pub mod pattern;
pub mod clustering;
pub mod model;
pub mod evaluator;
pub mod solver;
pub mod report;
