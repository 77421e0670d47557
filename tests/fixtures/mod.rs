//! Test fixtures for collection-planner.
//!
//! Provides realistic test data including:
//! - Manhattan sanitation district tonnage and complaint counts
//! - Builders for small synthetic districts and topologies

#![allow(dead_code)]

pub mod manhattan_districts;

pub use manhattan_districts::*;

use collection_planner::config::{AnnealingSchedule, PlannerConfig};
use collection_planner::features::District;
use collection_planner::topology::Topology;

/// `n` districts in a line, D0 - D1 - ... - D(n-1).
pub fn line(n: usize, daily_tons: f64) -> (Vec<District>, Topology<String>) {
    let districts = (0..n)
        .map(|i| District::new(format!("D{}", i), daily_tons, false))
        .collect();
    let topology = Topology::from_edges((1..n).map(|i| (format!("D{}", i - 1), format!("D{}", i))))
        .expect("line topology");
    (districts, topology)
}

/// A shorter cooling schedule for tests: 2000 -> 0.5 at 0.98.
pub fn fast_config(seed: u64) -> PlannerConfig {
    PlannerConfig::default()
        .with_seed(seed)
        .with_annealing(AnnealingSchedule {
            initial_temperature: 2000.0,
            min_temperature: 0.5,
            cooling_rate: 0.98,
            max_iterations: None,
        })
}
