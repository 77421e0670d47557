//! Core domain traits for the collection planner.
//!
//! These are intentionally minimal and domain-agnostic. Concrete apps can
//! implement them for their own district tables and adjacency sources, or use
//! [`crate::features::District`] and [`crate::topology::Topology`].

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Unique identifier for planner entities. `Display` labels errors and reports.
pub trait Id: Clone + Eq + Hash + Debug + Display {}

impl<T> Id for T where T: Clone + Eq + Hash + Debug + Display {}

/// A service district that needs a weekly collection pattern.
pub trait ServiceDistrict {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Average tonnage generated per day.
    fn daily_tons(&self) -> f64;

    /// High-risk districts must be serviced three times a week.
    fn is_high_risk(&self) -> bool;
}

/// Provides the geographic neighbor relation between districts.
///
/// Implementations must be symmetric: if `b` is a neighbor of `a`, then `a`
/// is a neighbor of `b`.
pub trait AdjacencyProvider {
    type Id: Id;

    /// Neighbors of `id`. Unknown ids have no neighbors.
    fn neighbors(&self, id: &Self::Id) -> &[Self::Id];
}
