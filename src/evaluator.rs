//! Schedule evaluation: per-day truck demand, cohesion and scalar cost.

use rand::Rng;

use crate::clustering::{cluster_active, DayClusters};
use crate::config::{CostWeights, FleetConfig};
use crate::model::ScheduleModel;
use crate::pattern::{Pattern, DAYS_PER_WEEK};
use crate::traits::Id;

/// One candidate index per district, in model order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    choices: Vec<usize>,
}

impl Assignment {
    /// Picks a uniformly random candidate for every district.
    pub fn random<I: Id, R: Rng>(model: &ScheduleModel<I>, rng: &mut R) -> Self {
        let choices = (0..model.len())
            .map(|district| rng.random_range(0..model.candidates(district).len()))
            .collect();
        Self { choices }
    }

    /// Every district on its first candidate.
    pub fn first_candidates<I: Id>(model: &ScheduleModel<I>) -> Self {
        Self {
            choices: vec![0; model.len()],
        }
    }

    /// Checks that `choices` has one in-range index per district.
    pub fn from_choices<I: Id>(model: &ScheduleModel<I>, choices: Vec<usize>) -> Option<Self> {
        let valid = choices.len() == model.len()
            && choices
                .iter()
                .enumerate()
                .all(|(district, &choice)| choice < model.candidates(district).len());
        valid.then_some(Self { choices })
    }

    pub fn choices(&self) -> &[usize] {
        &self.choices
    }

    pub fn choice(&self, district: usize) -> usize {
        self.choices[district]
    }

    /// Sets the candidate index for `district` and returns the previous one.
    /// Returns `None` and leaves the assignment unchanged when either index is
    /// out of range for `model`.
    pub fn set<I: Id>(
        &mut self,
        model: &ScheduleModel<I>,
        district: usize,
        choice: usize,
    ) -> Option<usize> {
        let in_range = district < self.choices.len()
            && district < model.len()
            && choice < model.candidates(district).len();
        if !in_range {
            return None;
        }
        Some(std::mem::replace(&mut self.choices[district], choice))
    }

    pub fn pattern<'m, I: Id>(&self, model: &'m ScheduleModel<I>, district: usize) -> &'m Pattern {
        &model.candidates(district).patterns()[self.choices[district]]
    }
}

/// Everything the cost is derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub cost: f64,
    pub daily_trucks: [u32; DAYS_PER_WEEK],
    pub max_trucks: u32,
    /// Population variance of `daily_trucks`.
    pub variance: f64,
    /// Adjacent same-day pairs summed over the week.
    pub cohesion: usize,
}

/// Loads within this fraction of a truck above a whole number of trucks
/// round down, so float noise in summed loads cannot add a truck.
const TRUCK_ROUNDING_TOLERANCE: f64 = 1e-9;

/// Trucks needed to carry `load` tons in one visit.
pub fn trucks_for_load(load: f64, truck_capacity: f64) -> u32 {
    ((load / truck_capacity) - TRUCK_ROUNDING_TOLERANCE).ceil().max(0.0) as u32
}

/// Evaluates assignments against one model, reusing scratch buffers between
/// calls. Each call overwrites the scratch completely, so results depend only
/// on the assignment passed in.
#[derive(Debug, Clone)]
pub struct Evaluator<'m, I: Id> {
    model: &'m ScheduleModel<I>,
    truck_capacity: f64,
    weights: CostWeights,
    pickup_loads: Vec<f64>,
    active: Vec<bool>,
}

impl<'m, I: Id> Evaluator<'m, I> {
    pub fn new(model: &'m ScheduleModel<I>, fleet: &FleetConfig, weights: &CostWeights) -> Self {
        Self {
            model,
            truck_capacity: fleet.truck_capacity,
            weights: weights.clone(),
            pickup_loads: vec![0.0; model.len()],
            active: vec![false; model.len()],
        }
    }

    pub fn model(&self) -> &'m ScheduleModel<I> {
        self.model
    }

    pub fn evaluate(&mut self, assignment: &Assignment) -> Evaluation {
        let model = self.model;
        for district in 0..model.len() {
            let pattern = assignment.pattern(model, district);
            self.pickup_loads[district] = pattern.pickup_load(model.daily_tons(district));
        }

        let mut daily_trucks = [0u32; DAYS_PER_WEEK];
        let mut cohesion = 0;

        for (day, trucks) in daily_trucks.iter_mut().enumerate() {
            let mut active_count = 0;
            for district in 0..model.len() {
                let active = assignment.pattern(model, district).is_active(day);
                self.active[district] = active;
                active_count += usize::from(active);
            }
            if active_count == 0 {
                continue;
            }

            let clusters = cluster_active(&self.active, model.adjacency());
            *trucks = clusters
                .components
                .iter()
                .map(|component| {
                    let load: f64 = component.iter().map(|&d| self.pickup_loads[d]).sum();
                    trucks_for_load(load, self.truck_capacity)
                })
                .sum();

            if active_count > 1 {
                cohesion += clusters.edge_count;
            }
        }

        let max_trucks = daily_trucks.iter().copied().max().unwrap_or(0);
        let variance = population_variance(&daily_trucks);
        let cost = self.weights.trucks * max_trucks as f64 + self.weights.variance * variance
            - self.weights.cohesion * cohesion as f64;

        Evaluation {
            cost,
            daily_trucks,
            max_trucks,
            variance,
            cohesion,
        }
    }
}

/// Evaluates a single assignment.
pub fn evaluate<I: Id>(
    model: &ScheduleModel<I>,
    assignment: &Assignment,
    fleet: &FleetConfig,
    weights: &CostWeights,
) -> Evaluation {
    Evaluator::new(model, fleet, weights).evaluate(assignment)
}

/// Connected components of the districts active on `day`.
pub fn day_clusters<I: Id>(model: &ScheduleModel<I>, assignment: &Assignment, day: usize) -> DayClusters {
    let active: Vec<bool> = (0..model.len())
        .map(|district| assignment.pattern(model, district).is_active(day))
        .collect();
    cluster_active(&active, model.adjacency())
}

/// Daily trucks when every district is served by its own trucks, ignoring
/// adjacency.
pub fn daily_trucks_without_sharing<I: Id>(
    model: &ScheduleModel<I>,
    assignment: &Assignment,
    fleet: &FleetConfig,
) -> [u32; DAYS_PER_WEEK] {
    let mut daily_trucks = [0u32; DAYS_PER_WEEK];
    for district in 0..model.len() {
        let pattern = assignment.pattern(model, district);
        let trucks = trucks_for_load(pattern.pickup_load(model.daily_tons(district)), fleet.truck_capacity);
        for (day, total) in daily_trucks.iter_mut().enumerate() {
            if pattern.is_active(day) {
                *total += trucks;
            }
        }
    }
    daily_trucks
}

pub fn population_variance(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    values.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n
}
