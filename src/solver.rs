//! Collection pattern solver (simulated annealing).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::config::{CostWeights, PatternRules, PlannerConfig};
use crate::error::{ConfigError, PlannerError};
use crate::evaluator::{evaluate, Assignment, Evaluation, Evaluator};
use crate::model::ScheduleModel;
use crate::pattern::{Pattern, DAYS_PER_WEEK};
use crate::report::ScheduleReport;
use crate::traits::{AdjacencyProvider, Id, ServiceDistrict};

/// Counters from one annealing chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnealStats {
    /// Proposals evaluated; each one cooled the temperature once.
    pub iterations: usize,
    pub accepted: usize,
    /// Accepted proposals that were strictly better than the current state.
    pub improved: usize,
    /// Proposals dropped because the chosen district had a single candidate.
    pub skipped_moves: usize,
    pub final_temperature: f64,
}

#[derive(Debug, Clone)]
pub struct AnnealOutcome {
    pub best: Assignment,
    pub best_cost: f64,
    pub initial_cost: f64,
    pub evaluation: Evaluation,
    pub stats: AnnealStats,
}

/// Runs one annealing chain over the model's candidate sets.
///
/// Every proposal re-evaluates the full schedule. A proposal that lands on a
/// district with a single candidate is skipped without cooling.
#[tracing::instrument(
    level = "debug",
    name = "Simulated Annealing",
    skip(model, config, rng),
    fields(districts = model.len(), seed = config.seed)
)]
pub fn anneal<I, R>(model: &ScheduleModel<I>, config: &PlannerConfig, rng: &mut R) -> AnnealOutcome
where
    I: Id,
    R: Rng,
{
    let schedule = &config.annealing;
    let mut evaluator = Evaluator::new(model, &config.fleet, &config.weights);

    let mut current = Assignment::random(model, rng);
    let mut current_cost = evaluator.evaluate(&current).cost;
    let initial_cost = current_cost;
    let mut best = current.clone();
    let mut best_cost = current_cost;

    let mut stats = AnnealStats::default();
    let mut temperature = schedule.initial_temperature;
    let searchable = model.degenerate_count() < model.len();

    while searchable && temperature > schedule.min_temperature {
        if schedule
            .max_iterations
            .is_some_and(|cap| stats.iterations >= cap)
        {
            break;
        }

        let district = rng.random_range(0..model.len());
        let options = model.candidates(district).len();
        if options <= 1 {
            stats.skipped_moves += 1;
            continue;
        }

        let proposal = rng.random_range(0..options);
        let Some(previous) = current.set(model, district, proposal) else {
            continue;
        };
        let new_cost = evaluator.evaluate(&current).cost;
        let delta = new_cost - current_cost;

        if delta < 0.0 || rng.random::<f64>() < (-delta / temperature).exp() {
            stats.accepted += 1;
            if delta < 0.0 {
                stats.improved += 1;
            }
            current_cost = new_cost;
            if current_cost < best_cost {
                best_cost = current_cost;
                best = current.clone();
                tracing::trace!(iteration = stats.iterations, best_cost, "new best");
            }
        } else {
            current.set(model, district, previous);
        }

        temperature *= schedule.cooling_rate;
        stats.iterations += 1;
    }
    stats.final_temperature = temperature;

    let evaluation = evaluator.evaluate(&best);

    tracing::debug!(
        initial_cost,
        best_cost,
        max_trucks = evaluation.max_trucks,
        iterations = stats.iterations,
        accepted = stats.accepted,
        skipped = stats.skipped_moves,
        "annealing finished"
    );

    AnnealOutcome {
        best,
        best_cost,
        initial_cost,
        evaluation,
        stats,
    }
}

/// One independent annealing run for [`solve_chains`].
#[derive(Debug, Clone)]
pub struct ChainSpec {
    pub label: String,
    pub config: PlannerConfig,
}

impl ChainSpec {
    pub fn new(label: impl Into<String>, config: PlannerConfig) -> Self {
        Self {
            label: label.into(),
            config,
        }
    }

    /// One chain per seed, all sharing `base` otherwise.
    pub fn with_seeds<S>(base: &PlannerConfig, seeds: S) -> Vec<Self>
    where
        S: IntoIterator<Item = u64>,
    {
        seeds
            .into_iter()
            .map(|seed| Self::new(format!("seed-{}", seed), base.clone().with_seed(seed)))
            .collect()
    }

    /// One chain per weight setting, all sharing `base` otherwise.
    ///
    /// Running the same seed under different weights shows how each cost
    /// term shapes the schedule, e.g. balanced (variance 50), unbalanced
    /// (variance 0) and anti-balanced (variance -100).
    pub fn weight_sweep<L, W>(base: &PlannerConfig, settings: W) -> Vec<Self>
    where
        L: Into<String>,
        W: IntoIterator<Item = (L, CostWeights)>,
    {
        settings
            .into_iter()
            .map(|(label, weights)| Self::new(label, base.clone().with_weights(weights)))
            .collect()
    }
}

/// Outcome of one chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSummary {
    pub label: String,
    /// Costs under the chain's own weights.
    pub initial_cost: f64,
    pub best_cost: f64,
    /// Cost of the chain's best assignment under the weights and fleet of
    /// the first chain. Chains are ranked on this.
    pub selection_cost: f64,
    /// The chain's best assignment under its own configuration.
    pub evaluation: Evaluation,
}

impl ChainSummary {
    pub fn max_trucks(&self) -> u32 {
        self.evaluation.max_trucks
    }

    pub fn variance(&self) -> f64 {
        self.evaluation.variance
    }

    /// Trucks dispatched over the whole week.
    pub fn truck_days(&self) -> u32 {
        self.evaluation.daily_trucks.iter().sum()
    }
}

#[derive(Debug, Clone)]
pub struct PlannerResult<I: Id> {
    /// Label of the chain that produced this result.
    pub label: String,
    pub model: ScheduleModel<I>,
    pub config: PlannerConfig,
    pub assignment: Assignment,
    pub evaluation: Evaluation,
    pub initial_cost: f64,
    pub stats: AnnealStats,
    /// Every chain that ran, in submission order.
    pub chains: Vec<ChainSummary>,
}

impl<I: Id> PlannerResult<I> {
    pub fn cost(&self) -> f64 {
        self.evaluation.cost
    }

    pub fn daily_trucks(&self) -> [u32; DAYS_PER_WEEK] {
        self.evaluation.daily_trucks
    }

    /// Chosen pattern per district, in input order.
    pub fn schedule(&self) -> Vec<(&I, &Pattern)> {
        (0..self.model.len())
            .map(|district| (self.model.id(district), self.assignment.pattern(&self.model, district)))
            .collect()
    }

    pub fn pattern_for(&self, id: &I) -> Option<&Pattern> {
        self.model
            .index_of(id)
            .map(|district| self.assignment.pattern(&self.model, district))
    }

    pub fn report(&self) -> ScheduleReport<I> {
        ScheduleReport::build(&self.model, &self.assignment, &self.config)
    }
}

/// Validates inputs, enumerates candidate patterns and runs one seeded chain.
pub fn solve<D, A>(
    districts: &[D],
    topology: &A,
    config: &PlannerConfig,
) -> Result<PlannerResult<D::Id>, PlannerError>
where
    D: ServiceDistrict,
    A: AdjacencyProvider<Id = D::Id>,
{
    config.validate()?;
    let model = ScheduleModel::build(districts, topology, &config.rules)?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let outcome = anneal(&model, config, &mut rng);

    let label = format!("seed-{}", config.seed);
    let chains = vec![ChainSummary {
        label: label.clone(),
        initial_cost: outcome.initial_cost,
        best_cost: outcome.best_cost,
        selection_cost: outcome.best_cost,
        evaluation: outcome.evaluation.clone(),
    }];

    Ok(PlannerResult {
        label,
        model,
        config: config.clone(),
        assignment: outcome.best,
        evaluation: outcome.evaluation,
        initial_cost: outcome.initial_cost,
        stats: outcome.stats,
        chains,
    })
}

/// Runs independent chains in parallel and keeps the cheapest result.
///
/// Chains may use different weights or fleets, so every chain's best
/// assignment is re-scored under the first chain's fleet and weights before
/// ranking. Put the reference configuration first when sweeping weights.
///
/// Chains share the read-only model for their pattern rules and own
/// everything else. Ties go to the earliest chain, so the result does not
/// depend on thread scheduling.
pub fn solve_chains<D, A>(
    districts: &[D],
    topology: &A,
    chains: &[ChainSpec],
) -> Result<PlannerResult<D::Id>, PlannerError>
where
    D: ServiceDistrict,
    D::Id: Send + Sync,
    A: AdjacencyProvider<Id = D::Id>,
{
    if chains.is_empty() {
        return Err(ConfigError::NoChains.into());
    }
    for chain in chains {
        chain.config.validate()?;
    }

    let mut models: Vec<(PatternRules, ScheduleModel<D::Id>)> = Vec::new();
    let mut model_of_chain = Vec::with_capacity(chains.len());
    for chain in chains {
        let slot = match models.iter().position(|(rules, _)| *rules == chain.config.rules) {
            Some(slot) => slot,
            None => {
                let model = ScheduleModel::build(districts, topology, &chain.config.rules)?;
                models.push((chain.config.rules.clone(), model));
                models.len() - 1
            }
        };
        model_of_chain.push(slot);
    }

    let outcomes: Vec<AnnealOutcome> = chains
        .par_iter()
        .zip(model_of_chain.par_iter())
        .map(|(chain, &slot)| {
            let mut rng = ChaCha8Rng::seed_from_u64(chain.config.seed);
            anneal(&models[slot].1, &chain.config, &mut rng)
        })
        .collect();

    let reference = &chains[0].config;
    let summaries: Vec<ChainSummary> = chains
        .iter()
        .zip(&outcomes)
        .zip(&model_of_chain)
        .map(|((chain, outcome), &slot)| {
            let selection_cost = if chain.config.weights == reference.weights
                && chain.config.fleet == reference.fleet
            {
                outcome.best_cost
            } else {
                evaluate(&models[slot].1, &outcome.best, &reference.fleet, &reference.weights).cost
            };
            ChainSummary {
                label: chain.label.clone(),
                initial_cost: outcome.initial_cost,
                best_cost: outcome.best_cost,
                selection_cost,
                evaluation: outcome.evaluation.clone(),
            }
        })
        .collect();

    let mut winner = 0;
    for (index, summary) in summaries.iter().enumerate().skip(1) {
        if summary
            .selection_cost
            .total_cmp(&summaries[winner].selection_cost)
            .is_lt()
        {
            winner = index;
        }
    }

    tracing::info!(
        chains = chains.len(),
        winner = %chains[winner].label,
        best_cost = outcomes[winner].best_cost,
        selection_cost = summaries[winner].selection_cost,
        "parallel annealing finished"
    );

    let outcome = outcomes.into_iter().nth(winner).ok_or(ConfigError::NoChains)?;
    let chain = &chains[winner];
    let model = models.swap_remove(model_of_chain[winner]).1;

    Ok(PlannerResult {
        label: chain.label.clone(),
        model,
        config: chain.config.clone(),
        assignment: outcome.best,
        evaluation: outcome.evaluation,
        initial_cost: outcome.initial_cost,
        stats: outcome.stats,
        chains: summaries,
    })
}
