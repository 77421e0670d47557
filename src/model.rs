//! Indexed snapshot of one planning problem.
//!
//! Districts, adjacency and candidate patterns are resolved once into dense
//! vectors so evaluations never touch hash maps or caller types.

use std::collections::HashMap;

use crate::config::PatternRules;
use crate::error::InputError;
use crate::features::validate_tons;
use crate::pattern::{feasible_patterns, CandidateSet};
use crate::traits::{AdjacencyProvider, Id, ServiceDistrict};

#[derive(Debug, Clone)]
pub struct ScheduleModel<I: Id> {
    ids: Vec<I>,
    daily_tons: Vec<f64>,
    high_risk: Vec<bool>,
    candidates: Vec<CandidateSet>,
    adjacency: Vec<Vec<usize>>,
}

impl<I: Id> ScheduleModel<I> {
    /// Validates the districts, resolves the topology against them and
    /// enumerates every district's candidate patterns.
    ///
    /// Districts missing from the topology are isolated. Neighbors that do
    /// not match any district are ignored.
    pub fn build<D, A>(districts: &[D], topology: &A, rules: &PatternRules) -> Result<Self, InputError>
    where
        D: ServiceDistrict<Id = I>,
        A: AdjacencyProvider<Id = I>,
    {
        if districts.is_empty() {
            return Err(InputError::EmptyDistrictTable);
        }

        let mut index: HashMap<&I, usize> = HashMap::with_capacity(districts.len());
        for (i, district) in districts.iter().enumerate() {
            let label = district.id().to_string();
            if index.insert(district.id(), i).is_some() {
                return Err(InputError::DuplicateDistrict(label));
            }
            validate_tons(&label, district.daily_tons())?;
        }

        let adjacency: Vec<Vec<usize>> = districts
            .iter()
            .enumerate()
            .map(|(i, district)| {
                let mut neighbors: Vec<usize> = topology
                    .neighbors(district.id())
                    .iter()
                    .filter_map(|neighbor| index.get(neighbor).copied())
                    .filter(|&j| j != i)
                    .collect();
                neighbors.sort_unstable();
                neighbors.dedup();
                neighbors
            })
            .collect();

        for (i, neighbors) in adjacency.iter().enumerate() {
            for &j in neighbors {
                if adjacency[j].binary_search(&i).is_err() {
                    return Err(InputError::AsymmetricAdjacency {
                        from: districts[i].id().to_string(),
                        to: districts[j].id().to_string(),
                    });
                }
            }
        }

        let candidates: Vec<CandidateSet> = districts
            .iter()
            .map(|district| {
                let set = feasible_patterns(district.daily_tons(), district.is_high_risk(), rules);
                if set.is_fallback() {
                    tracing::warn!(
                        district = ?district.id(),
                        daily_tons = district.daily_tons(),
                        high_risk = district.is_high_risk(),
                        "no pattern satisfies the collection rules; using fallback pattern"
                    );
                }
                set
            })
            .collect();

        let model = Self {
            ids: districts.iter().map(|d| d.id().clone()).collect(),
            daily_tons: districts.iter().map(|d| d.daily_tons()).collect(),
            high_risk: districts.iter().map(|d| d.is_high_risk()).collect(),
            candidates,
            adjacency,
        };

        tracing::debug!(
            districts = model.len(),
            candidates = model.candidates.iter().map(CandidateSet::len).sum::<usize>(),
            degenerate = model.degenerate_count(),
            fallbacks = model.fallback_count(),
            "schedule model built"
        );

        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[I] {
        &self.ids
    }

    pub fn id(&self, district: usize) -> &I {
        &self.ids[district]
    }

    pub fn index_of(&self, id: &I) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    pub fn daily_tons(&self, district: usize) -> f64 {
        self.daily_tons[district]
    }

    pub fn is_high_risk(&self, district: usize) -> bool {
        self.high_risk[district]
    }

    pub fn candidates(&self, district: usize) -> &CandidateSet {
        &self.candidates[district]
    }

    /// Neighbor indices of `district`, sorted.
    pub fn neighbors(&self, district: usize) -> &[usize] {
        &self.adjacency[district]
    }

    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    /// Districts with a single candidate contribute no search freedom.
    pub fn degenerate_count(&self) -> usize {
        self.candidates.iter().filter(|set| set.len() <= 1).count()
    }

    pub fn fallback_count(&self) -> usize {
        self.candidates.iter().filter(|set| set.is_fallback()).count()
    }
}
