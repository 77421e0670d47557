//! Human-readable schedule and fleet comparison for a finished run.

use std::fmt;

use serde::Serialize;

use crate::config::{FleetConfig, PatternRules, PlannerConfig};
use crate::evaluator::{Assignment, daily_trucks_without_sharing, evaluate, trucks_for_load};
use crate::model::ScheduleModel;
use crate::pattern::{DAY_NAMES, DAYS_PER_WEEK};
use crate::traits::Id;

/// Days of tonnage that pile up between two visits of a twice-weekly pattern.
const TWICE_WEEKLY_GAP_DAYS: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    High,
    Normal,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::High => write!(f, "HIGH"),
            RiskLevel::Normal => write!(f, "Normal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow<I> {
    pub district: I,
    pub risk_level: RiskLevel,
    pub avg_daily_tons: f64,
    pub frequency: usize,
    pub days: [bool; DAYS_PER_WEEK],
    /// The district only had the fallback pattern to choose from.
    pub fallback: bool,
}

/// Peak fleet with and without pooling between adjacent districts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetComparison {
    pub peak_shared: u32,
    pub peak_no_sharing: u32,
    pub trucks_saved: u32,
    /// `trucks_saved` as a percentage of `peak_no_sharing`.
    pub efficiency_gain_pct: f64,
}

impl FleetComparison {
    pub fn new(shared: &[u32; DAYS_PER_WEEK], no_sharing: &[u32; DAYS_PER_WEEK]) -> Self {
        let peak_shared = shared.iter().copied().max().unwrap_or(0);
        let peak_no_sharing = no_sharing.iter().copied().max().unwrap_or(0);
        let trucks_saved = peak_no_sharing.saturating_sub(peak_shared);
        let efficiency_gain_pct = if peak_no_sharing == 0 {
            0.0
        } else {
            trucks_saved as f64 / peak_no_sharing as f64 * 100.0
        };

        Self {
            peak_shared,
            peak_no_sharing,
            trucks_saved,
            efficiency_gain_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleReport<I> {
    pub rows: Vec<ScheduleRow<I>>,
    pub cost: f64,
    pub shared_daily_trucks: [u32; DAYS_PER_WEEK],
    pub no_sharing_daily_trucks: [u32; DAYS_PER_WEEK],
    pub comparison: FleetComparison,
    /// Fleet needed if every district kept its own trucks all week.
    pub dedicated_fleet: u32,
}

impl<I: Id> ScheduleReport<I> {
    pub fn build(model: &ScheduleModel<I>, assignment: &Assignment, config: &PlannerConfig) -> Self {
        let evaluation = evaluate(model, assignment, &config.fleet, &config.weights);
        let no_sharing = daily_trucks_without_sharing(model, assignment, &config.fleet);

        let rows = (0..model.len())
            .map(|district| {
                let pattern = assignment.pattern(model, district);
                ScheduleRow {
                    district: model.id(district).clone(),
                    risk_level: if model.is_high_risk(district) {
                        RiskLevel::High
                    } else {
                        RiskLevel::Normal
                    },
                    avg_daily_tons: model.daily_tons(district),
                    frequency: pattern.frequency(),
                    days: *pattern.days(),
                    fallback: model.candidates(district).is_fallback(),
                }
            })
            .collect();

        Self {
            rows,
            cost: evaluation.cost,
            shared_daily_trucks: evaluation.daily_trucks,
            no_sharing_daily_trucks: no_sharing,
            comparison: FleetComparison::new(&evaluation.daily_trucks, &no_sharing),
            dedicated_fleet: dedicated_fleet(model, &config.fleet, &config.rules),
        }
    }
}

/// Fleet size when trucks never leave their district.
///
/// Each district picks twice-weekly service unless 3.5 days of waste would
/// exceed the street capacity, then owns enough trucks for one visit.
pub fn dedicated_fleet<I: Id>(model: &ScheduleModel<I>, fleet: &FleetConfig, rules: &PatternRules) -> u32 {
    (0..model.len())
        .map(|district| {
            let daily_tons = model.daily_tons(district);
            let frequency = if daily_tons * TWICE_WEEKLY_GAP_DAYS > rules.street_capacity_tons {
                3.0
            } else {
                2.0
            };
            trucks_for_load(daily_tons * DAYS_PER_WEEK as f64 / frequency, fleet.truck_capacity)
        })
        .sum()
}

impl<I: fmt::Display> fmt::Display for ScheduleReport<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10} {:<7} {:>9} {:>5}", "District", "Risk", "Tons/day", "Freq")?;
        for name in DAY_NAMES {
            write!(f, " {:>3}", name)?;
        }
        writeln!(f)?;

        for row in &self.rows {
            let marker = if row.fallback { "*" } else { "" };
            write!(
                f,
                "{:<10} {:<7} {:>9.1} {:>5}",
                format!("{}{}", row.district, marker),
                row.risk_level.to_string(),
                row.avg_daily_tons,
                row.frequency
            )?;
            for &active in &row.days {
                write!(f, " {:>3}", if active { "✓" } else { "-" })?;
            }
            writeln!(f)?;
        }

        write!(f, "{:<34}", "Trucks (shared)")?;
        for trucks in self.shared_daily_trucks {
            write!(f, " {:>3}", trucks)?;
        }
        writeln!(f)?;
        write!(f, "{:<34}", "Trucks (no sharing)")?;
        for trucks in self.no_sharing_daily_trucks {
            write!(f, " {:>3}", trucks)?;
        }
        writeln!(f)?;

        let comparison = &self.comparison;
        writeln!(f, "Peak fleet without sharing: {}", comparison.peak_no_sharing)?;
        writeln!(f, "Peak fleet with sharing:    {}", comparison.peak_shared)?;
        writeln!(
            f,
            "Trucks saved:               {} ({:.2}%)",
            comparison.trucks_saved, comparison.efficiency_gain_pct
        )?;
        write!(f, "Dedicated fleet:            {}", self.dedicated_fleet)?;
        if self.rows.iter().any(|row| row.fallback) {
            write!(f, "\n* fallback pattern, collection rules not met")?;
        }
        Ok(())
    }
}
