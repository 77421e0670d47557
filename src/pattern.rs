//! Weekly collection patterns and feasible-pattern enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PatternRules;

/// Length of the collection cycle.
pub const DAYS_PER_WEEK: usize = 7;

/// Short day labels, indexed by day of week.
pub const DAY_NAMES: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Visit counts a pattern may have.
const ALLOWED_FREQUENCIES: [usize; 2] = [2, 3];

/// Visit count required for high-risk districts.
const HIGH_RISK_FREQUENCY: usize = 3;

/// Inserted when no pattern survives the rules: Mon, Wed, Fri.
pub const FALLBACK_PATTERN: Pattern = Pattern::from_days([true, false, true, false, true, false, false]);

/// Which days of the week a district is serviced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    days: [bool; DAYS_PER_WEEK],
}

impl Pattern {
    pub const fn from_days(days: [bool; DAYS_PER_WEEK]) -> Self {
        Self { days }
    }

    /// Decodes the low seven bits of `mask`, bit `d` meaning day `d`.
    pub fn from_mask(mask: u8) -> Self {
        let mut days = [false; DAYS_PER_WEEK];
        for (day, active) in days.iter_mut().enumerate() {
            *active = mask & (1 << day) != 0;
        }
        Self { days }
    }

    pub fn days(&self) -> &[bool; DAYS_PER_WEEK] {
        &self.days
    }

    pub fn is_active(&self, day: usize) -> bool {
        self.days.get(day).copied().unwrap_or(false)
    }

    /// Number of visits per week.
    pub fn frequency(&self) -> usize {
        self.days.iter().filter(|&&active| active).count()
    }

    /// Sorted indices of the active days.
    pub fn active_days(&self) -> Vec<usize> {
        (0..DAYS_PER_WEEK).filter(|&day| self.days[day]).collect()
    }

    /// Days between consecutive visits, closing with the wraparound gap from
    /// the last visit of the week to the first visit of the next.
    pub fn gaps(&self) -> Vec<usize> {
        let active = self.active_days();
        let (Some(&first), Some(&last)) = (active.first(), active.last()) else {
            return Vec::new();
        };

        let mut gaps: Vec<usize> = active.windows(2).map(|pair| pair[1] - pair[0]).collect();
        gaps.push(DAYS_PER_WEEK - last + first);
        gaps
    }

    /// Longest gap, or a full week when the pattern has no visits.
    pub fn max_gap(&self) -> usize {
        self.gaps().into_iter().max().unwrap_or(DAYS_PER_WEEK)
    }

    /// Tons presented at each visit when the district generates `daily_tons`
    /// uniformly over the week.
    pub fn pickup_load(&self, daily_tons: f64) -> f64 {
        match self.frequency() {
            0 => 0.0,
            frequency => daily_tons * DAYS_PER_WEEK as f64 / frequency as f64,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .active_days()
            .into_iter()
            .map(|day| DAY_NAMES[day])
            .collect();
        write!(f, "{}", names.join("/"))
    }
}

/// All feasible patterns for one district. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    patterns: Vec<Pattern>,
    fallback: bool,
}

impl CandidateSet {
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True when no pattern satisfied the rules and [`FALLBACK_PATTERN`] was
    /// inserted instead. The fallback may exceed the gap and street-capacity
    /// ceilings, but it always has three visits.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

/// Whether `pattern` satisfies the frequency, risk, gap and street-capacity
/// rules for a district.
pub fn is_feasible(pattern: &Pattern, daily_tons: f64, is_high_risk: bool, rules: &PatternRules) -> bool {
    let frequency = pattern.frequency();
    if !ALLOWED_FREQUENCIES.contains(&frequency) {
        return false;
    }
    if is_high_risk && frequency < HIGH_RISK_FREQUENCY {
        return false;
    }

    let max_gap = pattern.max_gap();
    if max_gap > rules.max_gap_days as usize {
        return false;
    }
    max_gap as f64 * daily_tons <= rules.street_capacity_tons
}

/// Enumerates every feasible weekly pattern for a district.
///
/// Falls back to [`FALLBACK_PATTERN`] when the rules leave nothing, so the
/// optimizer always has at least one legal choice.
pub fn feasible_patterns(daily_tons: f64, is_high_risk: bool, rules: &PatternRules) -> CandidateSet {
    let patterns: Vec<Pattern> = (0u8..(1 << DAYS_PER_WEEK))
        .map(Pattern::from_mask)
        .filter(|pattern| is_feasible(pattern, daily_tons, is_high_risk, rules))
        .collect();

    if patterns.is_empty() {
        CandidateSet {
            patterns: vec![FALLBACK_PATTERN],
            fallback: true,
        }
    } else {
        CandidateSet {
            patterns,
            fallback: false,
        }
    }
}
