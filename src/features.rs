//! Per-district feature table.
//!
//! Rows come from an external data-preparation step (tonnage reports joined
//! with complaint counts). This module validates them and derives the
//! high-risk flag from a threshold over the risk scores.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::traits::ServiceDistrict;

/// Days used to turn monthly tonnage into a daily average.
const DAYS_PER_MONTH: f64 = 30.0;

/// One row of the raw feature table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub id: String,
    pub daily_tons: f64,
    /// Complaint count or any other score where higher means riskier.
    pub risk_score: f64,
}

impl FeatureRow {
    pub fn new(id: impl Into<String>, daily_tons: f64, risk_score: f64) -> Self {
        Self {
            id: id.into(),
            daily_tons,
            risk_score,
        }
    }

    /// Builds a row from a monthly tonnage figure.
    pub fn from_monthly_tons(id: impl Into<String>, monthly_tons: f64, risk_score: f64) -> Self {
        Self::new(id, monthly_tons / DAYS_PER_MONTH, risk_score)
    }
}

/// How the high-risk flag is derived from risk scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RiskThreshold {
    /// Scores at or above this quantile of all scores are high risk.
    Quantile(f64),
    /// Scores at or above this value are high risk.
    Absolute(f64),
}

impl Default for RiskThreshold {
    fn default() -> Self {
        RiskThreshold::Quantile(0.70)
    }
}

/// A validated district, immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub daily_tons: f64,
    pub is_high_risk: bool,
}

impl District {
    pub fn new(id: impl Into<String>, daily_tons: f64, is_high_risk: bool) -> Self {
        Self {
            id: id.into(),
            daily_tons,
            is_high_risk,
        }
    }
}

impl ServiceDistrict for District {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn daily_tons(&self) -> f64 {
        self.daily_tons
    }

    fn is_high_risk(&self) -> bool {
        self.is_high_risk
    }
}

/// Validates the feature table and derives each district's risk flag.
pub fn build_districts(
    rows: &[FeatureRow],
    threshold: RiskThreshold,
) -> Result<Vec<District>, InputError> {
    if rows.is_empty() {
        return Err(InputError::EmptyDistrictTable);
    }

    let mut seen = HashSet::new();
    for row in rows {
        if row.id.is_empty() {
            return Err(InputError::EmptyId);
        }
        if !seen.insert(row.id.as_str()) {
            return Err(InputError::DuplicateDistrict(row.id.clone()));
        }
        validate_tons(&row.id, row.daily_tons)?;
        if !row.risk_score.is_finite() {
            return Err(InputError::NonFiniteValue {
                id: row.id.clone(),
                field: "risk_score",
            });
        }
    }

    let cutoff = match threshold {
        RiskThreshold::Quantile(q) => {
            let scores: Vec<f64> = rows.iter().map(|row| row.risk_score).collect();
            quantile(&scores, q)?
        }
        RiskThreshold::Absolute(value) => value,
    };

    Ok(rows
        .iter()
        .map(|row| District::new(row.id.clone(), row.daily_tons, row.risk_score >= cutoff))
        .collect())
}

pub(crate) fn validate_tons(id: &str, daily_tons: f64) -> Result<(), InputError> {
    if !daily_tons.is_finite() {
        return Err(InputError::NonFiniteValue {
            id: id.to_string(),
            field: "daily_tons",
        });
    }
    if daily_tons < 0.0 {
        return Err(InputError::NegativeTonnage {
            id: id.to_string(),
            value: daily_tons,
        });
    }
    Ok(())
}

/// Quantile with linear interpolation between the two closest ranks.
pub fn quantile(values: &[f64], q: f64) -> Result<f64, InputError> {
    if !(0.0..=1.0).contains(&q) {
        return Err(InputError::InvalidQuantile(q));
    }
    if values.is_empty() {
        return Err(InputError::EmptyDistrictTable);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
