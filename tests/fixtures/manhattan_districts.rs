//! Manhattan sanitation district feature rows for realistic test fixtures.
//!
//! Monthly refuse tonnage and rodent complaint counts, rounded from public
//! sanitation and 311 reports (2023-2025 averages).

use collection_planner::features::FeatureRow;

/// A district with its monthly tonnage and complaint count.
#[derive(Debug, Clone)]
pub struct DistrictData {
    pub id: &'static str,
    pub monthly_tons: f64,
    pub rat_complaints: f64,
}

impl DistrictData {
    pub const fn new(id: &'static str, monthly_tons: f64, rat_complaints: f64) -> Self {
        Self {
            id,
            monthly_tons,
            rat_complaints,
        }
    }

    pub fn row(&self) -> FeatureRow {
        FeatureRow::from_monthly_tons(self.id, self.monthly_tons, self.rat_complaints)
    }
}

pub const MANHATTAN: &[DistrictData] = &[
    DistrictData::new("MN01", 1_480.0, 312.0),
    DistrictData::new("MN02", 2_310.0, 655.0),
    DistrictData::new("MN03", 3_920.0, 1_540.0),
    DistrictData::new("MN04", 2_870.0, 702.0),
    DistrictData::new("MN05", 1_260.0, 410.0),
    DistrictData::new("MN06", 3_150.0, 508.0),
    DistrictData::new("MN07", 4_880.0, 1_120.0),
    DistrictData::new("MN08", 5_020.0, 880.0),
    DistrictData::new("MN09", 2_690.0, 1_310.0),
    DistrictData::new("MN10", 2_950.0, 1_760.0),
    DistrictData::new("MN11", 3_340.0, 1_420.0),
    DistrictData::new("MN12", 4_410.0, 1_650.0),
];

pub fn manhattan_rows() -> Vec<FeatureRow> {
    MANHATTAN.iter().map(DistrictData::row).collect()
}
