use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BiomarkerCategory {
    Cardiovascular,
    Metabolic,
    Inflammatory,
    Cognitive,
    Hormonal,
    Cellular,
}

impl BiomarkerCategory {
    pub const ALL: [BiomarkerCategory; 6] = [
        BiomarkerCategory::Cardiovascular,
        BiomarkerCategory::Metabolic,
        BiomarkerCategory::Inflammatory,
        BiomarkerCategory::Cognitive,
        BiomarkerCategory::Hormonal,
        BiomarkerCategory::Cellular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BiomarkerCategory::Cardiovascular => "cardiovascular",
            BiomarkerCategory::Metabolic => "metabolic",
            BiomarkerCategory::Inflammatory => "inflammatory",
            BiomarkerCategory::Cognitive => "cognitive",
            BiomarkerCategory::Hormonal => "hormonal",
            BiomarkerCategory::Cellular => "cellular",
        }
    }
}

impl fmt::Display for BiomarkerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for BiomarkerCategory {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "cardiovascular" => Ok(BiomarkerCategory::Cardiovascular),
            "metabolic" => Ok(BiomarkerCategory::Metabolic),
            "inflammatory" => Ok(BiomarkerCategory::Inflammatory),
            "cognitive" => Ok(BiomarkerCategory::Cognitive),
            "hormonal" => Ok(BiomarkerCategory::Hormonal),
            "cellular" => Ok(BiomarkerCategory::Cellular),
            other => Err(format!("unsupported biomarker category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BiomarkerStatus {
    Optimal,
    Good,
    NeedsImprovement,
}

impl BiomarkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiomarkerStatus::Optimal => "optimal",
            BiomarkerStatus::Good => "good",
            BiomarkerStatus::NeedsImprovement => "needs_improvement",
        }
    }
}

impl fmt::Display for BiomarkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One estimated physiological measure compared against the age-group
/// average and a fixed optimal range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Biomarker {
    pub name: String,
    pub category: BiomarkerCategory,
    pub user_value: f64,
    pub age_group_average: f64,
    /// `[low, high]`, inclusive on both ends.
    pub optimal_range: (f64, f64),
    pub unit: String,
    pub description: String,
    pub higher_is_better: bool,
    pub status: BiomarkerStatus,
    /// 0-100, 50 matches the age-group average.
    pub percentile: f64,
}

impl Biomarker {
    pub fn is_optimal(&self) -> bool {
        self.status == BiomarkerStatus::Optimal
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: BiomarkerCategory,
    pub optimal_count: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BiomarkerOverview {
    pub categories: Vec<CategorySummary>,
    pub chronological_age: f64,
    /// Rounded estimate: each out-of-range marker adds 0.8 years, each
    /// optimal marker subtracts 0.5.
    pub biological_age: f64,
}
