use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgingRateStatus {
    Excellent,
    Good,
    NeedsImprovement,
}

impl AgingRateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgingRateStatus::Excellent => "excellent",
            AgingRateStatus::Good => "good",
            AgingRateStatus::NeedsImprovement => "needs_improvement",
        }
    }

    /// Dashboard badge thresholds: < 0.9 excellent, < 1.1 good, anything
    /// slower needs work.
    pub fn for_rate(aging_rate: f64) -> Self {
        if aging_rate < 0.9 {
            AgingRateStatus::Excellent
        } else if aging_rate < 1.1 {
            AgingRateStatus::Good
        } else {
            AgingRateStatus::NeedsImprovement
        }
    }
}

impl fmt::Display for AgingRateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AgingRateStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "excellent" => Ok(AgingRateStatus::Excellent),
            "good" => Ok(AgingRateStatus::Good),
            "needs_improvement" => Ok(AgingRateStatus::NeedsImprovement),
            other => Err(format!("unsupported aging rate status: {other}")),
        }
    }
}

/// Derived outputs of the aging model. Recomputed from the profile and the
/// activity history on every read, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgingAssessment {
    /// Clamped to [0.6, 1.4]; 1.0 is an average biological aging pace.
    pub aging_rate: f64,
    /// Clamped to [65, 100] years.
    pub max_age: f64,
    /// 0-100, linear in the aging rate.
    pub health_score: i64,
    /// Reduction already applied to the rate from recent habit adherence.
    pub consistency_bonus: f64,
    pub status: AgingRateStatus,
}
