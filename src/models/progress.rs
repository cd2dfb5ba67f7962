use serde::{Deserialize, Serialize};

/// One day in the 30-day progress series. Unlogged days fall back to neutral
/// values so charts stay dense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPoint {
    pub date: String,
    pub aging_rate: f64,
    pub max_age: f64,
    pub health_score: i64,
    /// Core activities completed that day / 3, as a percentage.
    pub consistency_score: f64,
    /// Mood/energy average scaled to 0-100; 50 when the day was not logged.
    pub wellness_score: f64,
    pub vegetables: i64,
    pub water: i64,
    pub mood: i64,
    pub energy: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
