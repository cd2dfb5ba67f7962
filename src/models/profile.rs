use serde::{Deserialize, Serialize};

/// Singleton lifestyle profile. Every field is independently editable and no
/// cross-field invariant is enforced; degenerate values (height 0, negative
/// counts) flow through the model's clamps instead of being rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub age: f64,
    pub weight: f64,
    pub height: f64,
    pub sleep_hours: f64,
    pub veggie_portions: f64,
    pub steps: f64,
    pub stress_level: f64,
    pub cigarettes_per_day: f64,
    pub alcohol_units_per_week: f64,
    pub exercise_minutes: f64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 35.0,
            weight: 70.0,
            height: 175.0,
            sleep_hours: 7.0,
            veggie_portions: 3.0,
            steps: 8000.0,
            stress_level: 5.0,
            cigarettes_per_day: 0.0,
            alcohol_units_per_week: 2.0,
            exercise_minutes: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateInput {
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub veggie_portions: Option<f64>,
    #[serde(default)]
    pub steps: Option<f64>,
    #[serde(default)]
    pub stress_level: Option<f64>,
    #[serde(default)]
    pub cigarettes_per_day: Option<f64>,
    #[serde(default)]
    pub alcohol_units_per_week: Option<f64>,
    #[serde(default)]
    pub exercise_minutes: Option<f64>,
}
