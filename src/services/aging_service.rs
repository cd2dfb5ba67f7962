use std::sync::Arc;

use tracing::debug;

use crate::error::AppResult;
use crate::models::activity::DailyActivity;
use crate::models::assessment::{AgingAssessment, AgingRateStatus};
use crate::models::profile::UserProfile;
use crate::services::activity_service::{recent_entries, ActivityService};
use crate::services::profile_service::ProfileService;

pub const MIN_AGING_RATE: f64 = 0.6;
pub const MAX_AGING_RATE: f64 = 1.4;
pub const MIN_MAX_AGE: f64 = 65.0;
pub const MAX_MAX_AGE: f64 = 100.0;

/// Population baseline the rate adjustment swings around.
const BASE_MAX_AGE: f64 = 82.0;
const RATE_TO_YEARS: f64 = 25.0;
const CONSISTENCY_WINDOW_DAYS: usize = 7;

/// Derives the aging rate, expected maximum age, and health score from the
/// profile and the recent activity history. Stateless: everything is
/// recomputed per read.
pub struct AgingService {
    profile_service: Arc<ProfileService>,
    activity_service: Arc<ActivityService>,
}

impl AgingService {
    pub fn new(
        profile_service: Arc<ProfileService>,
        activity_service: Arc<ActivityService>,
    ) -> Self {
        Self {
            profile_service,
            activity_service,
        }
    }

    pub fn current_assessment(&self) -> AppResult<AgingAssessment> {
        let profile = self.profile_service.get()?;
        let entries = self.activity_service.list()?;

        let assessment = compute_assessment(&profile, &entries);
        debug!(
            target: "app::aging",
            aging_rate = assessment.aging_rate,
            max_age = assessment.max_age,
            "aging assessment computed"
        );

        Ok(assessment)
    }
}

/// Weighted-sum model over the profile, minus the consistency bonus earned
/// over the seven most recent logged days. History may arrive in any order.
pub fn compute_assessment(profile: &UserProfile, entries: &[DailyActivity]) -> AgingAssessment {
    let window = recent_entries(entries, CONSISTENCY_WINDOW_DAYS);
    let bonus = consistency_bonus(&window);

    let mut rate = 1.0;

    // Sleep factor (optimal: 7-8 hours)
    rate += (profile.sleep_hours - 7.5).abs() * 0.02;

    // Nutrition factor
    rate -= profile.veggie_portions.min(5.0) * 0.015;

    // Exercise factor
    rate -= (profile.steps / 1000.0).min(10.0) * 0.008;
    rate -= profile.exercise_minutes.min(60.0) * 0.002;

    // Stress factor
    rate += (profile.stress_level - 1.0) * 0.025;

    // Negative factors
    rate += profile.cigarettes_per_day * 0.05;
    rate += profile.alcohol_units_per_week * 0.01;

    rate -= bonus;

    let aging_rate = rate.clamp(MIN_AGING_RATE, MAX_AGING_RATE);
    // The age projection works off the raw rate: a profile pushed past the
    // rate clamp still bottoms out at the age floor rather than at the
    // clamped rate's projection.
    let max_age = (BASE_MAX_AGE + (1.0 - rate) * RATE_TO_YEARS).clamp(MIN_MAX_AGE, MAX_MAX_AGE);
    let health_score = ((2.0 - aging_rate) * 50.0).round() as i64;

    AgingAssessment {
        aging_rate,
        max_age,
        health_score,
        consistency_bonus: bonus,
        status: AgingRateStatus::for_rate(aging_rate),
    }
}

/// Habit-adherence reduction over an already-windowed slice: each habit
/// contributes its completion fraction times a fixed weight. Empty input
/// earns exactly zero.
pub fn consistency_bonus(entries: &[DailyActivity]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }

    let len = entries.len() as f64;
    let fraction = |done: usize| done as f64 / len;

    let exercise = fraction(entries.iter().filter(|a| a.exercise).count());
    let meditation = fraction(entries.iter().filter(|a| a.meditation).count());
    let journaling = fraction(entries.iter().filter(|a| a.journaling).count());

    exercise * 0.02 + meditation * 0.015 + journaling * 0.01
}
