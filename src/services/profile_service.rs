use tracing::info;

use crate::db::repositories::state_repository::KEY_USER_PROFILE;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::profile::{ProfileUpdateInput, UserProfile};
use crate::services::state_store::StateStore;

/// Owns the singleton lifestyle profile slot.
pub struct ProfileService {
    store: StateStore,
}

impl ProfileService {
    pub fn new(db: DbPool) -> Self {
        Self {
            store: StateStore::new(db),
        }
    }

    pub fn get(&self) -> AppResult<UserProfile> {
        self.store
            .load_or_default(KEY_USER_PROFILE, UserProfile::default)
    }

    /// Merges the provided fields into the stored profile. Any finite value
    /// is accepted; the aging and biomarker models degrade degenerate inputs
    /// through their clamps instead of entry-side range checks.
    pub fn update(&self, input: ProfileUpdateInput) -> AppResult<UserProfile> {
        let mut current = self.get()?;

        apply_field(&mut current.age, input.age, "age")?;
        apply_field(&mut current.weight, input.weight, "weight")?;
        apply_field(&mut current.height, input.height, "height")?;
        apply_field(&mut current.sleep_hours, input.sleep_hours, "sleepHours")?;
        apply_field(
            &mut current.veggie_portions,
            input.veggie_portions,
            "veggiePortions",
        )?;
        apply_field(&mut current.steps, input.steps, "steps")?;
        apply_field(&mut current.stress_level, input.stress_level, "stressLevel")?;
        apply_field(
            &mut current.cigarettes_per_day,
            input.cigarettes_per_day,
            "cigarettesPerDay",
        )?;
        apply_field(
            &mut current.alcohol_units_per_week,
            input.alcohol_units_per_week,
            "alcoholUnitsPerWeek",
        )?;
        apply_field(
            &mut current.exercise_minutes,
            input.exercise_minutes,
            "exerciseMinutes",
        )?;

        self.store.save(KEY_USER_PROFILE, &current)?;
        info!(target: "app::profile", "user profile updated");

        Ok(current)
    }
}

fn apply_field(slot: &mut f64, update: Option<f64>, field: &str) -> AppResult<()> {
    if let Some(value) = update {
        if !value.is_finite() {
            return Err(AppError::validation(format!(
                "档案字段 {field} 必须是有限数值"
            )));
        }
        *slot = value;
    }
    Ok(())
}
