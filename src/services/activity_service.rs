use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::repositories::state_repository::KEY_DAILY_ACTIVITIES;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::activity::{CoreHabit, DailyActivity, DailyActivityUpdate, StreakSummary};
use crate::services::state_store::StateStore;

const RECENT_WINDOW_DAYS: usize = 7;

/// CRUD over the daily activity log plus the streak/consistency math the
/// dashboard and the aging model share.
pub struct ActivityService {
    store: StateStore,
}

impl ActivityService {
    pub fn new(db: DbPool) -> Self {
        Self {
            store: StateStore::new(db),
        }
    }

    pub fn today_key() -> String {
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    }

    pub fn list(&self) -> AppResult<Vec<DailyActivity>> {
        self.store.load_or_default(KEY_DAILY_ACTIVITIES, Vec::new)
    }

    /// Today's record, or an unsaved default one when today has not been
    /// logged yet.
    pub fn get_today(&self) -> AppResult<DailyActivity> {
        let today = Self::today_key();
        let entries = self.list()?;
        Ok(entries
            .into_iter()
            .find(|entry| entry.date == today)
            .unwrap_or_else(|| DailyActivity::for_date(today)))
    }

    pub fn upsert_today(&self, patch: DailyActivityUpdate) -> AppResult<DailyActivity> {
        self.upsert(&Self::today_key(), patch)
    }

    /// Upsert-by-date: merge the patch into the existing record for `date`,
    /// or append a fresh record seeded with defaults. The whole list is
    /// replaced on write.
    pub fn upsert(&self, date: &str, patch: DailyActivityUpdate) -> AppResult<DailyActivity> {
        parse_date(date).ok_or_else(|| {
            AppError::validation(format!("日期格式无效，应为 YYYY-MM-DD: {date}"))
        })?;

        let mut entries = self.list()?;

        let record = match entries.iter_mut().find(|entry| entry.date == date) {
            Some(existing) => {
                merge_patch(existing, patch);
                existing.clone()
            }
            None => {
                let mut created = DailyActivity::for_date(date);
                merge_patch(&mut created, patch);
                entries.push(created.clone());
                created
            }
        };

        self.store.save(KEY_DAILY_ACTIVITIES, &entries)?;
        debug!(target: "app::activity", date, "daily activity upserted");

        Ok(record)
    }

    /// Contiguous run of days with `habit` done, counted backwards from the
    /// most recent record. A false flag or a calendar gap ends the run.
    pub fn streak(&self, habit: CoreHabit) -> AppResult<i64> {
        let entries = self.list()?;
        Ok(streak_of(&entries, habit))
    }

    pub fn streaks(&self) -> AppResult<StreakSummary> {
        let entries = self.list()?;
        let exercise = streak_of(&entries, CoreHabit::Exercise);
        let meditation = streak_of(&entries, CoreHabit::Meditation);
        let journaling = streak_of(&entries, CoreHabit::Journaling);

        Ok(StreakSummary {
            exercise,
            meditation,
            journaling,
            best: exercise.max(meditation).max(journaling),
        })
    }

    pub fn weekly_summary(&self) -> AppResult<WeeklySummary> {
        let entries = self.list()?;
        let window = recent_entries(&entries, RECENT_WINDOW_DAYS);

        let days_logged = window.len() as i64;
        let mut summary = WeeklySummary {
            days_logged,
            exercise_days: window.iter().filter(|a| a.exercise).count() as i64,
            meditation_days: window.iter().filter(|a| a.meditation).count() as i64,
            journaling_days: window.iter().filter(|a| a.journaling).count() as i64,
            avg_vegetables: 0.0,
            avg_water: 0.0,
            avg_mood: 0.0,
            avg_energy: 0.0,
            consistency_percent: consistency_percent(&entries),
        };

        if days_logged > 0 {
            let len = days_logged as f64;
            summary.avg_vegetables =
                window.iter().map(|a| a.vegetables as f64).sum::<f64>() / len;
            summary.avg_water = window.iter().map(|a| a.water as f64).sum::<f64>() / len;
            summary.avg_mood = window.iter().map(|a| a.mood as f64).sum::<f64>() / len;
            summary.avg_energy = window.iter().map(|a| a.energy as f64).sum::<f64>() / len;
        }

        Ok(summary)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub days_logged: i64,
    pub exercise_days: i64,
    pub meditation_days: i64,
    pub journaling_days: i64,
    pub avg_vegetables: f64,
    pub avg_water: f64,
    pub avg_mood: f64,
    pub avg_energy: f64,
    pub consistency_percent: f64,
}

fn merge_patch(record: &mut DailyActivity, patch: DailyActivityUpdate) {
    if let Some(exercise) = patch.exercise {
        record.exercise = exercise;
    }
    if let Some(meditation) = patch.meditation {
        record.meditation = meditation;
    }
    if let Some(journaling) = patch.journaling {
        record.journaling = journaling;
    }
    if let Some(sleep_time) = patch.sleep_time {
        record.sleep_time = sleep_time;
    }
    if let Some(wake_time) = patch.wake_time {
        record.wake_time = wake_time;
    }
    if let Some(vegetables) = patch.vegetables {
        record.vegetables = vegetables;
    }
    if let Some(water) = patch.water {
        record.water = water;
    }
    if let Some(supplements) = patch.supplements {
        record.supplements = supplements;
    }
    if let Some(mood) = patch.mood {
        record.mood = mood;
    }
    if let Some(energy) = patch.energy {
        record.energy = energy;
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Most recent `limit` entries ordered newest first. Entries whose stored
/// date no longer parses sort last and never enter the window before valid
/// ones.
pub fn recent_entries(entries: &[DailyActivity], limit: usize) -> Vec<DailyActivity> {
    let mut sorted: Vec<DailyActivity> = entries.to_vec();
    // Descending by parsed date; `None` is the smallest Option, so
    // unparseable dates end up at the tail.
    sorted.sort_by_key(|entry| std::cmp::Reverse(parse_date(&entry.date)));
    sorted.truncate(limit);
    sorted
}

pub fn streak_of(entries: &[DailyActivity], habit: CoreHabit) -> i64 {
    let sorted = recent_entries(entries, entries.len());

    let mut streak = 0;
    let mut expected: Option<NaiveDate> = None;

    for entry in &sorted {
        let Some(date) = parse_date(&entry.date) else {
            break;
        };
        if let Some(expected) = expected {
            if date != expected {
                break;
            }
        }
        if !entry.habit(habit) {
            break;
        }
        streak += 1;
        expected = Some(date - Duration::days(1));
    }

    streak
}

pub fn consistency_percent(entries: &[DailyActivity]) -> f64 {
    let window = recent_entries(entries, RECENT_WINDOW_DAYS);
    if window.is_empty() {
        return 0.0;
    }

    let active = window.iter().filter(|entry| entry.any_core()).count() as f64;
    (active / window.len() as f64 * 100.0).round()
}
