use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::activity::DailyActivity;
use crate::models::progress::{Achievement, ProgressPoint};
use crate::services::activity_service::{consistency_percent, recent_entries, ActivityService};

const HISTORY_DAYS: usize = 30;

/// Builds the 30-day trend series, the achievement badges, and the JSON
/// export payload from the activity history.
pub struct ProgressService {
    activity_service: Arc<ActivityService>,
}

impl ProgressService {
    pub fn new(activity_service: Arc<ActivityService>) -> Self {
        Self { activity_service }
    }

    pub fn history(&self) -> AppResult<Vec<ProgressPoint>> {
        let entries = self.activity_service.list()?;
        Ok(history_series(&entries, Local::now().date_naive()))
    }

    pub fn achievements(&self) -> AppResult<Vec<Achievement>> {
        let entries = self.activity_service.list()?;
        Ok(achievements_of(&entries, Local::now().date_naive()))
    }

    /// Pretty-printed export of the progress data; the frontend saves it as
    /// `aging-slowdown-progress.json`.
    pub fn export(&self) -> AppResult<String> {
        let entries = self.activity_service.list()?;
        let today = Local::now().date_naive();

        let export = ProgressExport {
            exported_at: Utc::now().to_rfc3339(),
            history: history_series(&entries, today),
            achievements: achievements_of(&entries, today),
        };

        Ok(serde_json::to_string_pretty(&export)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressExport {
    pub exported_at: String,
    pub history: Vec<ProgressPoint>,
    pub achievements: Vec<Achievement>,
}

/// One point per calendar day over the trailing 30 days, oldest first.
/// Unlogged days chart as neutral so the series stays dense.
pub fn history_series(entries: &[DailyActivity], today: NaiveDate) -> Vec<ProgressPoint> {
    (0..HISTORY_DAYS)
        .map(|offset| {
            let date = today - Duration::days((HISTORY_DAYS - 1 - offset) as i64);
            let key = date.format("%Y-%m-%d").to_string();
            let entry = entries.iter().find(|entry| entry.date == key);

            let consistency_score = entry
                .map(|e| e.core_count() as f64 / 3.0 * 100.0)
                .unwrap_or(0.0);
            let wellness_score = entry
                .map(|e| (e.mood + e.energy) as f64 / 2.0 * 10.0)
                .unwrap_or(50.0);

            // Chart trend model: the day's consistency alone drives the
            // plotted rate.
            let aging_rate = 1.2 - consistency_score / 100.0 * 0.3;
            let max_age = 82.0 + (1.2 - aging_rate) * 25.0;
            let health_score = ((2.0 - aging_rate) * 50.0).round() as i64;

            ProgressPoint {
                date: key,
                aging_rate,
                max_age,
                health_score,
                consistency_score,
                wellness_score,
                vegetables: entry.map(|e| e.vegetables).unwrap_or(0),
                water: entry.map(|e| e.water).unwrap_or(0),
                mood: entry.map(|e| e.mood).unwrap_or(5),
                energy: entry.map(|e| e.energy).unwrap_or(5),
            }
        })
        .collect()
}

/// All badges with their unlocked state. Every rule requires its minimum
/// entry count, so a brand-new install unlocks nothing.
pub fn achievements_of(entries: &[DailyActivity], today: NaiveDate) -> Vec<Achievement> {
    let today_key = today.format("%Y-%m-%d").to_string();

    let mut chronological = recent_entries(entries, entries.len());
    chronological.reverse();

    let first_week_date = (chronological.len() >= 7).then(|| chronological[6].date.clone());

    let last_7 = recent_entries(entries, 7);
    let last_14 = recent_entries(entries, 14);

    let consistency_champion = consistency_percent(entries) >= 80.0 && !entries.is_empty();
    let meditation_master = last_7.len() >= 7 && last_7.iter().all(|entry| entry.meditation);
    let hydration_hero = last_14.len() >= 14 && last_14.iter().all(|entry| entry.water >= 8);
    let veggie_lover = last_14.len() >= 14 && last_14.iter().all(|entry| entry.vegetables >= 5);

    vec![
        Achievement {
            id: "first-week".to_string(),
            title: "First Week Complete".to_string(),
            description: "Completed your first week of tracking".to_string(),
            icon: "🎯".to_string(),
            unlocked: first_week_date.is_some(),
            date: first_week_date,
        },
        badge(
            "consistency-champion",
            "Consistency Champion",
            "Maintained 80%+ consistency for 7 days",
            "🏆",
            consistency_champion,
            &today_key,
        ),
        badge(
            "meditation-master",
            "Meditation Master",
            "Meditated for 7 consecutive days",
            "🧘",
            meditation_master,
            &today_key,
        ),
        badge(
            "hydration-hero",
            "Hydration Hero",
            "Drank 8+ glasses of water for 14 days",
            "💧",
            hydration_hero,
            &today_key,
        ),
        badge(
            "veggie-lover",
            "Veggie Lover",
            "Ate 5+ servings of vegetables for 14 days",
            "🥦",
            veggie_lover,
            &today_key,
        ),
    ]
}

fn badge(
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    unlocked: bool,
    today_key: &str,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        unlocked,
        date: unlocked.then(|| today_key.to_string()),
    }
}
