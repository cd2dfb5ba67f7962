//! End-to-end flow over the activity log: upsert semantics, streaks,
//! weekly summary, and the recommendation and achievement surfaces that
//! read from it.

use std::sync::Arc;

use agecoach_app_lib::db::DbPool;
use agecoach_app_lib::models::activity::DailyActivityUpdate;
use agecoach_app_lib::models::profile::ProfileUpdateInput;
use agecoach_app_lib::services::activity_service::ActivityService;
use agecoach_app_lib::services::profile_service::ProfileService;
use agecoach_app_lib::services::progress_service::ProgressService;
use agecoach_app_lib::services::recommendation_service::RecommendationService;
use chrono::{Duration, Local};
use tempfile::{tempdir, TempDir};

struct TestEnv {
    profile: Arc<ProfileService>,
    activities: Arc<ActivityService>,
    recommendations: Arc<RecommendationService>,
    progress: Arc<ProgressService>,
    _temp_dir: TempDir,
}

fn setup_test_env() -> TestEnv {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db = DbPool::new(temp_dir.path().join("test.db")).expect("Failed to create test database");

    let profile = Arc::new(ProfileService::new(db.clone()));
    let activities = Arc::new(ActivityService::new(db.clone()));
    let recommendations = Arc::new(RecommendationService::new(
        Arc::clone(&profile),
        Arc::clone(&activities),
    ));
    let progress = Arc::new(ProgressService::new(Arc::clone(&activities)));

    TestEnv {
        profile,
        activities,
        recommendations,
        progress,
        _temp_dir: temp_dir,
    }
}

fn date_key(days_back: i64) -> String {
    (Local::now().date_naive() - Duration::days(days_back))
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn upsert_today_merges_into_one_record() {
    let env = setup_test_env();

    env.activities
        .upsert_today(DailyActivityUpdate {
            exercise: Some(true),
            ..Default::default()
        })
        .unwrap();
    env.activities
        .upsert_today(DailyActivityUpdate {
            meditation: Some(true),
            water: Some(6),
            supplements: Some(vec!["Vitamin D3".to_string()]),
            ..Default::default()
        })
        .unwrap();

    let entries = env.activities.list().unwrap();
    assert_eq!(entries.len(), 1, "same-day writes must not append");

    let today = env.activities.get_today().unwrap();
    assert!(today.exercise, "first patch survives the second");
    assert!(today.meditation);
    assert_eq!(today.water, 6);
    assert_eq!(today.supplements, vec!["Vitamin D3".to_string()]);
    // Untouched fields keep their defaults.
    assert_eq!(today.sleep_time, "22:00");
    assert_eq!(today.mood, 5);
}

#[test]
fn streaks_count_back_from_the_most_recent_day() {
    let env = setup_test_env();

    // Three consecutive days of exercise ending today; meditation broken
    // yesterday.
    for days_back in 0..3 {
        env.activities
            .upsert(
                &date_key(days_back),
                DailyActivityUpdate {
                    exercise: Some(true),
                    meditation: Some(days_back != 1),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    let streaks = env.activities.streaks().unwrap();
    assert_eq!(streaks.exercise, 3);
    assert_eq!(streaks.meditation, 1);
    assert_eq!(streaks.journaling, 0);
    assert_eq!(streaks.best, 3);
}

#[test]
fn a_gap_day_resets_the_streak() {
    let env = setup_test_env();

    for days_back in [0, 1, 3, 4] {
        env.activities
            .upsert(
                &date_key(days_back),
                DailyActivityUpdate {
                    exercise: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    // Day 2 was never logged, so only today and yesterday count.
    let streaks = env.activities.streaks().unwrap();
    assert_eq!(streaks.exercise, 2);
}

#[test]
fn weekly_summary_reflects_the_logged_week() {
    let env = setup_test_env();

    for days_back in 0..7 {
        env.activities
            .upsert(
                &date_key(days_back),
                DailyActivityUpdate {
                    exercise: Some(days_back % 2 == 0),
                    vegetables: Some(4),
                    water: Some(8),
                    mood: Some(7),
                    energy: Some(6),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    let summary = env.activities.weekly_summary().unwrap();
    assert_eq!(summary.days_logged, 7);
    assert_eq!(summary.exercise_days, 4);
    assert_eq!(summary.avg_vegetables, 4.0);
    assert_eq!(summary.avg_water, 8.0);
    assert_eq!(summary.avg_mood, 7.0);
    assert_eq!(summary.avg_energy, 6.0);
    // 4 active days out of 7 -> 57%.
    assert_eq!(summary.consistency_percent, 57.0);
}

#[test]
fn recommendations_follow_the_profile_and_history() {
    let env = setup_test_env();

    env.profile
        .update(ProfileUpdateInput {
            sleep_hours: Some(6.0),
            cigarettes_per_day: Some(5.0),
            ..Default::default()
        })
        .unwrap();

    let ids: Vec<String> = env
        .recommendations
        .generate()
        .unwrap()
        .into_iter()
        .map(|rec| rec.id)
        .collect();

    assert!(ids.contains(&"sleep-optimization".to_string()));
    assert!(ids.contains(&"smoking-cessation".to_string()));
    // Defaults: 3 veggie portions and 8000 steps also trip their rules.
    assert!(ids.contains(&"vegetable-optimization".to_string()));
    assert!(ids.contains(&"movement-consistency".to_string()));
    // No logged days yet: the 90% consistency rule must stay quiet.
    assert!(!ids.contains(&"consistency-optimization".to_string()));
}

#[test]
fn progress_surfaces_follow_the_log() {
    let env = setup_test_env();

    for days_back in 0..7 {
        env.activities
            .upsert(
                &date_key(days_back),
                DailyActivityUpdate {
                    exercise: Some(true),
                    meditation: Some(true),
                    journaling: Some(true),
                    mood: Some(8),
                    energy: Some(8),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    let history = env.progress.history().unwrap();
    assert_eq!(history.len(), 30);
    let today_point = history.last().unwrap();
    assert_eq!(today_point.consistency_score, 100.0);
    assert_eq!(today_point.wellness_score, 80.0);

    let achievements = env.progress.achievements().unwrap();
    let unlocked: Vec<&str> = achievements
        .iter()
        .filter(|badge| badge.unlocked)
        .map(|badge| badge.id.as_str())
        .collect();
    assert!(unlocked.contains(&"first-week"));
    assert!(unlocked.contains(&"consistency-champion"));
    assert!(unlocked.contains(&"meditation-master"));
    // The 14-day badges stay locked after only a week.
    assert!(!unlocked.contains(&"hydration-hero"));
    assert!(!unlocked.contains(&"veggie-lover"));

    let export = env.progress.export().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&export).unwrap();
    assert_eq!(parsed["history"].as_array().unwrap().len(), 30);
    assert!(parsed["exportedAt"].is_string());
}
