//! Integration tests for the aging model running over the real store:
//! profile edits and logged activity must flow through to the derived
//! assessment exactly as the model defines it.

use std::sync::Arc;

use agecoach_app_lib::db::DbPool;
use agecoach_app_lib::models::activity::DailyActivityUpdate;
use agecoach_app_lib::models::assessment::AgingRateStatus;
use agecoach_app_lib::models::profile::ProfileUpdateInput;
use agecoach_app_lib::services::activity_service::ActivityService;
use agecoach_app_lib::services::aging_service::{
    AgingService, MAX_AGING_RATE, MAX_MAX_AGE, MIN_AGING_RATE, MIN_MAX_AGE,
};
use agecoach_app_lib::services::profile_service::ProfileService;
use chrono::{Duration, Local};
use tempfile::{tempdir, TempDir};

struct TestEnv {
    profile: Arc<ProfileService>,
    activities: Arc<ActivityService>,
    aging: Arc<AgingService>,
    _temp_dir: TempDir,
}

fn setup_test_env() -> TestEnv {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db = DbPool::new(temp_dir.path().join("test.db")).expect("Failed to create test database");

    let profile = Arc::new(ProfileService::new(db.clone()));
    let activities = Arc::new(ActivityService::new(db.clone()));
    let aging = Arc::new(AgingService::new(
        Arc::clone(&profile),
        Arc::clone(&activities),
    ));

    TestEnv {
        profile,
        activities,
        aging,
        _temp_dir: temp_dir,
    }
}

fn date_key(days_back: i64) -> String {
    (Local::now().date_naive() - Duration::days(days_back))
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn optimal_profile_reproduces_the_worked_example() {
    let env = setup_test_env();

    env.profile
        .update(ProfileUpdateInput {
            sleep_hours: Some(7.5),
            veggie_portions: Some(5.0),
            steps: Some(10000.0),
            exercise_minutes: Some(60.0),
            stress_level: Some(1.0),
            cigarettes_per_day: Some(0.0),
            alcohol_units_per_week: Some(0.0),
            ..Default::default()
        })
        .unwrap();

    let assessment = env.aging.current_assessment().unwrap();

    assert!((assessment.aging_rate - 0.725).abs() < 1e-9);
    assert!((assessment.max_age - 88.875).abs() < 1e-9);
    assert_eq!(assessment.status, AgingRateStatus::Excellent);
    assert_eq!(assessment.consistency_bonus, 0.0);
}

#[test]
fn worst_case_profile_clamps_both_outputs() {
    let env = setup_test_env();

    env.profile
        .update(ProfileUpdateInput {
            sleep_hours: Some(4.0),
            veggie_portions: Some(0.0),
            steps: Some(1000.0),
            exercise_minutes: Some(0.0),
            stress_level: Some(10.0),
            cigarettes_per_day: Some(10.0),
            alcohol_units_per_week: Some(20.0),
            ..Default::default()
        })
        .unwrap();

    let assessment = env.aging.current_assessment().unwrap();

    assert_eq!(assessment.aging_rate, MAX_AGING_RATE);
    assert_eq!(assessment.max_age, MIN_MAX_AGE);
    assert_eq!(assessment.status, AgingRateStatus::NeedsImprovement);
}

#[test]
fn outputs_stay_in_range_for_hostile_profiles() {
    let env = setup_test_env();

    let hostile = [
        (-1e6, 1e6),
        (1e9, -1e9),
        (0.0, 0.0),
    ];

    for (a, b) in hostile {
        env.profile
            .update(ProfileUpdateInput {
                sleep_hours: Some(a),
                veggie_portions: Some(b),
                steps: Some(a),
                exercise_minutes: Some(b),
                stress_level: Some(a),
                cigarettes_per_day: Some(b.abs()),
                alcohol_units_per_week: Some(a),
                ..Default::default()
            })
            .unwrap();

        let assessment = env.aging.current_assessment().unwrap();
        assert!(
            (MIN_AGING_RATE..=MAX_AGING_RATE).contains(&assessment.aging_rate),
            "rate escaped the clamp for ({a}, {b})"
        );
        assert!(
            (MIN_MAX_AGE..=MAX_MAX_AGE).contains(&assessment.max_age),
            "max age escaped the clamp for ({a}, {b})"
        );
    }
}

#[test]
fn logged_week_earns_the_full_consistency_bonus() {
    let env = setup_test_env();

    let before = env.aging.current_assessment().unwrap();

    for days_back in 0..7 {
        env.activities
            .upsert(
                &date_key(days_back),
                DailyActivityUpdate {
                    exercise: Some(true),
                    meditation: Some(true),
                    journaling: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    let after = env.aging.current_assessment().unwrap();
    assert!((after.consistency_bonus - 0.045).abs() < 1e-9);
    assert!((before.aging_rate - after.aging_rate - 0.045).abs() < 1e-9);
}

#[test]
fn older_entries_fall_out_of_the_bonus_window() {
    let env = setup_test_env();

    // Seven stale adherent days followed by seven recent idle days: the
    // recent window wins and the bonus evaporates.
    for days_back in 7..14 {
        env.activities
            .upsert(
                &date_key(days_back),
                DailyActivityUpdate {
                    exercise: Some(true),
                    meditation: Some(true),
                    journaling: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
    }
    for days_back in 0..7 {
        env.activities
            .upsert(&date_key(days_back), DailyActivityUpdate::default())
            .unwrap();
    }

    let assessment = env.aging.current_assessment().unwrap();
    assert_eq!(assessment.consistency_bonus, 0.0);
}

#[test]
fn health_score_tracks_the_rate_linearly() {
    let env = setup_test_env();

    let assessment = env.aging.current_assessment().unwrap();
    let expected = ((2.0 - assessment.aging_rate) * 50.0).round() as i64;
    assert_eq!(assessment.health_score, expected);
}
