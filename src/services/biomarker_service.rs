use std::sync::Arc;

use crate::error::AppResult;
use crate::models::biomarker::{
    Biomarker, BiomarkerCategory, BiomarkerOverview, BiomarkerStatus, CategorySummary,
};
use crate::models::profile::UserProfile;
use crate::services::profile_service::ProfileService;

/// Estimates the biomarker panel from the lifestyle profile. This is a
/// catalog of independent closed-form formulas; there is no shared control
/// logic beyond evaluating every entry and bucketing the results.
pub struct BiomarkerService {
    profile_service: Arc<ProfileService>,
}

impl BiomarkerService {
    pub fn new(profile_service: Arc<ProfileService>) -> Self {
        Self { profile_service }
    }

    pub fn estimate(&self) -> AppResult<Vec<Biomarker>> {
        let profile = self.profile_service.get()?;
        Ok(estimate_biomarkers(&profile))
    }

    pub fn estimate_for_category(&self, category: BiomarkerCategory) -> AppResult<Vec<Biomarker>> {
        let mut markers = self.estimate()?;
        markers.retain(|marker| marker.category == category);
        Ok(markers)
    }

    pub fn overview(&self) -> AppResult<BiomarkerOverview> {
        let profile = self.profile_service.get()?;
        let markers = estimate_biomarkers(&profile);

        let categories = BiomarkerCategory::ALL
            .iter()
            .map(|category| {
                let in_category: Vec<&Biomarker> = markers
                    .iter()
                    .filter(|marker| marker.category == *category)
                    .collect();
                CategorySummary {
                    category: *category,
                    optimal_count: in_category.iter().filter(|m| m.is_optimal()).count() as i64,
                    total: in_category.len() as i64,
                }
            })
            .collect();

        let optimal = markers.iter().filter(|m| m.is_optimal()).count() as f64;
        let out_of_range = markers.len() as f64 - optimal;
        let biological_age = (profile.age + out_of_range * 0.8 - optimal * 0.5).round();

        Ok(BiomarkerOverview {
            categories,
            chronological_age: profile.age,
            biological_age,
        })
    }
}

/// Evaluates the full panel. The constants are the contract; keep them
/// literal rather than factoring them into anything clever.
pub fn estimate_biomarkers(profile: &UserProfile) -> Vec<Biomarker> {
    let age = profile.age;
    let bmi = body_mass_index(profile);
    let ex = profile.exercise_minutes;
    let stress = profile.stress_level;
    let cig = profile.cigarettes_per_day;
    let alc = profile.alcohol_units_per_week;
    let veg = profile.veggie_portions;
    let sleep = profile.sleep_hours;

    vec![
        marker(
            "Resting Heart Rate",
            BiomarkerCategory::Cardiovascular,
            (70.0 - ex * 0.3 + stress * 2.0 + cig * 1.5).max(50.0),
            by_age(age, 72.0, 76.0, 80.0),
            (50.0, 70.0),
            "bpm",
            "Heart rate at rest, indicator of cardiovascular fitness",
            false,
        ),
        marker(
            "Blood Pressure (Systolic)",
            BiomarkerCategory::Cardiovascular,
            (120.0 + stress * 3.0 + alc * 1.5 + if bmi > 25.0 { 10.0 } else { 0.0 } - ex * 0.2)
                .max(100.0),
            by_age(age, 115.0, 125.0, 135.0),
            (90.0, 120.0),
            "mmHg",
            "Pressure in arteries when heart beats",
            false,
        ),
        marker(
            "VO2 Max",
            BiomarkerCategory::Cardiovascular,
            (by_age(age, 45.0, 35.0, 25.0) + ex * 0.4 - cig * 2.0).max(20.0),
            by_age(age, 40.0, 30.0, 22.0),
            if age < 30.0 {
                (45.0, 60.0)
            } else if age < 50.0 {
                (35.0, 50.0)
            } else {
                (25.0, 40.0)
            },
            "ml/kg/min",
            "Maximum oxygen uptake during exercise",
            true,
        ),
        marker(
            "Fasting Glucose",
            BiomarkerCategory::Metabolic,
            (85.0
                + if veg < 3.0 { 10.0 } else { -5.0 }
                + if bmi > 25.0 { 8.0 } else { 0.0 }
                + stress * 2.0)
                .max(70.0),
            by_age(age, 88.0, 92.0, 98.0),
            (70.0, 85.0),
            "mg/dL",
            "Blood sugar level after 8+ hours of fasting",
            false,
        ),
        marker(
            "HbA1c",
            BiomarkerCategory::Metabolic,
            (5.2_f64 + if veg < 3.0 { 0.3 } else { -0.2 } + if bmi > 25.0 { 0.4 } else { 0.0 })
                .max(4.5),
            by_age(age, 5.3, 5.5, 5.8),
            (4.5, 5.6),
            "%",
            "Average blood sugar over 2-3 months",
            false,
        ),
        marker(
            "C-Reactive Protein (CRP)",
            BiomarkerCategory::Inflammatory,
            (2.0 - ex * 0.02 - veg * 0.15 + stress * 0.3 + cig * 0.4).max(0.5),
            by_age(age, 1.8, 2.5, 3.2),
            (0.0, 1.0),
            "mg/L",
            "Marker of systemic inflammation",
            false,
        ),
        marker(
            "Interleukin-6 (IL-6)",
            BiomarkerCategory::Inflammatory,
            (2.5 - ex * 0.03 + stress * 0.4 + age * 0.02).max(0.5),
            by_age(age, 1.8, 2.8, 4.2),
            (0.0, 2.0),
            "pg/mL",
            "Pro-inflammatory cytokine marker",
            false,
        ),
        marker(
            "Processing Speed",
            BiomarkerCategory::Cognitive,
            (100.0 - (age - 25.0) * 0.8 + ex * 0.3 + if sleep >= 7.0 { 5.0 } else { -5.0 })
                .max(60.0),
            (100.0 - (age - 25.0) * 1.2).max(70.0),
            (90.0, 110.0),
            "score",
            "Speed of cognitive processing tasks",
            true,
        ),
        marker(
            "Working Memory",
            BiomarkerCategory::Cognitive,
            (100.0 - (age - 25.0) * 0.6
                + if sleep >= 7.0 { 8.0 } else { -8.0 }
                + if stress > 6.0 { -10.0 } else { 5.0 })
                .max(70.0),
            (100.0 - (age - 25.0) * 1.0).max(75.0),
            (85.0, 115.0),
            "score",
            "Ability to hold and manipulate information",
            true,
        ),
        marker(
            "Cortisol (Morning)",
            BiomarkerCategory::Hormonal,
            (15.0 + stress * 2.0 - if sleep >= 7.0 { 3.0 } else { 0.0 }
                + if ex > 30.0 { -2.0 } else { 2.0 })
                .max(5.0),
            by_age(age, 12.0, 15.0, 18.0),
            (6.0, 18.0),
            "μg/dL",
            "Primary stress hormone level in morning",
            false,
        ),
        marker(
            "Telomere Length",
            BiomarkerCategory::Cellular,
            (6500.0 - age * 50.0 + ex * 20.0 + veg * 100.0 - stress * 150.0 - cig * 200.0)
                .max(4000.0),
            (7000.0 - age * 60.0).max(4500.0),
            (5500.0, 8000.0),
            "bp",
            "Length of protective DNA caps",
            true,
        ),
    ]
}

/// BMI term with the degenerate-height case pinned down: height <= 0 yields
/// 0.0 so no BMI-conditional adjustment fires and no division blows up.
fn body_mass_index(profile: &UserProfile) -> f64 {
    if profile.height <= 0.0 {
        return 0.0;
    }
    let meters = profile.height / 100.0;
    profile.weight / (meters * meters)
}

fn by_age(age: f64, under30: f64, under50: f64, senior: f64) -> f64 {
    if age < 30.0 {
        under30
    } else if age < 50.0 {
        under50
    } else {
        senior
    }
}

#[allow(clippy::too_many_arguments)]
fn marker(
    name: &str,
    category: BiomarkerCategory,
    user_value: f64,
    age_group_average: f64,
    optimal_range: (f64, f64),
    unit: &str,
    description: &str,
    higher_is_better: bool,
) -> Biomarker {
    Biomarker {
        name: name.to_string(),
        category,
        user_value,
        age_group_average,
        optimal_range,
        unit: unit.to_string(),
        description: description.to_string(),
        higher_is_better,
        status: status_of(user_value, age_group_average, optimal_range, higher_is_better),
        percentile: percentile_of(user_value, age_group_average, higher_is_better),
    }
}

fn status_of(
    user_value: f64,
    age_group_average: f64,
    optimal_range: (f64, f64),
    higher_is_better: bool,
) -> BiomarkerStatus {
    let (low, high) = optimal_range;
    if user_value >= low && user_value <= high {
        return BiomarkerStatus::Optimal;
    }

    let better_than_average = if higher_is_better {
        user_value > age_group_average
    } else {
        user_value < age_group_average
    };

    if better_than_average {
        BiomarkerStatus::Good
    } else {
        BiomarkerStatus::NeedsImprovement
    }
}

fn percentile_of(user_value: f64, age_group_average: f64, higher_is_better: bool) -> f64 {
    let difference = if higher_is_better {
        (user_value - age_group_average) / age_group_average * 100.0
    } else {
        (age_group_average - user_value) / age_group_average * 100.0
    };

    (50.0 + difference).clamp(0.0, 100.0)
}
