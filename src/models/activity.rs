use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CoreHabit {
    Exercise,
    Meditation,
    Journaling,
}

impl CoreHabit {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoreHabit::Exercise => "exercise",
            CoreHabit::Meditation => "meditation",
            CoreHabit::Journaling => "journaling",
        }
    }
}

impl fmt::Display for CoreHabit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CoreHabit {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "exercise" => Ok(CoreHabit::Exercise),
            "meditation" => Ok(CoreHabit::Meditation),
            "journaling" => Ok(CoreHabit::Journaling),
            other => Err(format!("unsupported core habit: {other}")),
        }
    }
}

/// One tracked day, keyed by ISO date (`YYYY-MM-DD`). At most one record per
/// date; writes go through the upsert in the activity service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: String,
    #[serde(default)]
    pub exercise: bool,
    #[serde(default)]
    pub meditation: bool,
    #[serde(default)]
    pub journaling: bool,
    #[serde(default = "default_sleep_time")]
    pub sleep_time: String,
    #[serde(default = "default_wake_time")]
    pub wake_time: String,
    #[serde(default)]
    pub vegetables: i64,
    #[serde(default)]
    pub water: i64,
    #[serde(default)]
    pub supplements: Vec<String>,
    #[serde(default = "default_scale_midpoint")]
    pub mood: i64,
    #[serde(default = "default_scale_midpoint")]
    pub energy: i64,
}

impl DailyActivity {
    pub fn for_date(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            exercise: false,
            meditation: false,
            journaling: false,
            sleep_time: default_sleep_time(),
            wake_time: default_wake_time(),
            vegetables: 0,
            water: 0,
            supplements: Vec::new(),
            mood: default_scale_midpoint(),
            energy: default_scale_midpoint(),
        }
    }

    pub fn habit(&self, habit: CoreHabit) -> bool {
        match habit {
            CoreHabit::Exercise => self.exercise,
            CoreHabit::Meditation => self.meditation,
            CoreHabit::Journaling => self.journaling,
        }
    }

    pub fn core_count(&self) -> usize {
        [self.exercise, self.meditation, self.journaling]
            .iter()
            .filter(|flag| **flag)
            .count()
    }

    pub fn any_core(&self) -> bool {
        self.exercise || self.meditation || self.journaling
    }
}

fn default_sleep_time() -> String {
    "22:00".to_string()
}

fn default_wake_time() -> String {
    "06:00".to_string()
}

fn default_scale_midpoint() -> i64 {
    5
}

/// Partial patch merged into the record for one date. Absent fields keep the
/// stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivityUpdate {
    #[serde(default)]
    pub exercise: Option<bool>,
    #[serde(default)]
    pub meditation: Option<bool>,
    #[serde(default)]
    pub journaling: Option<bool>,
    #[serde(default)]
    pub sleep_time: Option<String>,
    #[serde(default)]
    pub wake_time: Option<String>,
    #[serde(default)]
    pub vegetables: Option<i64>,
    #[serde(default)]
    pub water: Option<i64>,
    #[serde(default)]
    pub supplements: Option<Vec<String>>,
    #[serde(default)]
    pub mood: Option<i64>,
    #[serde(default)]
    pub energy: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub exercise: i64,
    pub meditation: i64,
    pub journaling: i64,
    pub best: i64,
}
