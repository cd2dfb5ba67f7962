use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFrequency {
    Daily,
    Weekly,
    Custom,
}

impl NotificationFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationFrequency::Daily => "daily",
            NotificationFrequency::Weekly => "weekly",
            NotificationFrequency::Custom => "custom",
        }
    }
}

impl fmt::Display for NotificationFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for NotificationFrequency {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "daily" => Ok(NotificationFrequency::Daily),
            "weekly" => Ok(NotificationFrequency::Weekly),
            "custom" => Ok(NotificationFrequency::Custom),
            other => Err(format!("unsupported notification frequency: {other}")),
        }
    }
}

/// One reminder slot. `time` is a local wall-clock `HH:MM` string; the
/// scheduler owns the recurrence semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSetting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub enabled: bool,
    pub time: String,
    pub frequency: NotificationFrequency,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettingUpdate {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub frequency: Option<NotificationFrequency>,
}

/// Reminder set shipped with the app; mirrors what a fresh install shows.
pub fn default_notification_settings() -> Vec<NotificationSetting> {
    vec![
        NotificationSetting {
            id: "bedtime".to_string(),
            title: "Bedtime Reminder".to_string(),
            description: "Consistent sleep schedule for optimal circadian rhythm".to_string(),
            enabled: true,
            time: "21:30".to_string(),
            frequency: NotificationFrequency::Daily,
        },
        NotificationSetting {
            id: "meditation".to_string(),
            title: "Meditation Time".to_string(),
            description: "Daily mindfulness practice for stress reduction".to_string(),
            enabled: true,
            time: "07:00".to_string(),
            frequency: NotificationFrequency::Daily,
        },
        NotificationSetting {
            id: "exercise".to_string(),
            title: "Exercise Reminder".to_string(),
            description: "Daily movement for cardiovascular health".to_string(),
            enabled: true,
            time: "17:00".to_string(),
            frequency: NotificationFrequency::Daily,
        },
        NotificationSetting {
            id: "nutrition".to_string(),
            title: "Nutrition Check".to_string(),
            description: "Track daily vegetable and water intake".to_string(),
            enabled: true,
            time: "12:00".to_string(),
            frequency: NotificationFrequency::Daily,
        },
        NotificationSetting {
            id: "hydration".to_string(),
            title: "Hydration Reminder".to_string(),
            description: "Stay properly hydrated throughout the day".to_string(),
            enabled: false,
            time: "10:00".to_string(),
            frequency: NotificationFrequency::Daily,
        },
    ]
}
