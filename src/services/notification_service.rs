use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use tauri::async_runtime::{self, JoinHandle};
use tracing::{info, warn};

use crate::db::repositories::state_repository::KEY_NOTIFICATION_SETTINGS;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::notification::{
    default_notification_settings, NotificationFrequency, NotificationSetting,
    NotificationSettingUpdate,
};
use crate::services::state_store::StateStore;

/// Reminder times applied by the one-tap quick setup.
const RECOMMENDED_TIMES: [(&str, &str); 4] = [
    ("bedtime", "21:30"),
    ("meditation", "07:00"),
    ("exercise", "17:00"),
    ("nutrition", "12:00"),
];

/// Reminder settings CRUD plus the recurring timers behind them. The
/// calculation core never depends on anything here; firing is an opaque
/// side effect.
pub struct NotificationService {
    store: StateStore,
    scheduler: ReminderScheduler,
}

impl NotificationService {
    pub fn new(db: DbPool) -> Self {
        Self {
            store: StateStore::new(db),
            scheduler: ReminderScheduler::new(),
        }
    }

    pub fn list(&self) -> AppResult<Vec<NotificationSetting>> {
        self.store
            .load_or_default(KEY_NOTIFICATION_SETTINGS, default_notification_settings)
    }

    /// Merges the patch into one reminder and rearms (or cancels) its timer.
    pub fn update(
        &self,
        id: &str,
        patch: NotificationSettingUpdate,
    ) -> AppResult<NotificationSetting> {
        let mut settings = self.list()?;
        let setting = settings
            .iter_mut()
            .find(|setting| setting.id == id)
            .ok_or_else(AppError::not_found)?;

        if let Some(time) = patch.time {
            parse_time(&time).ok_or_else(|| {
                AppError::validation(format!("提醒时间格式无效，应为 HH:MM: {time}"))
            })?;
            setting.time = time;
        }
        if let Some(frequency) = patch.frequency {
            setting.frequency = frequency;
        }
        if let Some(enabled) = patch.enabled {
            setting.enabled = enabled;
        }

        let updated = setting.clone();
        self.store.save(KEY_NOTIFICATION_SETTINGS, &settings)?;

        if updated.enabled {
            self.scheduler.schedule(updated.clone());
        } else {
            self.scheduler.cancel(&updated.id);
        }

        Ok(updated)
    }

    /// Quick setup: enable the four core reminders at their recommended
    /// times in one shot.
    pub fn apply_recommended_times(&self) -> AppResult<Vec<NotificationSetting>> {
        for (id, time) in RECOMMENDED_TIMES {
            self.update(
                id,
                NotificationSettingUpdate {
                    enabled: Some(true),
                    time: Some(time.to_string()),
                    frequency: None,
                },
            )?;
        }
        self.list()
    }

    /// Arms a timer for every enabled reminder. Idempotent; called once at
    /// startup and safe to call again.
    pub fn ensure_reminder_jobs(&self) -> AppResult<()> {
        let settings = self.list()?;
        let mut armed = 0;
        for setting in settings.into_iter().filter(|setting| setting.enabled) {
            self.scheduler.schedule(setting);
            armed += 1;
        }
        info!(target: "app::reminders", armed, "reminder jobs initialized");
        Ok(())
    }

    /// Immediate fire for the settings screen's test button.
    pub fn trigger_test(&self, id: &str) -> AppResult<NotificationSetting> {
        let settings = self.list()?;
        let setting = settings
            .into_iter()
            .find(|setting| setting.id == id)
            .ok_or_else(AppError::not_found)?;

        fire(&setting, true);
        Ok(setting)
    }
}

fn fire(setting: &NotificationSetting, test: bool) {
    info!(
        target: "app::reminders",
        id = %setting.id,
        title = %setting.title,
        body = %setting.description,
        test,
        "reminder fired"
    );
}

/// One timer task per reminder id. Rescheduling replaces the task; disabling
/// aborts it.
struct ReminderScheduler {
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl ReminderScheduler {
    fn new() -> Self {
        Self {
            timers: Mutex::new(HashMap::new()),
        }
    }

    fn schedule(&self, setting: NotificationSetting) {
        self.cancel(&setting.id);

        let Some(time) = parse_time(&setting.time) else {
            warn!(
                target: "app::reminders",
                id = %setting.id,
                time = %setting.time,
                "stored reminder time is invalid, timer not armed"
            );
            return;
        };

        let id = setting.id.clone();
        let handle = async_runtime::spawn(async move {
            let mut next = next_occurrence(Local::now().naive_local(), time);
            loop {
                let wait = (next - Local::now().naive_local())
                    .to_std()
                    .unwrap_or_default();
                tokio::time::sleep(wait).await;

                fire(&setting, false);

                next = next + match setting.frequency {
                    NotificationFrequency::Daily => Duration::days(1),
                    NotificationFrequency::Weekly => Duration::days(7),
                    // One-shot: stays quiet until the user updates it again.
                    NotificationFrequency::Custom => break,
                };
            }
        });

        if let Ok(mut timers) = self.timers.lock() {
            timers.insert(id, handle);
        }
    }

    fn cancel(&self, id: &str) {
        if let Ok(mut timers) = self.timers.lock() {
            if let Some(handle) = timers.remove(id) {
                handle.abort();
            }
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        if let Ok(mut timers) = self.timers.lock() {
            for (_, handle) in timers.drain() {
                handle.abort();
            }
        }
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Today at `time`, or tomorrow if that moment has already passed.
pub fn next_occurrence(now: NaiveDateTime, time: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(time);
    if today <= now {
        today + Duration::days(1)
    } else {
        today
    }
}
