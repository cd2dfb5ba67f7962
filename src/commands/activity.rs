use serde::Deserialize;
use tauri::{async_runtime, State};

use crate::error::AppError;
use crate::models::activity::{DailyActivity, DailyActivityUpdate, StreakSummary};
use crate::services::activity_service::WeeklySummary;

use super::{AppState, CommandError, CommandResult};

#[tauri::command]
pub async fn activities_list(state: State<'_, AppState>) -> CommandResult<Vec<DailyActivity>> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.activities().list()).await
}

#[tauri::command]
pub async fn activities_get_today(state: State<'_, AppState>) -> CommandResult<DailyActivity> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.activities().get_today()).await
}

#[tauri::command]
pub async fn activities_upsert(
    state: State<'_, AppState>,
    payload: ActivityUpsertPayload,
) -> CommandResult<DailyActivity> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        let service = app_state.activities();
        match payload.date {
            Some(date) => service.upsert(&date, payload.patch),
            None => service.upsert_today(payload.patch),
        }
    })
    .await
}

#[tauri::command]
pub async fn activities_get_streaks(state: State<'_, AppState>) -> CommandResult<StreakSummary> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.activities().streaks()).await
}

#[tauri::command]
pub async fn activities_get_weekly_summary(
    state: State<'_, AppState>,
) -> CommandResult<WeeklySummary> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.activities().weekly_summary()).await
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpsertPayload {
    /// ISO date key; omitted means "today".
    #[serde(default)]
    pub date: Option<String>,
    #[serde(flatten)]
    pub patch: DailyActivityUpdate,
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("活动记录任务执行失败: {err}"), None))?
        .map_err(CommandError::from)
}
