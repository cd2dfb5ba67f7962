use tauri::{async_runtime, State};

use crate::error::AppError;
use crate::models::notification::{NotificationSetting, NotificationSettingUpdate};

use super::{AppState, CommandError, CommandResult};

#[tauri::command]
pub async fn notifications_list(
    state: State<'_, AppState>,
) -> CommandResult<Vec<NotificationSetting>> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.notifications().list()).await
}

#[tauri::command]
pub async fn notifications_update(
    state: State<'_, AppState>,
    id: String,
    payload: NotificationSettingUpdate,
) -> CommandResult<NotificationSetting> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.notifications().update(&id, payload)).await
}

#[tauri::command]
pub async fn notifications_apply_recommended(
    state: State<'_, AppState>,
) -> CommandResult<Vec<NotificationSetting>> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.notifications().apply_recommended_times()).await
}

#[tauri::command]
pub async fn notifications_test(
    state: State<'_, AppState>,
    id: String,
) -> CommandResult<NotificationSetting> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.notifications().trigger_test(&id)).await
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("提醒设置任务执行失败: {err}"), None))?
        .map_err(CommandError::from)
}
