use tauri::{async_runtime, State};

use crate::error::AppError;
use crate::models::profile::{ProfileUpdateInput, UserProfile};

use super::{AppState, CommandError, CommandResult};

#[tauri::command]
pub async fn profile_get(state: State<'_, AppState>) -> CommandResult<UserProfile> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.profile().get()).await
}

#[tauri::command]
pub async fn profile_update(
    state: State<'_, AppState>,
    payload: ProfileUpdateInput,
) -> CommandResult<UserProfile> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.profile().update(payload)).await
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("档案操作执行失败: {err}"), None))?
        .map_err(CommandError::from)
}
