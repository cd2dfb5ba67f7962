use tauri::{async_runtime, State};

use crate::error::AppError;
use crate::models::progress::{Achievement, ProgressPoint};

use super::{AppState, CommandError, CommandResult};

#[tauri::command]
pub async fn progress_get_history(
    state: State<'_, AppState>,
) -> CommandResult<Vec<ProgressPoint>> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.progress().history()).await
}

#[tauri::command]
pub async fn progress_get_achievements(
    state: State<'_, AppState>,
) -> CommandResult<Vec<Achievement>> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.progress().achievements()).await
}

/// Returns the pretty-printed JSON payload; the frontend turns it into a
/// download named `aging-slowdown-progress.json`.
#[tauri::command]
pub async fn progress_export(state: State<'_, AppState>) -> CommandResult<String> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.progress().export()).await
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("进度统计任务执行失败: {err}"), None))?
        .map_err(CommandError::from)
}
