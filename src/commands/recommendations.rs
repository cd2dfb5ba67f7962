use tauri::{async_runtime, State};

use crate::error::AppError;
use crate::models::recommendation::Recommendation;

use super::{AppState, CommandError, CommandResult};

#[tauri::command]
pub async fn recommendations_generate(
    state: State<'_, AppState>,
) -> CommandResult<Vec<Recommendation>> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.recommendations().generate()).await
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("建议生成任务执行失败: {err}"), None))?
        .map_err(CommandError::from)
}
