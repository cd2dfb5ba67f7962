use tauri::{async_runtime, State};

use crate::error::AppError;
use crate::models::assessment::AgingAssessment;

use super::{AppState, CommandError, CommandResult};

#[tauri::command]
pub async fn aging_get_assessment(state: State<'_, AppState>) -> CommandResult<AgingAssessment> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.aging().current_assessment()).await
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("衰老评估任务执行失败: {err}"), None))?
        .map_err(CommandError::from)
}
