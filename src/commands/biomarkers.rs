use tauri::{async_runtime, State};

use crate::error::AppError;
use crate::models::biomarker::{Biomarker, BiomarkerCategory, BiomarkerOverview};

use super::{AppState, CommandError, CommandResult};

#[tauri::command]
pub async fn biomarkers_estimate(
    state: State<'_, AppState>,
    category: Option<String>,
) -> CommandResult<Vec<Biomarker>> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        let service = app_state.biomarkers();
        match category {
            Some(raw) => {
                let category =
                    BiomarkerCategory::try_from(raw.as_str()).map_err(AppError::validation)?;
                service.estimate_for_category(category)
            }
            None => service.estimate(),
        }
    })
    .await
}

#[tauri::command]
pub async fn biomarkers_get_overview(
    state: State<'_, AppState>,
) -> CommandResult<BiomarkerOverview> {
    let app_state = state.inner().clone();
    run_blocking(move || app_state.biomarkers().overview()).await
}

async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| {
            CommandError::new("UNKNOWN", format!("生物标志物任务执行失败: {err}"), None)
        })?
        .map_err(CommandError::from)
}
