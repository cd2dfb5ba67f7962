pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    if let Err(error) = try_run() {
        eprintln!("failed to launch application: {error}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let handle = app.handle();

            crate::utils::logger::init_logging(&handle)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            let mut data_dir = handle
                .path()
                .app_data_dir()
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            std::fs::create_dir_all(&data_dir)?;
            data_dir.push("agecoach.sqlite");

            let pool = crate::db::DbPool::new(&data_dir)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            let state = crate::commands::AppState::new(pool)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;
            app.manage(state);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            crate::commands::profile::profile_get,
            crate::commands::profile::profile_update,
            crate::commands::activity::activities_list,
            crate::commands::activity::activities_get_today,
            crate::commands::activity::activities_upsert,
            crate::commands::activity::activities_get_streaks,
            crate::commands::activity::activities_get_weekly_summary,
            crate::commands::assessment::aging_get_assessment,
            crate::commands::biomarkers::biomarkers_estimate,
            crate::commands::biomarkers::biomarkers_get_overview,
            crate::commands::recommendations::recommendations_generate,
            crate::commands::progress::progress_get_history,
            crate::commands::progress::progress_get_achievements,
            crate::commands::progress::progress_export,
            crate::commands::notifications::notifications_list,
            crate::commands::notifications::notifications_update,
            crate::commands::notifications::notifications_apply_recommended,
            crate::commands::notifications::notifications_test,
        ])
        .run(tauri::generate_context!())?;

    Ok(())
}
