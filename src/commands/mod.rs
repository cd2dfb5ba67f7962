pub mod activity;
pub mod assessment;
pub mod biomarkers;
pub mod notifications;
pub mod profile;
pub mod progress;
pub mod recommendations;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{error, warn};

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::services::activity_service::ActivityService;
use crate::services::aging_service::AgingService;
use crate::services::biomarker_service::BiomarkerService;
use crate::services::notification_service::NotificationService;
use crate::services::profile_service::ProfileService;
use crate::services::progress_service::ProgressService;
use crate::services::recommendation_service::RecommendationService;

#[derive(Clone)]
pub struct AppState {
    db_pool: DbPool,
    profile_service: Arc<ProfileService>,
    activity_service: Arc<ActivityService>,
    aging_service: Arc<AgingService>,
    biomarker_service: Arc<BiomarkerService>,
    recommendation_service: Arc<RecommendationService>,
    progress_service: Arc<ProgressService>,
    notification_service: Arc<NotificationService>,
}

impl AppState {
    pub fn new(db_pool: DbPool) -> AppResult<Self> {
        let profile_service = Arc::new(ProfileService::new(db_pool.clone()));
        let activity_service = Arc::new(ActivityService::new(db_pool.clone()));
        let aging_service = Arc::new(AgingService::new(
            Arc::clone(&profile_service),
            Arc::clone(&activity_service),
        ));
        let biomarker_service = Arc::new(BiomarkerService::new(Arc::clone(&profile_service)));
        let recommendation_service = Arc::new(RecommendationService::new(
            Arc::clone(&profile_service),
            Arc::clone(&activity_service),
        ));
        let progress_service = Arc::new(ProgressService::new(Arc::clone(&activity_service)));
        let notification_service = Arc::new(NotificationService::new(db_pool.clone()));

        notification_service.ensure_reminder_jobs()?;

        Ok(Self {
            db_pool,
            profile_service,
            activity_service,
            aging_service,
            biomarker_service,
            recommendation_service,
            progress_service,
            notification_service,
        })
    }

    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile_service)
    }

    pub fn activities(&self) -> Arc<ActivityService> {
        Arc::clone(&self.activity_service)
    }

    pub fn aging(&self) -> Arc<AgingService> {
        Arc::clone(&self.aging_service)
    }

    pub fn biomarkers(&self) -> Arc<BiomarkerService> {
        Arc::clone(&self.biomarker_service)
    }

    pub fn recommendations(&self) -> Arc<RecommendationService> {
        Arc::clone(&self.recommendation_service)
    }

    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress_service)
    }

    pub fn notifications(&self) -> Arc<NotificationService> {
        Arc::clone(&self.notification_service)
    }

    pub fn db(&self) -> DbPool {
        self.db_pool.clone()
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation {
                message, details, ..
            } => CommandError::new("VALIDATION_ERROR", message, details),
            AppError::NotFound => CommandError::new("NOT_FOUND", "请求的资源不存在", None),
            AppError::Conflict { message } => CommandError::new("CONFLICT", message, None),
            AppError::Database { message } => {
                error!(target: "app::command", %message, "database error in command");
                CommandError::new("UNKNOWN", message, None)
            }
            AppError::Serialization(error) => {
                error!(target: "app::command", error = %error, "serialization error in command");
                CommandError::new("UNKNOWN", "序列化失败", None)
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::new("UNKNOWN", "文件系统读写失败", None)
            }
            AppError::Other(message) => {
                warn!(target: "app::command", %message, "unexpected error in command");
                CommandError::new("UNKNOWN", message, None)
            }
        }
    }
}
