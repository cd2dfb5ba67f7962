pub mod activity_service;
pub mod aging_service;
pub mod biomarker_service;
pub mod notification_service;
pub mod profile_service;
pub mod progress_service;
pub mod recommendation_service;
pub mod state_store;
