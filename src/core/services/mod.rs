pub mod analytics_service;
pub mod campaign_service;
pub mod event_service;
pub mod schedule_service;
pub mod settings_service;

pub use analytics_service::AnalyticsService;
pub use campaign_service::CampaignService;
pub use event_service::EventService;
pub use schedule_service::ScheduleService;
pub use settings_service::SettingsService;

use crate::errors::CoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("{0}")]
    Invalid(String),
}
