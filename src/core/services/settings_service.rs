use chrono_tz::Tz;

use crate::core::clock::Clock;
use crate::domain::donation::DonationSettings;
use crate::domain::mosque::MosqueProfile;
use crate::domain::NamedEntity;
use crate::storage::{self, DocumentId, StorageBackend};

use super::{ServiceError, ServiceResult};

/// Loads and persists the mosque profile and donation settings documents.
pub struct SettingsService;

impl SettingsService {
    pub fn load_profile(backend: &dyn StorageBackend) -> ServiceResult<MosqueProfile> {
        Ok(storage::load_document(backend, DocumentId::MosqueProfile)?)
    }

    pub fn save_profile(
        backend: &dyn StorageBackend,
        clock: &dyn Clock,
        tz: Tz,
        profile: &mut MosqueProfile,
    ) -> ServiceResult<()> {
        if profile.name().trim().is_empty() {
            return Err(ServiceError::Invalid("mosque name is required".into()));
        }
        profile.last_updated = Some(clock.today_in(tz));
        storage::save_document(backend, DocumentId::MosqueProfile, profile)?;
        tracing::info!(mosque = %profile.name(), "mosque profile saved");
        Ok(())
    }

    pub fn load_donation_settings(
        backend: &dyn StorageBackend,
    ) -> ServiceResult<DonationSettings> {
        Ok(storage::load_document(backend, DocumentId::DonationSettings)?)
    }

    pub fn save_donation_settings(
        backend: &dyn StorageBackend,
        clock: &dyn Clock,
        tz: Tz,
        settings: &mut DonationSettings,
    ) -> ServiceResult<()> {
        Self::validate_donation_settings(settings)?;
        settings.last_updated = Some(clock.today_in(tz));
        storage::save_document(backend, DocumentId::DonationSettings, settings)?;
        tracing::info!("donation settings saved");
        Ok(())
    }

    pub fn validate_donation_settings(settings: &DonationSettings) -> ServiceResult<()> {
        if settings.minimum_amount < 0 {
            return Err(ServiceError::Invalid(
                "minimum amount cannot be negative".into(),
            ));
        }
        if settings.preset_amounts.iter().any(|amount| *amount <= 0) {
            return Err(ServiceError::Invalid(
                "preset amounts must be positive".into(),
            ));
        }
        if settings.receipt_prefix.trim().is_empty() {
            return Err(ServiceError::Invalid("receipt prefix is required".into()));
        }
        Ok(())
    }
}
