use uuid::Uuid;

use crate::core::clock::Clock;
use crate::domain::campaign::Campaign;
use crate::storage::{self, DocumentId, StorageBackend};

use super::{ServiceError, ServiceResult};

/// CRUD and donation recording over the campaigns document.
pub struct CampaignService;

impl CampaignService {
    /// All campaigns, most recent start date first.
    pub fn list(backend: &dyn StorageBackend) -> ServiceResult<Vec<Campaign>> {
        let mut campaigns: Vec<Campaign> = storage::load_document(backend, DocumentId::Campaigns)?;
        campaigns.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(campaigns)
    }

    pub fn upsert(
        backend: &dyn StorageBackend,
        clock: &dyn Clock,
        mut campaign: Campaign,
    ) -> ServiceResult<Campaign> {
        Self::validate(&campaign)?;
        let now = clock.now();
        campaign.updated_at = Some(now);
        if campaign.created_at.is_none() {
            campaign.created_at = Some(now);
        }
        let mut campaigns: Vec<Campaign> = storage::load_document(backend, DocumentId::Campaigns)?;
        match campaigns
            .iter_mut()
            .find(|existing| existing.id == campaign.id)
        {
            Some(existing) => *existing = campaign.clone(),
            None => campaigns.push(campaign.clone()),
        }
        storage::save_document(backend, DocumentId::Campaigns, &campaigns)?;
        tracing::info!(campaign = %campaign.title, "campaign saved");
        Ok(campaign)
    }

    pub fn validate(campaign: &Campaign) -> ServiceResult<()> {
        if campaign.title.trim().is_empty() {
            return Err(ServiceError::Invalid("campaign title is required".into()));
        }
        if campaign.goal_amount <= 0 {
            return Err(ServiceError::Invalid(
                "campaign goal must be a positive amount".into(),
            ));
        }
        if campaign.end_date < campaign.start_date {
            return Err(ServiceError::Invalid(format!(
                "campaign ends ({}) before it starts ({})",
                campaign.end_date, campaign.start_date
            )));
        }
        Ok(())
    }

    pub fn delete(backend: &dyn StorageBackend, id: Uuid) -> ServiceResult<bool> {
        let mut campaigns: Vec<Campaign> = storage::load_document(backend, DocumentId::Campaigns)?;
        let before = campaigns.len();
        campaigns.retain(|campaign| campaign.id != id);
        if campaigns.len() == before {
            return Ok(false);
        }
        storage::save_document(backend, DocumentId::Campaigns, &campaigns)?;
        Ok(true)
    }

    /// Adds a donation to a campaign's running total and persists the
    /// result, returning the updated campaign.
    pub fn record_donation(
        backend: &dyn StorageBackend,
        clock: &dyn Clock,
        id: Uuid,
        amount: i64,
    ) -> ServiceResult<Campaign> {
        if amount <= 0 {
            return Err(ServiceError::Invalid(
                "donation amount must be positive".into(),
            ));
        }
        let mut campaigns: Vec<Campaign> = storage::load_document(backend, DocumentId::Campaigns)?;
        let Some(campaign) = campaigns.iter_mut().find(|campaign| campaign.id == id) else {
            return Err(ServiceError::Invalid(format!("no campaign with id {id}")));
        };
        campaign.record_donation(amount);
        campaign.updated_at = Some(clock.now());
        let updated = campaign.clone();
        storage::save_document(backend, DocumentId::Campaigns, &campaigns)?;
        Ok(updated)
    }
}
