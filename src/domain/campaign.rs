use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Displayable, Identifiable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Completed,
    Paused,
}

impl Default for CampaignStatus {
    fn default() -> Self {
        CampaignStatus::Active
    }
}

/// A fundraising campaign with a goal in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub goal_amount: i64,
    #[serde(default)]
    pub current_amount: i64,
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_visible_in_app: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Campaign {
    pub fn new(
        title: &str,
        goal_amount: i64,
        currency: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            goal_amount,
            current_amount: 0,
            currency: currency.to_string(),
            start_date,
            end_date,
            status: CampaignStatus::Active,
            image_url: None,
            is_visible_in_app: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Percentage of the goal raised so far; 0 when the goal is unset.
    pub fn progress_percent(&self) -> f64 {
        if self.goal_amount > 0 {
            self.current_amount as f64 / self.goal_amount as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Adds a donation to the running total, completing the campaign once
    /// the goal is reached.
    pub fn record_donation(&mut self, amount: i64) {
        self.current_amount += amount;
        if self.goal_amount > 0 && self.current_amount >= self.goal_amount {
            self.status = CampaignStatus::Completed;
        }
    }
}

impl Identifiable for Campaign {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Campaign {
    fn display_label(&self) -> String {
        format!("{} ({:.0}%)", self.title, self.progress_percent())
    }
}
