//! Donation records, recurring subscriptions, and donation settings.
//!
//! Records arrive from the external analytics endpoint as immutable
//! snapshots; unknown statuses and frequencies deserialize to `Unknown`
//! instead of failing so one malformed record never sinks a whole reply.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payment outcome reported by the payment processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
    Refunded,
    #[serde(other)]
    Unknown,
}

/// Billing cadence of a recurring donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Fortnightly,
    Monthly,
    Yearly,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// One completed (or attempted) donation, amount in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRecord {
    pub id: String,
    pub receipt_number: String,
    pub donor_name: String,
    pub donor_email: String,
    pub amount: i64,
    pub currency: String,
    pub donation_type_label: String,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub is_recurring: bool,
    /// `YYYY-MM-DD`, already normalized to the organization's timezone.
    pub date: String,
}

impl DonationRecord {
    /// Parses the record date, `None` when it is malformed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// An ongoing donation subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringDonation {
    pub id: String,
    pub donor_name: String,
    pub donor_email: String,
    pub amount: i64,
    pub frequency: Frequency,
    pub status: SubscriptionStatus,
    pub donation_type_label: String,
}

/// Per-month rollup inside the analytics summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub count: u64,
    pub amount: i64,
}

/// Aggregate figures computed over a donation list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_amount: i64,
    pub by_month: BTreeMap<String, MonthBucket>,
}

/// The analytics endpoint's reply shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub donations: Vec<DonationRecord>,
    pub recurring_donations: Vec<RecurringDonation>,
    #[serde(default)]
    pub summary: AnalyticsSummary,
}

/// A configurable donation purpose (zakat, sadaqah, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationType {
    pub id: String,
    pub label: String,
    pub enabled: bool,
}

/// A recurring-frequency choice offered in the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyOption {
    pub id: String,
    pub label: String,
    pub enabled: bool,
}

/// The donation-settings document edited by staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationSettings {
    pub donation_types: Vec<DonationType>,
    pub preset_amounts: Vec<i64>,
    pub allow_custom_amount: bool,
    pub minimum_amount: i64,
    pub receipt_prefix: String,
    pub recurring_frequencies: Vec<FrequencyOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

impl Default for DonationSettings {
    fn default() -> Self {
        DonationSettings {
            donation_types: vec![
                DonationType {
                    id: "general".to_string(),
                    label: "General".to_string(),
                    enabled: true,
                },
                DonationType {
                    id: "zakat".to_string(),
                    label: "Zakat".to_string(),
                    enabled: true,
                },
            ],
            preset_amounts: vec![1_000, 2_500, 5_000, 10_000],
            allow_custom_amount: true,
            minimum_amount: 500,
            receipt_prefix: "RCPT".to_string(),
            recurring_frequencies: vec![
                FrequencyOption {
                    id: "weekly".to_string(),
                    label: "Weekly".to_string(),
                    enabled: true,
                },
                FrequencyOption {
                    id: "monthly".to_string(),
                    label: "Monthly".to_string(),
                    enabled: true,
                },
            ],
            last_updated: None,
        }
    }
}

impl DonationSettings {
    /// Lowercased, underscore-separated identifier derived from a label.
    pub fn slugify(label: &str) -> String {
        label
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Adds a donation type; `false` when the derived id already exists.
    pub fn add_donation_type(&mut self, label: &str) -> bool {
        let id = Self::slugify(label);
        if id.is_empty() || self.donation_types.iter().any(|t| t.id == id) {
            return false;
        }
        self.donation_types.push(DonationType {
            id,
            label: label.trim().to_string(),
            enabled: true,
        });
        true
    }

    /// Flips a donation type's enabled flag; `false` for an unknown id.
    pub fn toggle_donation_type(&mut self, id: &str) -> bool {
        match self.donation_types.iter_mut().find(|t| t.id == id) {
            Some(entry) => {
                entry.enabled = !entry.enabled;
                true
            }
            None => false,
        }
    }

    /// Inserts a preset amount, keeping the list sorted and free of
    /// duplicates; `false` when the amount is already present or not positive.
    pub fn add_preset_amount(&mut self, amount: i64) -> bool {
        if amount <= 0 || self.preset_amounts.contains(&amount) {
            return false;
        }
        self.preset_amounts.push(amount);
        self.preset_amounts.sort_unstable();
        true
    }

    pub fn remove_preset_amount(&mut self, amount: i64) -> bool {
        let before = self.preset_amounts.len();
        self.preset_amounts.retain(|candidate| *candidate != amount);
        self.preset_amounts.len() != before
    }

    pub fn toggle_frequency(&mut self, id: &str) -> bool {
        match self.recurring_frequencies.iter_mut().find(|f| f.id == id) {
            Some(entry) => {
                entry.enabled = !entry.enabled;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_whitespace() {
        assert_eq!(DonationSettings::slugify("  Building  Fund "), "building_fund");
    }

    #[test]
    fn duplicate_type_ids_are_rejected() {
        let mut settings = DonationSettings::default();
        assert!(settings.add_donation_type("Building Fund"));
        assert!(!settings.add_donation_type("building   fund"));
    }

    #[test]
    fn preset_amounts_stay_sorted_and_unique() {
        let mut settings = DonationSettings::default();
        assert!(settings.add_preset_amount(7_500));
        assert!(!settings.add_preset_amount(7_500));
        assert!(!settings.add_preset_amount(0));
        let mut sorted = settings.preset_amounts.clone();
        sorted.sort_unstable();
        assert_eq!(settings.preset_amounts, sorted);
        assert!(settings.remove_preset_amount(7_500));
        assert!(!settings.remove_preset_amount(7_500));
    }

    #[test]
    fn unknown_payment_status_deserializes_to_unknown() {
        let status: PaymentStatus = serde_json::from_str("\"disputed\"").expect("deserialize");
        assert_eq!(status, PaymentStatus::Unknown);
    }

    #[test]
    fn snapshot_accepts_endpoint_field_names() {
        let raw = r#"{
            "donations": [],
            "recurringDonations": [],
            "summary": { "totalAmount": 0, "byMonth": {} }
        }"#;
        let snapshot: AnalyticsSnapshot = serde_json::from_str(raw).expect("deserialize");
        assert!(snapshot.donations.is_empty());
    }
}
