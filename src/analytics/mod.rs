//! Donation analytics rollups for the dashboard summary tiles.
//!
//! Pure functions over already-fetched snapshots: records in, numbers out.
//! Malformed records are skipped rather than surfaced as errors; these
//! figures feed advisory tiles, not a ledger of record.

pub mod export;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;

use crate::domain::donation::{
    AnalyticsSnapshot, AnalyticsSummary, DonationRecord, Frequency, MonthBucket, PaymentStatus,
    RecurringDonation, SubscriptionStatus,
};

const WEEKS_PER_MONTH: f64 = 4.33;
const FORTNIGHTS_PER_MONTH: f64 = 2.17;
const MONTHS_PER_YEAR: f64 = 12.0;

/// Dashboard reporting periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Week,
    Month,
    Year,
}

impl Period {
    pub fn parse(raw: &str) -> Option<Period> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "today" => Some(Period::Today),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            "year" => Some(Period::Year),
            _ => None,
        }
    }
}

/// An inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Resolves a reporting period to concrete dates in the organization's
/// timezone. Donation dates are stored pre-normalized to that zone, so two
/// deployments in different host zones must agree on "today".
pub fn date_range_for(period: Period, reference_now: DateTime<Utc>, tz: Tz) -> DateRange {
    let today = reference_now.with_timezone(&tz).date_naive();
    let start = match period {
        Period::Today => today,
        Period::Week => today - Duration::days(7),
        Period::Month => today.with_day(1).unwrap_or(today),
        Period::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
    };
    DateRange { start, end: today }
}

/// Sums succeeded donations dated inside the range. Records with an
/// unparseable date or non-succeeded status are excluded, never an error.
pub fn sum_in_range(records: &[DonationRecord], range: &DateRange) -> i64 {
    records
        .iter()
        .filter(|record| record.payment_status == PaymentStatus::Succeeded)
        .filter_map(|record| record.parsed_date().map(|date| (record, date)))
        .filter(|(_, date)| range.contains(*date))
        .map(|(record, _)| record.amount)
        .sum()
}

/// Normalizes active subscriptions to a monthly-equivalent total.
///
/// The weekly and fortnightly multipliers are average-weeks-per-month
/// approximations, not exact accounting figures. Unknown frequencies
/// contribute nothing.
pub fn monthly_recurring_total(subs: &[RecurringDonation]) -> f64 {
    subs.iter()
        .filter(|sub| sub.status == SubscriptionStatus::Active)
        .map(|sub| {
            let amount = sub.amount as f64;
            match sub.frequency {
                Frequency::Weekly => amount * WEEKS_PER_MONTH,
                Frequency::Fortnightly => amount * FORTNIGHTS_PER_MONTH,
                Frequency::Monthly => amount,
                Frequency::Yearly => amount / MONTHS_PER_YEAR,
                Frequency::Unknown => 0.0,
            }
        })
        .sum()
}

pub fn active_subscription_count(subs: &[RecurringDonation]) -> usize {
    subs.iter()
        .filter(|sub| sub.status == SubscriptionStatus::Active)
        .count()
}

/// Rebuilds the per-month summary over succeeded donations, keyed `YYYY-MM`.
pub fn rebuild_summary(records: &[DonationRecord]) -> AnalyticsSummary {
    let mut by_month: BTreeMap<String, MonthBucket> = BTreeMap::new();
    let mut total_amount = 0i64;
    for record in records
        .iter()
        .filter(|record| record.payment_status == PaymentStatus::Succeeded)
    {
        let Some(date) = record.parsed_date() else {
            continue;
        };
        let bucket = by_month
            .entry(format!("{:04}-{:02}", date.year(), date.month()))
            .or_default();
        bucket.count += 1;
        bucket.amount += record.amount;
        total_amount += record.amount;
    }
    AnalyticsSummary {
        total_amount,
        by_month,
    }
}

/// One summary tile: the resolved range and the total inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTile {
    pub range: DateRange,
    pub total: i64,
}

/// Everything the dashboard summary view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardTiles {
    pub today: PeriodTile,
    pub week: PeriodTile,
    pub month: PeriodTile,
    pub year: PeriodTile,
    pub recurring_monthly: f64,
    pub active_subscriptions: usize,
}

/// Computes all five tiles from a snapshot.
pub fn dashboard_tiles(
    snapshot: &AnalyticsSnapshot,
    reference_now: DateTime<Utc>,
    tz: Tz,
) -> DashboardTiles {
    let tile = |period| {
        let range = date_range_for(period, reference_now, tz);
        PeriodTile {
            range,
            total: sum_in_range(&snapshot.donations, &range),
        }
    };
    DashboardTiles {
        today: tile(Period::Today),
        week: tile(Period::Week),
        month: tile(Period::Month),
        year: tile(Period::Year),
        recurring_monthly: monthly_recurring_total(&snapshot.recurring_donations),
        active_subscriptions: active_subscription_count(&snapshot.recurring_donations),
    }
}
