use std::fs;

use chrono::DateTime;
use masjid_core::core::clock::FixedClock;
use masjid_core::core::services::AnalyticsService;
use masjid_core::domain::donation::PaymentStatus;
use tempfile::TempDir;

const SNAPSHOT_JSON: &str = r#"{
  "donations": [
    {
      "id": "don_1",
      "receipt_number": "RCPT-0001",
      "donor_name": "Fatima Ali",
      "donor_email": "fatima@example.com",
      "amount": 5000,
      "currency": "AUD",
      "donation_type_label": "General",
      "payment_status": "succeeded",
      "is_recurring": false,
      "date": "2025-03-16"
    },
    {
      "id": "don_2",
      "receipt_number": "RCPT-0002",
      "donor_name": "Omar Hassan",
      "donor_email": "omar@example.com",
      "amount": 2000,
      "currency": "AUD",
      "donation_type_label": "Zakat",
      "payment_status": "succeeded",
      "is_recurring": true,
      "date": "2025-03-10"
    },
    {
      "id": "don_3",
      "receipt_number": "RCPT-0003",
      "donor_name": "Test Donor",
      "donor_email": "test@example.com",
      "amount": 9000,
      "currency": "AUD",
      "donation_type_label": "General",
      "payment_status": "disputed",
      "is_recurring": false,
      "date": "2025-03-16"
    }
  ],
  "recurringDonations": [
    {
      "id": "sub_1",
      "donor_name": "Omar Hassan",
      "donor_email": "omar@example.com",
      "amount": 2000,
      "frequency": "weekly",
      "status": "active",
      "donation_type_label": "Zakat"
    },
    {
      "id": "sub_2",
      "donor_name": "Fatima Ali",
      "donor_email": "fatima@example.com",
      "amount": 12000,
      "frequency": "yearly",
      "status": "cancelled",
      "donation_type_label": "General"
    }
  ],
  "summary": { "totalAmount": 7000, "byMonth": {} }
}"#;

fn write_snapshot(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("snapshot.json");
    fs::write(&path, SNAPSHOT_JSON).expect("write snapshot");
    path
}

#[test]
fn snapshot_loads_with_unknown_statuses_preserved() {
    let dir = TempDir::new().expect("temp dir");
    let snapshot = AnalyticsService::load_snapshot(&write_snapshot(&dir)).expect("load");
    assert_eq!(snapshot.donations.len(), 3);
    assert_eq!(snapshot.donations[2].payment_status, PaymentStatus::Unknown);
    assert_eq!(snapshot.recurring_donations.len(), 2);
}

#[test]
fn dashboard_tiles_follow_the_configured_zone() {
    let dir = TempDir::new().expect("temp dir");
    let snapshot = AnalyticsService::load_snapshot(&write_snapshot(&dir)).expect("load");
    // 2025-03-15T20:00:00Z is already 2025-03-16 in Sydney.
    let clock = FixedClock(
        "2025-03-15T20:00:00Z"
            .parse::<DateTime<chrono::Utc>>()
            .expect("instant"),
    );
    let tiles = AnalyticsService::dashboard(&snapshot, &clock, chrono_tz::Australia::Sydney);
    assert_eq!(
        tiles.today.range.start,
        "2025-03-16".parse::<chrono::NaiveDate>().expect("date")
    );
    assert_eq!(tiles.today.range.end, tiles.today.range.start);
    assert_eq!(tiles.today.total, 5_000);
    assert_eq!(tiles.week.total, 7_000);
    assert_eq!(tiles.month.total, 7_000);
    assert_eq!(tiles.year.total, 7_000);
    // Only the active weekly subscription counts: 2000 * 4.33.
    assert!((tiles.recurring_monthly - 8_660.0).abs() < 1e-9);
    assert_eq!(tiles.active_subscriptions, 1);
}

#[test]
fn summary_is_rebuilt_from_succeeded_donations() {
    let dir = TempDir::new().expect("temp dir");
    let snapshot = AnalyticsService::load_snapshot(&write_snapshot(&dir)).expect("load");
    let summary = AnalyticsService::summary(&snapshot);
    assert_eq!(summary.total_amount, 7_000);
    assert_eq!(summary.by_month["2025-03"].count, 2);
}

#[test]
fn csv_export_writes_succeeded_rows_only() {
    let dir = TempDir::new().expect("temp dir");
    let snapshot = AnalyticsService::load_snapshot(&write_snapshot(&dir)).expect("load");
    let out = dir.path().join("donations.csv");
    AnalyticsService::export_csv(&snapshot, &out).expect("export");

    let csv = fs::read_to_string(&out).expect("read export");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Receipt Number"));
    assert!(csv.contains("\"$50.00\""));
    assert!(!csv.contains("RCPT-0003"));
}
