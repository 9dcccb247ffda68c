//! CSV export of succeeded donations, matching the dashboard download.

use crate::domain::donation::{DonationRecord, PaymentStatus};

const CSV_HEADER: &str = "Receipt Number,Date,Donor Name,Donor Email,Amount,Type,Recurring";

/// Formats minor currency units as a major-unit dollar string, e.g. `$12.34`.
pub fn format_major_units(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let magnitude = minor.unsigned_abs();
    format!("{sign}${}.{:02}", magnitude / 100, magnitude % 100)
}

/// Renders succeeded donations as CSV, every field quoted.
pub fn donations_csv(records: &[DonationRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for record in records
        .iter()
        .filter(|record| record.payment_status == PaymentStatus::Succeeded)
    {
        let row = [
            record.receipt_number.as_str(),
            record.date.as_str(),
            record.donor_name.as_str(),
            record.donor_email.as_str(),
            &format_major_units(record.amount),
            record.donation_type_label.as_str(),
            if record.is_recurring { "Yes" } else { "No" },
        ]
        .map(quote_field)
        .join(",");
        out.push_str(&row);
        out.push('\n');
    }
    out
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: i64, status: PaymentStatus) -> DonationRecord {
        DonationRecord {
            id: "don_1".to_string(),
            receipt_number: "RCPT-0042".to_string(),
            donor_name: "Amina \"Ami\" Khan".to_string(),
            donor_email: "amina@example.com".to_string(),
            amount,
            currency: "AUD".to_string(),
            donation_type_label: "Zakat".to_string(),
            payment_status: status,
            is_recurring: true,
            date: "2025-03-01".to_string(),
        }
    }

    #[test]
    fn major_units_are_zero_padded() {
        assert_eq!(format_major_units(100_000), "$1000.00");
        assert_eq!(format_major_units(205), "$2.05");
        assert_eq!(format_major_units(-50), "-$0.50");
    }

    #[test]
    fn only_succeeded_rows_are_exported() {
        let csv = donations_csv(&[
            record(1_000, PaymentStatus::Succeeded),
            record(2_000, PaymentStatus::Failed),
        ]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].contains("\"$10.00\""));
        assert!(lines[1].contains("\"Yes\""));
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        let csv = donations_csv(&[record(500, PaymentStatus::Succeeded)]);
        assert!(csv.contains("\"Amina \"\"Ami\"\" Khan\""));
    }
}
