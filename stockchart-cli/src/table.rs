//! Plain-text listing of price records.

use std::fmt::Write;

use stockchart_core::domain::DATE_FORMAT;
use stockchart_core::PriceRecord;

/// One header line plus one aligned line per record.
pub fn format_records(records: &[PriceRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}",
        "Date", "Open", "High", "Low", "Close", "Volume"
    );
    for r in records {
        let _ = writeln!(
            out,
            "{:<10}  {:>10.4}  {:>10.4}  {:>10.4}  {:>10.4}  {:>12}",
            r.date.format(DATE_FORMAT).to_string(),
            r.open,
            r.high,
            r.low,
            r.close,
            r.volume
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_header_and_rows() {
        let records = vec![PriceRecord {
            date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: 100,
        }];
        let text = format_records(&records);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[1].starts_with("2023-01-02"));
        assert!(lines[1].contains("1.5000"));
        assert!(lines[1].ends_with("100"));
    }

    #[test]
    fn empty_listing_is_header_only() {
        assert_eq!(format_records(&[]).lines().count(), 1);
    }
}
