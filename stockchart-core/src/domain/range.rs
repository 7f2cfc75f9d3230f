//! Inclusive calendar date window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::DataError;

/// Date format used for every user-entered and provider-supplied date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive `[start, end]` window. `start <= end` holds for every value,
/// deserialized ones included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DataError> {
        if end < start {
            return Err(DataError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds as `YYYY-MM-DD` and compare them as dates.
    pub fn parse(start: &str, end: &str) -> Result<Self, DataError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Pull `end` back to `today` when it lies in the future.
    ///
    /// If `today` is before `start` the window collapses to `[start, start]`
    /// so the ordering invariant survives; such a window simply matches no
    /// trading day that has happened yet.
    pub fn clamp_end(self, today: NaiveDate) -> ClampedRange {
        if self.end <= today {
            return ClampedRange {
                range: self,
                clamped: false,
            };
        }
        let end = today.max(self.start);
        ClampedRange {
            range: Self {
                start: self.start,
                end,
            },
            clamped: true,
        }
    }

}

#[derive(Deserialize)]
struct UncheckedRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<UncheckedRange> for DateRange {
    type Error = DataError;

    fn try_from(raw: UncheckedRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

/// A range after clamping, with a flag saying whether the end moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedRange {
    pub range: DateRange,
    pub clamped: bool,
}

/// Parse a single `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DataError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| DataError::InvalidDate {
        input: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn rejects_end_before_start() {
        let err = DateRange::new(d(2023, 2, 1), d(2023, 1, 31)).unwrap_err();
        assert!(matches!(err, DataError::InvalidDateRange { .. }));
    }

    #[test]
    fn single_day_range_is_valid() {
        let range = DateRange::parse("2023-01-01", "2023-01-01").unwrap();
        assert_eq!(range.start(), range.end());
    }

    #[test]
    fn compares_as_dates_not_strings() {
        // Unpadded input sorts lexically after "2023-10-01" but is the earlier date
        let range = DateRange::parse("2023-9-5", "2023-10-01").unwrap();
        assert_eq!(range.start(), d(2023, 9, 5));
    }

    #[test]
    fn rejects_garbage_dates() {
        let err = DateRange::parse("yesterday", "2023-01-01").unwrap_err();
        assert!(matches!(err, DataError::InvalidDate { ref input } if input == "yesterday"));
        assert!(parse_date("2023-02-30").is_err());
    }

    #[test]
    fn clamp_end_moves_future_end_to_today() {
        let today = d(2024, 6, 1);
        let clamped = DateRange::new(d(2024, 1, 1), d(2025, 1, 1))
            .unwrap()
            .clamp_end(today);
        assert!(clamped.clamped);
        assert_eq!(clamped.range.end(), today);
        assert_eq!(clamped.range.start(), d(2024, 1, 1));
    }

    #[test]
    fn clamp_end_leaves_past_end_alone() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 2, 1)).unwrap();
        let clamped = range.clamp_end(d(2024, 6, 1));
        assert!(!clamped.clamped);
        assert_eq!(clamped.range, range);
    }

    #[test]
    fn clamp_end_with_future_start_keeps_ordering() {
        let range = DateRange::new(d(2030, 1, 1), d(2030, 2, 1)).unwrap();
        let clamped = range.clamp_end(d(2024, 6, 1));
        assert!(clamped.clamped);
        assert!(clamped.range.start() <= clamped.range.end());
        assert_eq!(clamped.range.start(), clamped.range.end());
    }

    #[test]
    fn deserialize_checks_ordering() {
        let inverted = serde_json::from_str::<DateRange>(r#"{"start":"2024-01-02","end":"2024-01-01"}"#);
        assert!(inverted.is_err());

        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2024-01-01","end":"2024-01-02"}"#).unwrap();
        assert_eq!(ok, DateRange::new(d(2024, 1, 1), d(2024, 1, 2)).unwrap());
    }
}
