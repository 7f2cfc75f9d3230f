//! Date-range filter over a parsed series.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{DateRange, FilteredSeries, ParsedSeries};

/// Today's date on the local calendar.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Keep records with `start <= date <= min(end, today)`.
///
/// The clamp to today always happens here, even when the caller already
/// clamped at input time: the date may have rolled over since.
pub fn filter_by_range(series: &ParsedSeries, range: DateRange) -> FilteredSeries {
    filter_by_range_on(series, range, today())
}

/// [`filter_by_range`] with an explicit "today".
pub fn filter_by_range_on(
    series: &ParsedSeries,
    range: DateRange,
    today: NaiveDate,
) -> FilteredSeries {
    let start = range.start();
    let end = range.end().min(today);
    let records: Vec<_> = series
        .records()
        .iter()
        .filter(|r| start <= r.date && r.date <= end)
        .cloned()
        .collect();

    debug!(
        start = %start,
        end = %end,
        kept = records.len(),
        total = series.len(),
        "filtered series by date range"
    );
    FilteredSeries::new(records)
}
