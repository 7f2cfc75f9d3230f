//! PriceRecord — one trading day of OHLCV data — and the two series wrappers
//! the pipeline passes between stages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV record for a single symbol on a single trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Records as parsed from the provider, in the provider's order.
///
/// The order is whatever the response mapping had; it is not guaranteed to
/// be chronological.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedSeries {
    records: Vec<PriceRecord>,
}

impl ParsedSeries {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Output of the range filter. Possibly empty.
///
/// Kept as its own type so an empty filter result can never be confused with
/// a series that was never filtered. Only the filter constructs one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredSeries {
    records: Vec<PriceRecord>,
}

impl FilteredSeries {
    pub(crate) fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records sorted ascending by date.
    pub fn sorted_by_date(&self) -> Vec<PriceRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by_key(|r| r.date);
        sorted
    }
}
