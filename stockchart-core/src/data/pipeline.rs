//! Fetch → parse → filter for a single symbol.

use chrono::NaiveDate;

use super::filter::{filter_by_range_on, today};
use super::parse::parse;
use super::provider::{DataError, DataProvider};
use crate::domain::{DateRange, FilteredSeries, Symbol};

/// Run the data stages for one symbol, filtering against the real "today".
pub fn load_series(
    provider: &dyn DataProvider,
    symbol: &Symbol,
    range: DateRange,
) -> Result<FilteredSeries, DataError> {
    load_series_on(provider, symbol, range, today())
}

/// [`load_series`] with an explicit "today".
///
/// Halts at the first failing stage; nothing after a failed fetch runs.
pub fn load_series_on(
    provider: &dyn DataProvider,
    symbol: &Symbol,
    range: DateRange,
    today: NaiveDate,
) -> Result<FilteredSeries, DataError> {
    let raw = provider.fetch_daily(symbol)?;
    let parsed = parse(&raw, provider.series_function())?;
    Ok(filter_by_range_on(&parsed, range, today))
}
