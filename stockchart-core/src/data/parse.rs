//! Daily series parsing: raw provider JSON into typed price records.
//!
//! The per-day field names ("1. open" .. "5. volume") and the string-encoded
//! numbers are fixed by the provider's wire format.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::debug;

use super::provider::{DataError, RawResponse, SeriesFunction};
use crate::domain::{PriceRecord, ParsedSeries, DATE_FORMAT};

const OPEN: &str = "1. open";
const HIGH: &str = "2. high";
const LOW: &str = "3. low";
const CLOSE: &str = "4. close";
const VOLUME: &str = "5. volume";

/// Top-level keys the provider uses for diagnostics in place of a series.
const NOTICE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Parse a daily-series response.
///
/// Fails with `NoData` when the series key is missing and with
/// `MalformedRecord` when any field of any day does not parse. No partial
/// series is ever returned.
pub fn parse(raw: &RawResponse, function: SeriesFunction) -> Result<ParsedSeries, DataError> {
    let key = function.series_key();
    let series = match raw.get(key) {
        Some(Value::Object(series)) => series,
        Some(other) => {
            return Err(DataError::ResponseFormat(format!(
                "'{key}' is not an object: {other}"
            )))
        }
        None => return Err(no_data(raw)),
    };

    let mut records = Vec::with_capacity(series.len());
    for (date, fields) in series {
        records.push(parse_record(date, fields)?);
    }

    debug!(records = records.len(), "parsed daily series");
    Ok(ParsedSeries::new(records))
}

/// Build the NoData error, carrying any provider notice along.
fn no_data(raw: &RawResponse) -> DataError {
    let notice = NOTICE_KEYS
        .iter()
        .find_map(|k| raw.get(*k).and_then(Value::as_str));
    let detail = match notice {
        Some(msg) => format!("no daily data found in response (provider said: {msg})"),
        None => "no daily data found in response".to_string(),
    };
    DataError::NoData { detail }
}

fn parse_record(date: &str, fields: &Value) -> Result<PriceRecord, DataError> {
    let date_value = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        DataError::MalformedRecord {
            date: date.to_string(),
            field: "date",
            value: format!("\"{date}\""),
        }
    })?;

    let fields = fields.as_object().ok_or_else(|| DataError::MalformedRecord {
        date: date.to_string(),
        field: "record",
        value: fields.to_string(),
    })?;

    Ok(PriceRecord {
        date: date_value,
        open: price(date, fields, OPEN)?,
        high: price(date, fields, HIGH)?,
        low: price(date, fields, LOW)?,
        close: price(date, fields, CLOSE)?,
        volume: field(date, fields, VOLUME)?,
    })
}

/// A price must be a finite number; "NaN" and "inf" parse as f64 but are not prices.
fn price(date: &str, fields: &Map<String, Value>, name: &'static str) -> Result<f64, DataError> {
    let value: f64 = field(date, fields, name)?;
    if !value.is_finite() {
        return Err(DataError::MalformedRecord {
            date: date.to_string(),
            field: name,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn field<T: std::str::FromStr>(
    date: &str,
    fields: &Map<String, Value>,
    name: &'static str,
) -> Result<T, DataError> {
    let malformed = |value: String| DataError::MalformedRecord {
        date: date.to_string(),
        field: name,
        value,
    };
    let value = fields
        .get(name)
        .ok_or_else(|| malformed("<missing>".to_string()))?;
    let text = value.as_str().ok_or_else(|| malformed(value.to_string()))?;
    text.trim().parse::<T>().map_err(|_| malformed(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn daily(body: Value) -> Result<ParsedSeries, DataError> {
        parse(&body, SeriesFunction::TimeSeriesDaily)
    }

    #[test]
    fn parses_single_day() {
        let raw = json!({
            "Time Series (Daily)": {
                "2023-01-02": {
                    "1. open": "1", "2. high": "2", "3. low": "0.5",
                    "4. close": "1.5", "5. volume": "100"
                }
            }
        });
        let series = daily(raw).unwrap();
        assert_eq!(
            series.records(),
            &[PriceRecord {
                date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
                open: 1.0,
                high: 2.0,
                low: 0.5,
                close: 1.5,
                volume: 100,
            }]
        );
    }

    #[test]
    fn keeps_provider_order() {
        let raw = json!({
            "Meta Data": {"2. Symbol": "IBM"},
            "Time Series (Daily)": {
                "2023-01-04": {"1. open": "3", "2. high": "3", "3. low": "3", "4. close": "3", "5. volume": "3"},
                "2023-01-02": {"1. open": "1", "2. high": "1", "3. low": "1", "4. close": "1", "5. volume": "1"},
                "2023-01-03": {"1. open": "2", "2. high": "2", "3. low": "2", "4. close": "2", "5. volume": "2"}
            }
        });
        let series = daily(raw).unwrap();
        let days: Vec<u32> = series
            .records()
            .iter()
            .map(|r| chrono::Datelike::day(&r.date))
            .collect();
        assert_eq!(days, vec![4, 2, 3]);
    }

    #[test]
    fn missing_series_key_is_no_data() {
        let err = daily(json!({"Meta Data": {}})).unwrap_err();
        assert!(matches!(err, DataError::NoData { .. }));
    }

    #[test]
    fn provider_notice_is_carried_in_no_data() {
        let err = daily(json!({
            "Error Message": "Invalid API call. Please retry or visit the documentation."
        }))
        .unwrap_err();
        match err {
            DataError::NoData { detail } => assert!(detail.contains("Invalid API call")),
            other => panic!("expected NoData, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_field_is_fatal_not_dropped() {
        let raw = json!({
            "Time Series (Daily)": {
                "2023-01-02": {"1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5", "5. volume": "100"},
                "2023-01-03": {"1. open": "n/a", "2. high": "2", "3. low": "0.5", "4. close": "1.5", "5. volume": "100"}
            }
        });
        let err = daily(raw).unwrap_err();
        match err {
            DataError::MalformedRecord { date, field, .. } => {
                assert_eq!(date, "2023-01-03");
                assert_eq!(field, "1. open");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn fractional_volume_is_rejected() {
        let raw = json!({
            "Time Series (Daily)": {
                "2023-01-02": {"1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5", "5. volume": "100.5"}
            }
        });
        assert!(matches!(
            daily(raw),
            Err(DataError::MalformedRecord { field: "5. volume", .. })
        ));
    }

    #[test]
    fn missing_field_and_bad_date_are_malformed() {
        let missing = json!({
            "Time Series (Daily)": {
                "2023-01-02": {"1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5"}
            }
        });
        assert!(matches!(
            daily(missing),
            Err(DataError::MalformedRecord { field: "5. volume", .. })
        ));

        let bad_date = json!({
            "Time Series (Daily)": {
                "01/02/2023": {"1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5", "5. volume": "1"}
            }
        });
        assert!(matches!(
            daily(bad_date),
            Err(DataError::MalformedRecord { field: "date", .. })
        ));
    }

    #[test]
    fn empty_series_object_parses_to_empty() {
        let series = daily(json!({"Time Series (Daily)": {}})).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn non_finite_prices_are_malformed() {
        for bad in ["NaN", "inf", "-infinity"] {
            let raw = json!({
                "Time Series (Daily)": {
                    "2023-01-02": {"1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": bad, "5. volume": "100"}
                }
            });
            assert!(
                matches!(
                    daily(raw),
                    Err(DataError::MalformedRecord { field: "4. close", .. })
                ),
                "{bad} accepted as a close"
            );
        }
    }
}
