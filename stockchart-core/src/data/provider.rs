//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over the price source so the session can
//! run against Alpha Vantage in production and a canned provider in tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Symbol;

/// Decoded provider response body, keys in the order the provider sent them.
pub type RawResponse = serde_json::Value;

/// Structured error types for data operations.
///
/// These are designed to be displayable directly to the user at the prompt.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("error fetching data: HTTP status {status}")]
    Http { status: u16 },

    #[error("no data: {detail}")]
    NoData { detail: String },

    #[error("invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("invalid symbol '{input}': {reason}")]
    InvalidSymbol { input: String, reason: &'static str },

    #[error("network unreachable: {0}")]
    Network(String),

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("malformed record for {date}: field '{field}' has value {value}")]
    MalformedRecord {
        date: String,
        field: &'static str,
        value: String,
    },
}

impl DataError {
    /// Whether the interactive session should report the error and re-prompt
    /// rather than abort.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http { .. }
            | Self::NoData { .. }
            | Self::InvalidDateRange { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidSymbol { .. }
            | Self::Network(_) => true,
            Self::ResponseFormat(_) | Self::MalformedRecord { .. } => false,
        }
    }
}

/// Provider-defined series function.
///
/// Only the daily series is used; the enum keeps the wire value in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeriesFunction {
    #[default]
    #[serde(rename = "TIME_SERIES_DAILY")]
    TimeSeriesDaily,
}

impl SeriesFunction {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Self::TimeSeriesDaily => "TIME_SERIES_DAILY",
        }
    }

    /// Top-level response key holding the series mapping.
    pub fn series_key(&self) -> &'static str {
        match self {
            Self::TimeSeriesDaily => "Time Series (Daily)",
        }
    }
}

/// `outputsize` query parameter: `compact` returns roughly the last 100
/// trading days, `full` the whole history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSize {
    #[default]
    Compact,
    Full,
}

impl OutputSize {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Full => "full",
        }
    }
}

impl std::str::FromStr for OutputSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown output size '{other}' (expected compact or full)")),
        }
    }
}

/// Trait for daily price providers.
///
/// Implementations return the raw provider body; recognising a body without
/// a series (unknown ticker, throttling notice) is the parser's job.
pub trait DataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the raw daily series response for a symbol.
    fn fetch_daily(&self, symbol: &Symbol) -> Result<RawResponse, DataError>;

    /// Series function this provider requests, used by the parser.
    fn series_function(&self) -> SeriesFunction {
        SeriesFunction::TimeSeriesDaily
    }
}
