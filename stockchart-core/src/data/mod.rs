//! Data acquisition: provider, transport, parsing and range filtering

pub mod alphavantage;
pub mod filter;
pub mod parse;
pub mod pipeline;
pub mod provider;
pub mod transport;

pub use alphavantage::{AlphaVantageProvider, DEFAULT_BASE_URL};
pub use filter::{filter_by_range, filter_by_range_on, today};
pub use parse::parse;
pub use pipeline::{load_series, load_series_on};
pub use provider::{DataError, DataProvider, OutputSize, RawResponse, SeriesFunction};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
