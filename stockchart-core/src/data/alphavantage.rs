//! Alpha Vantage data provider.
//!
//! Issues one GET against the `/query` endpoint per fetch. No retries and no
//! backoff: a failed fetch goes straight back to the caller.

use tracing::{debug, info, warn};

use super::provider::{DataError, DataProvider, OutputSize, RawResponse, SeriesFunction};
use super::transport::{HttpTransport, ReqwestTransport};
use crate::config::ApiConfig;
use crate::domain::Symbol;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

/// Alpha Vantage provider.
pub struct AlphaVantageProvider {
    transport: Box<dyn HttpTransport>,
    base_url: String,
    api_key: String,
    output_size: OutputSize,
}

impl AlphaVantageProvider {
    pub fn new(
        transport: Box<dyn HttpTransport>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        output_size: OutputSize,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            api_key: api_key.into(),
            output_size,
        }
    }

    /// Build a provider with a reqwest transport from resolved configuration.
    pub fn from_config(api: &ApiConfig, api_key: impl Into<String>) -> Result<Self, DataError> {
        let transport = ReqwestTransport::new(api.timeout())?;
        Ok(Self::new(
            Box::new(transport),
            api.base_url.clone(),
            api_key,
            api.output_size,
        ))
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.base_url.trim_end_matches('/'))
    }

    /// Fetch one series and decode the body.
    ///
    /// A 2xx body is returned whatever it contains; whether it actually holds
    /// a series is decided by the parser.
    pub fn fetch(&self, symbol: &Symbol, function: SeriesFunction) -> Result<RawResponse, DataError> {
        info!(
            "Fetching data for {} from {}...",
            symbol,
            function.as_query_value()
        );

        let query = [
            ("function", function.as_query_value()),
            ("symbol", symbol.as_str()),
            ("apikey", self.api_key.as_str()),
            ("outputsize", self.output_size.as_query_value()),
        ];
        let resp = self.transport.get(&self.query_url(), &query)?;

        if !resp.is_success() {
            warn!(status = resp.status, "Error fetching data");
            return Err(DataError::Http {
                status: resp.status,
            });
        }

        debug!(body_len = resp.body.len(), "Response from API: {}", resp.body);

        serde_json::from_str(&resp.body).map_err(|e| {
            DataError::ResponseFormat(format!("failed to decode response for {symbol}: {e}"))
        })
    }
}

impl DataProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "alpha_vantage"
    }

    fn fetch_daily(&self, symbol: &Symbol) -> Result<RawResponse, DataError> {
        self.fetch(symbol, SeriesFunction::TimeSeriesDaily)
    }
}
