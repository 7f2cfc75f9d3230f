//! stockchart core — fetch, parse, filter and chart a daily price series.
//!
//! This crate holds the whole pipeline apart from the terminal window:
//! - Domain types (price records, series wrappers, date ranges, symbols)
//! - Alpha Vantage provider over a blocking HTTP transport
//! - Daily-series parser and inclusive date-range filter
//! - Renderer-neutral chart model and the HTML page renderer
//! - TOML/environment configuration

pub mod chart;
pub mod config;
pub mod data;
pub mod domain;

pub use chart::{
    ChartKind, ChartRenderer, HtmlChartRenderer, PriceChart, RenderArtifact, RenderError,
    RendererKind,
};
pub use config::{ConfigError, StockChartConfig};
pub use data::{DataError, DataProvider};
pub use domain::{DateRange, FilteredSeries, ParsedSeries, PriceRecord, Symbol};
