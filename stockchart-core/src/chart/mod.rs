//! Chart model and the renderer seam.
//!
//! [`PriceChart`] is the renderer-neutral view of a filtered series: sorted by
//! date, reduced to date/close pairs, labelled with the symbol. Backends
//! implement [`ChartRenderer`]; the HTML page renderer lives here and the
//! terminal window lives in `stockchart-tui`.

pub mod browser;
pub mod html;

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{FilteredSeries, Symbol, DATE_FORMAT};

pub use html::HtmlChartRenderer;

/// Legend entry for the plotted series.
pub const SERIES_LABEL: &str = "Close Price";
pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Close Price";

/// Visual encoding of the close-price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Connected line with a marker per day.
    Line,
    /// One discrete bar per day.
    Bar,
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            other => Err(format!("unknown chart type '{other}' (expected line or bar)")),
        }
    }
}

impl Display for ChartKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Line => "line",
            Self::Bar => "bar",
        })
    }
}

/// Which delivery mechanism draws the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Self-contained HTML page opened in the default browser.
    #[default]
    Html,
    /// Interactive chart window inside the terminal.
    Terminal,
}

impl FromStr for RendererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "terminal" | "tui" => Ok(Self::Terminal),
            other => Err(format!("unknown renderer '{other}' (expected html or terminal)")),
        }
    }
}

impl Display for RendererKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Html => "html",
            Self::Terminal => "terminal",
        })
    }
}

/// One plotted day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Sorted date/close series ready for any backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChart {
    symbol: Symbol,
    kind: ChartKind,
    points: Vec<ChartPoint>,
}

impl PriceChart {
    /// Build a chart from a filtered series.
    ///
    /// Returns `None` for an empty series; the caller reports "no data"
    /// instead of rendering. Points are sorted ascending by date whatever the
    /// input order.
    pub fn from_series(symbol: &Symbol, kind: ChartKind, series: &FilteredSeries) -> Option<Self> {
        if series.is_empty() {
            return None;
        }
        let points = series
            .sorted_by_date()
            .into_iter()
            .map(|r| ChartPoint {
                date: r.date,
                close: r.close,
            })
            .collect();
        Some(Self {
            symbol: symbol.clone(),
            kind,
            points,
        })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn title(&self) -> String {
        format!("{} Stock Prices", self.symbol)
    }

    /// X-axis labels in plotting order.
    pub fn date_labels(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|p| p.date.format(DATE_FORMAT).to_string())
            .collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Smallest and largest close.
    pub fn close_bounds(&self) -> (f64, f64) {
        self.points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.close), hi.max(p.close))
        })
    }

    /// Value-axis bounds with 5% padding. Bar charts keep zero in view.
    pub fn value_axis_bounds(&self) -> (f64, f64) {
        let (lo, hi) = self.close_bounds();
        let range = hi - lo;
        let pad = if range > 0.0 { range * 0.05 } else { lo.abs().max(1.0) * 0.05 };
        match self.kind {
            ChartKind::Line => (lo - pad, hi + pad),
            ChartKind::Bar => (0f64.min(lo - pad), hi + pad),
        }
    }
}

/// Every `stride`-th x label is drawn so at most `max_labels` appear.
pub fn label_stride(count: usize, max_labels: usize) -> usize {
    if max_labels == 0 {
        return count.max(1);
    }
    count.div_ceil(max_labels).max(1)
}

/// What a renderer produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderArtifact {
    /// HTML page on disk, and whether a browser was launched on it.
    HtmlFile {
        path: PathBuf,
        opened_in_browser: bool,
    },
    /// The chart was shown in the terminal and the window has been closed.
    TerminalWindow,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write chart to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(String),
}

/// A chart delivery mechanism.
pub trait ChartRenderer {
    /// Human-readable name of this backend.
    fn name(&self) -> &str;

    /// Draw the chart. Only I/O failures are errors.
    fn render(&self, chart: &PriceChart) -> Result<RenderArtifact, RenderError>;
}
