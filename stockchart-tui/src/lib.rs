//! Terminal chart window for stockchart.
//!
//! Plugs into the core pipeline as a [`stockchart_core::ChartRenderer`]:
//! - [`PriceChartPanel`] draws one close-price chart with ratatui
//! - [`TerminalChartRenderer`] owns the crossterm session around it

pub mod panel;
pub mod theme;
pub mod window;

pub use panel::PriceChartPanel;
pub use theme::Theme;
pub use window::TerminalChartRenderer;
