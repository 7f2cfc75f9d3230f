//! Dark palette for the terminal chart window.
//!
//! Mirrors the HTML page: black surface, grey axes, pink series.

use ratatui::style::Color;

/// Colour tokens used by [`crate::panel::PriceChartPanel`].
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Window background
    pub background: Color,
    /// Plotted close-price series
    pub series: Color,
    /// Border and title
    pub accent: Color,
    /// Axis lines and tick labels
    pub muted: Color,
    /// Axis titles and the footer hint
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(0, 0, 0),
            series: Color::Rgb(255, 89, 149),
            accent: Color::Rgb(238, 238, 238),
            muted: Color::Rgb(153, 153, 153),
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }
}
