//! Close-price chart widget.
//!
//! Plots one [`PriceChart`] as a line (braille) or as one bar per day, with
//! the first, middle and last dates on the x axis.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};
use stockchart_core::chart::{SERIES_LABEL, X_AXIS_TITLE, Y_AXIS_TITLE};
use stockchart_core::{ChartKind, PriceChart};

use crate::theme::Theme;

/// Shown under the chart while the window is open.
pub const CLOSE_HINT: &str = " q / Esc to close ";

pub struct PriceChartPanel<'a> {
    chart: &'a PriceChart,
    theme: &'a Theme,
}

impl<'a> PriceChartPanel<'a> {
    pub fn new(chart: &'a PriceChart, theme: &'a Theme) -> Self {
        Self { chart, theme }
    }

    /// Points in plot space: x is the day index, y the close.
    fn data(&self) -> Vec<(f64, f64)> {
        self.chart
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.close))
            .collect()
    }

    fn x_labels(&self) -> Vec<Span<'static>> {
        let labels = self.chart.date_labels();
        match labels.len() {
            0 => vec![],
            1 | 2 => labels.into_iter().map(Span::raw).collect(),
            n => vec![
                Span::raw(labels[0].clone()),
                Span::raw(labels[(n - 1) / 2].clone()),
                Span::raw(labels[n - 1].clone()),
            ],
        }
    }
}

impl Widget for PriceChartPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let data = self.data();
        let n = data.len();
        let (y_lower, y_upper) = self.chart.value_axis_bounds();
        let y_mid = (y_lower + y_upper) / 2.0;

        let graph_type = match self.chart.kind() {
            ChartKind::Line => GraphType::Line,
            ChartKind::Bar => GraphType::Bar,
        };
        let datasets = vec![Dataset::default()
            .name(SERIES_LABEL)
            .marker(symbols::Marker::Braille)
            .graph_type(graph_type)
            .style(Style::default().fg(self.theme.series))
            .data(&data)];

        // Half a day of slack either side so single points and edge bars are visible
        let x_bounds = [-0.5, n.saturating_sub(1) as f64 + 0.5];

        let title = format!(" {} ({}) ", self.chart.title(), self.chart.kind());
        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(Span::styled(
                        title,
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .title_bottom(Line::styled(
                        CLOSE_HINT,
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent))
                    .style(Style::default().bg(self.theme.background)),
            )
            .x_axis(
                Axis::default()
                    .title(Span::styled(
                        X_AXIS_TITLE,
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds(x_bounds)
                    .labels(self.x_labels()),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        Y_AXIS_TITLE,
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([y_lower, y_upper])
                    .labels(vec![
                        Span::raw(format!("{y_lower:.2}")),
                        Span::raw(format!("{y_mid:.2}")),
                        Span::raw(format!("{y_upper:.2}")),
                    ]),
            );

        chart.render(area, buf);
    }
}
