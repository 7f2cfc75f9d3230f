//! HTML page renderer.
//!
//! Emits a single self-contained page with an inline SVG chart in a dark
//! palette, writes it to disk and hands it to the default browser.

use std::path::PathBuf;

use tracing::{info, warn};

use super::browser::open_in_browser;
use super::{
    label_stride, ChartKind, ChartRenderer, PriceChart, RenderArtifact, RenderError, SERIES_LABEL,
    X_AXIS_TITLE, Y_AXIS_TITLE,
};

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 120.0;
const Y_TICKS: usize = 5;
const MAX_X_LABELS: usize = 20;

const BACKGROUND: &str = "#000000";
const PLOT_BACKGROUND: &str = "#111111";
const FOREGROUND: &str = "#999999";
const FOREGROUND_STRONG: &str = "#eeeeee";
const GRID: &str = "#333333";
const SERIES_COLOR: &str = "#ff5995";

/// Writes the chart page to `output_path` and optionally opens it.
#[derive(Debug, Clone)]
pub struct HtmlChartRenderer {
    output_path: PathBuf,
    open_browser: bool,
}

impl HtmlChartRenderer {
    pub fn new(output_path: impl Into<PathBuf>, open_browser: bool) -> Self {
        Self {
            output_path: output_path.into(),
            open_browser,
        }
    }
}

impl ChartRenderer for HtmlChartRenderer {
    fn name(&self) -> &str {
        "html"
    }

    fn render(&self, chart: &PriceChart) -> Result<RenderArtifact, RenderError> {
        let page = render_page(chart);
        std::fs::write(&self.output_path, page).map_err(|source| RenderError::Io {
            path: self.output_path.clone(),
            source,
        })?;
        info!(path = %self.output_path.display(), points = chart.points().len(), "chart written");

        let opened_in_browser = self.open_browser
            && match open_in_browser(&self.output_path) {
                Ok(()) => true,
                Err(e) => {
                    warn!(path = %self.output_path.display(), "could not launch browser: {e}");
                    false
                }
            };

        Ok(RenderArtifact::HtmlFile {
            path: self.output_path.clone(),
            opened_in_browser,
        })
    }
}

/// Full HTML document for a chart.
pub fn render_page(chart: &PriceChart) -> String {
    let title = escape(&chart.title());
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>body {{ margin: 0; background: {BACKGROUND}; }} svg {{ display: block; margin: 0 auto; max-width: 100%; height: auto; }}</style>\n\
         </head>\n<body>\n{}\n</body>\n</html>\n",
        render_svg(chart)
    )
}

/// Inline SVG for a chart.
pub fn render_svg(chart: &PriceChart) -> String {
    let points = chart.points();
    let n = points.len();
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let plot_bottom = MARGIN_TOP + plot_h;
    let (y_lower, y_upper) = chart.value_axis_bounds();
    let band = plot_w / n.max(1) as f64;

    let x_at = |i: usize| MARGIN_LEFT + (i as f64 + 0.5) * band;
    let y_at = |v: f64| {
        let span = y_upper - y_lower;
        let frac = if span.abs() > 1e-12 { (v - y_lower) / span } else { 0.5 };
        plot_bottom - frac * plot_h
    };

    let mut svg = String::with_capacity(4096 + n * 160);
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\">\n"
    ));
    svg.push_str(&format!(
        "<rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"{BACKGROUND}\"/>\n\
         <rect x=\"{MARGIN_LEFT}\" y=\"{MARGIN_TOP}\" width=\"{plot_w}\" height=\"{plot_h}\" fill=\"{PLOT_BACKGROUND}\"/>\n"
    ));

    // Title
    svg.push_str(&format!(
        "<text class=\"title\" x=\"{:.1}\" y=\"32\" text-anchor=\"middle\" font-size=\"20\" fill=\"{FOREGROUND_STRONG}\">{}</text>\n",
        WIDTH / 2.0,
        escape(&chart.title())
    ));

    // Value axis grid and labels
    for t in 0..Y_TICKS {
        let v = y_lower + (y_upper - y_lower) * t as f64 / (Y_TICKS - 1) as f64;
        let y = y_at(v);
        svg.push_str(&format!(
            "<line x1=\"{MARGIN_LEFT}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"{GRID}\"/>\n\
             <text class=\"y-label\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"12\" fill=\"{FOREGROUND}\">{v:.2}</text>\n",
            MARGIN_LEFT + plot_w,
            MARGIN_LEFT - 8.0,
            y + 4.0,
        ));
    }

    // Series
    match chart.kind() {
        ChartKind::Line => {
            let coords: Vec<String> = points
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{:.1},{:.1}", x_at(i), y_at(p.close)))
                .collect();
            svg.push_str(&format!(
                "<polyline class=\"series\" points=\"{}\" fill=\"none\" stroke=\"{SERIES_COLOR}\" stroke-width=\"2\"/>\n",
                coords.join(" ")
            ));
            for (i, p) in points.iter().enumerate() {
                svg.push_str(&format!(
                    "<circle class=\"point\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\" fill=\"{SERIES_COLOR}\"><title>{}: {:.2}</title></circle>\n",
                    x_at(i),
                    y_at(p.close),
                    p.date,
                    p.close
                ));
            }
        }
        ChartKind::Bar => {
            let bar_w = band * 0.8;
            let base = y_at(0f64.max(y_lower));
            for (i, p) in points.iter().enumerate() {
                let top = y_at(p.close);
                let (y, h) = if top <= base { (top, base - top) } else { (base, top - base) };
                svg.push_str(&format!(
                    "<rect class=\"bar\" x=\"{:.1}\" y=\"{y:.1}\" width=\"{bar_w:.1}\" height=\"{h:.1}\" fill=\"{SERIES_COLOR}\"><title>{}: {:.2}</title></rect>\n",
                    x_at(i) - bar_w / 2.0,
                    p.date,
                    p.close
                ));
            }
        }
    }

    // Date axis labels, rotated and thinned when crowded; the last date is always shown
    let stride = label_stride(n, MAX_X_LABELS);
    for (i, label) in chart.date_labels().iter().enumerate() {
        if i % stride != 0 && i + 1 != n {
            continue;
        }
        let x = x_at(i);
        let y = plot_bottom + 14.0;
        svg.push_str(&format!(
            "<text class=\"x-label\" x=\"{x:.1}\" y=\"{y:.1}\" transform=\"rotate(-45 {x:.1} {y:.1})\" text-anchor=\"end\" font-size=\"11\" fill=\"{FOREGROUND}\">{label}</text>\n"
        ));
    }

    // Axis titles
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"14\" fill=\"{FOREGROUND_STRONG}\">{X_AXIS_TITLE}</text>\n",
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 12.0
    ));
    svg.push_str(&format!(
        "<text x=\"20\" y=\"{:.1}\" transform=\"rotate(-90 20 {:.1})\" text-anchor=\"middle\" font-size=\"14\" fill=\"{FOREGROUND_STRONG}\">{Y_AXIS_TITLE}</text>\n",
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0
    ));

    // Legend
    let legend_x = WIDTH - MARGIN_RIGHT - 120.0;
    svg.push_str(&format!(
        "<rect x=\"{legend_x:.1}\" y=\"44\" width=\"12\" height=\"12\" fill=\"{SERIES_COLOR}\"/>\n\
         <text class=\"legend\" x=\"{:.1}\" y=\"54\" font-size=\"12\" fill=\"{FOREGROUND}\">{SERIES_LABEL}</text>\n",
        legend_x + 18.0
    ));

    svg.push_str("</svg>");
    svg
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter_by_range_on;
    use crate::domain::{DateRange, ParsedSeries, PriceRecord, Symbol};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn chart(kind: ChartKind, days: &[(NaiveDate, f64)]) -> PriceChart {
        let parsed = ParsedSeries::new(
            days.iter()
                .map(|&(date, close)| PriceRecord {
                    date,
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1,
                })
                .collect(),
        );
        let range = DateRange::new(d(2000, 1, 1), d(2100, 1, 1)).unwrap();
        let filtered = filter_by_range_on(&parsed, range, d(2100, 1, 1));
        PriceChart::from_series(&Symbol::parse("ibm").unwrap(), kind, &filtered).unwrap()
    }

    fn unordered(kind: ChartKind) -> PriceChart {
        chart(
            kind,
            &[(d(2023, 1, 3), 3.0), (d(2023, 1, 1), 1.0), (d(2023, 1, 2), 2.0)],
        )
    }

    #[test]
    fn page_is_labelled_with_symbol_and_axes() {
        let page = render_page(&unordered(ChartKind::Line));
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>IBM Stock Prices</title>"));
        assert!(page.contains(">Date</text>"));
        assert!(page.contains(">Close Price</text>"));
        assert!(page.contains("rotate(-45"));
    }

    #[test]
    fn x_labels_appear_in_chronological_order() {
        let svg = render_svg(&unordered(ChartKind::Line));
        let first = svg.find(">2023-01-01</text>").unwrap();
        let second = svg.find(">2023-01-02</text>").unwrap();
        let third = svg.find(">2023-01-03</text>").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn line_chart_has_one_marker_per_day() {
        let svg = render_svg(&unordered(ChartKind::Line));
        assert_eq!(svg.matches("class=\"point\"").count(), 3);
        assert_eq!(svg.matches("class=\"series\"").count(), 1);
        assert_eq!(svg.matches("class=\"bar\"").count(), 0);
    }

    #[test]
    fn bar_chart_has_one_bar_per_day() {
        let svg = render_svg(&unordered(ChartKind::Bar));
        assert_eq!(svg.matches("class=\"bar\"").count(), 3);
        assert_eq!(svg.matches("class=\"point\"").count(), 0);
    }

    #[test]
    fn crowded_axis_is_thinned() {
        let days: Vec<_> = (0..100)
            .map(|i| (d(2023, 1, 1) + chrono::Duration::days(i), 10.0 + i as f64))
            .collect();
        let svg = render_svg(&chart(ChartKind::Line, &days));
        assert_eq!(svg.matches("class=\"x-label\"").count(), 21);
        assert_eq!(svg.matches("class=\"point\"").count(), 100);
        assert!(svg.contains(">2023-01-01</text>"));
        assert!(svg.contains(">2023-04-10</text>"));
    }

    #[test]
    fn thinned_axis_ends_on_last_date() {
        let days: Vec<_> = (0..101)
            .map(|i| (d(2023, 1, 1) + chrono::Duration::days(i), 10.0))
            .collect();
        let svg = render_svg(&chart(ChartKind::Bar, &days));
        // stride 6 covers indices 0..=96, then the final index 100
        assert_eq!(svg.matches("class=\"x-label\"").count(), 18);
        assert!(svg.contains(">2023-04-11</text>"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("A&B<C>"), "A&amp;B&lt;C&gt;");
    }

    #[test]
    fn render_writes_file_without_browser() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock_chart.html");
        let renderer = HtmlChartRenderer::new(&path, false);
        let artifact = renderer.render(&unordered(ChartKind::Bar)).unwrap();
        assert_eq!(
            artifact,
            RenderArtifact::HtmlFile {
                path: path.clone(),
                opened_in_browser: false
            }
        );
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("IBM Stock Prices"));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.html");
        let err = HtmlChartRenderer::new(&path, false)
            .render(&unordered(ChartKind::Line))
            .unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
