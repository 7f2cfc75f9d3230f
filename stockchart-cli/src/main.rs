//! stockchart — prompt for a ticker and date window, fetch the daily series
//! from Alpha Vantage and chart the close prices.
//!
//! Configuration comes from `stockchart.toml` (see `--config`), the API key
//! from `ALPHAVANTAGE_API_KEY` (environment or `.env`) or the file.

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use stockchart_core::config::{ChartConfig, StockChartConfig};
use stockchart_core::data::AlphaVantageProvider;
use stockchart_core::{ChartRenderer, HtmlChartRenderer, RendererKind};
use stockchart_tui::TerminalChartRenderer;
use tracing::{debug, info, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use session::{DialoguerPrompter, Session};

mod cli;
mod session;
mod table;

fn preprocess(trace_level: Level) -> Result<()> {
    dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(my_subscriber).context("failed to install tracing subscriber")
}

fn build_renderer(chart: &ChartConfig) -> Box<dyn ChartRenderer> {
    match chart.renderer {
        RendererKind::Html => Box::new(HtmlChartRenderer::new(
            chart.output_path.clone(),
            chart.open_browser,
        )),
        RendererKind::Terminal => Box::new(TerminalChartRenderer::new()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    preprocess(cli.trace.into())?;
    trace!("Command line input recorded: {cli:#?}");

    let mut config = StockChartConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    debug!(output_size = ?config.api.output_size, renderer = %config.chart.renderer, "configuration resolved");

    let api_key = config.resolve_api_key()?;
    let provider = AlphaVantageProvider::from_config(&config.api, api_key)
        .context("failed to build HTTP client")?;
    let renderer = build_renderer(&config.chart);
    info!(renderer = renderer.name(), "starting session");

    let mut session = Session::new(DialoguerPrompter::new(), &provider, renderer.as_ref())
        .with_record_listing(cli.print_records);
    session.run()?;
    Ok(())
}
