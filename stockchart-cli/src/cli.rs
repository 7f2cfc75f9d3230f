use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use stockchart_core::config::StockChartConfig;
use stockchart_core::data::OutputSize;
use stockchart_core::RendererKind;
use tracing::Level;

/// Fetch a daily price series and chart its close prices.
#[derive(Parser, Debug)]
#[command(name = "stockchart", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./stockchart.toml, then the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sets the level of tracing
    #[arg(long, value_enum, default_value = "warn")]
    pub trace: TraceLevel,

    /// Chart backend: html or terminal
    #[arg(long)]
    pub renderer: Option<RendererKind>,

    /// How much history to request: compact or full
    #[arg(long)]
    pub output_size: Option<OutputSize>,

    /// Where the HTML chart is written
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write the HTML chart without launching a browser
    #[arg(long, default_value_t = false)]
    pub no_browser: bool,

    /// List the filtered records before charting
    #[arg(long, default_value_t = false)]
    pub print_records: bool,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<TraceLevel> for Level {
    fn from(level: TraceLevel) -> Self {
        match level {
            TraceLevel::Debug => Level::DEBUG,
            TraceLevel::Info => Level::INFO,
            TraceLevel::Warn => Level::WARN,
            TraceLevel::Error => Level::ERROR,
        }
    }
}

impl Cli {
    /// Flags given on the command line win over the config file.
    pub fn apply_overrides(&self, config: &mut StockChartConfig) {
        if let Some(renderer) = self.renderer {
            config.chart.renderer = renderer;
        }
        if let Some(size) = self.output_size {
            config.api.output_size = size;
        }
        if let Some(path) = &self.output {
            config.chart.output_path = path.clone();
        }
        if self.no_browser {
            config.chart.open_browser = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["stockchart"]).unwrap();
        assert_eq!(cli.trace, TraceLevel::Warn);
        assert!(cli.renderer.is_none());
        assert!(!cli.print_records);

        let mut config = StockChartConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, StockChartConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "stockchart",
            "--renderer",
            "terminal",
            "--output-size",
            "full",
            "--output",
            "ibm.html",
            "--no-browser",
            "--trace",
            "debug",
        ])
        .unwrap();
        assert_eq!(Level::from(cli.trace), Level::DEBUG);

        let mut config = StockChartConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.chart.renderer, RendererKind::Terminal);
        assert_eq!(config.api.output_size, OutputSize::Full);
        assert_eq!(config.chart.output_path, PathBuf::from("ibm.html"));
        assert!(!config.chart.open_browser);
    }

    #[test]
    fn unknown_renderer_is_rejected() {
        assert!(Cli::try_parse_from(["stockchart", "--renderer", "pdf"]).is_err());
    }
}
