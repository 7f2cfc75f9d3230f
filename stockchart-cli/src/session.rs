//! Interactive session: prompt, fetch, chart, repeat until a chart is shown.
//!
//! ```text
//! AwaitInput -> Fetching -> NoData -> AwaitInput
//!                        -> Success (terminal)
//! ```
//!
//! Recoverable data errors (bad HTTP status, network failure, unknown ticker,
//! empty window) print a message and go back to `AwaitInput`. Everything else
//! aborts the session.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use dialoguer::console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use stockchart_core::data::{load_series_on, today, DataError};
use stockchart_core::{
    ChartKind, ChartRenderer, DataProvider, DateRange, FilteredSeries, PriceChart,
    RenderArtifact, Symbol,
};
use tracing::{debug, info, warn};

use crate::table::format_records;

pub const SYMBOL_PROMPT: &str = "Enter the stock symbol (e.g., IBM)";
pub const START_PROMPT: &str = "Enter the start date (YYYY-MM-DD)";
pub const END_PROMPT: &str = "Enter the end date (YYYY-MM-DD)";
pub const CHART_PROMPT: &str = "Enter chart type (line/bar)";

pub const INVALID_RANGE_MSG: &str =
    "Invalid date range. End date cannot be before start date. Please enter the dates again.";
pub const NO_DATA_MSG: &str = "No data found for the specified date range.";
pub const RETRY_TICKER_MSG: &str = "Please re-enter the details with a valid stock ticker.";
pub const FETCHED_MSG: &str = "Data fetched successfully!";
pub const OPENED_MSG: &str = "Chart generated and opened in the browser.";

/// Line-oriented user I/O.
pub trait Prompter {
    /// Ask for one line of input.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Show a line to the user.
    fn say(&mut self, line: &str);
}

/// Terminal prompts via dialoguer.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        // dialoguer draws on stderr and refuses to run when it is not a terminal
        if !Term::stderr().is_term() {
            return LinePrompter::new(io::stdin().lock(), io::stdout()).ask(prompt);
        }
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("failed to read input for '{prompt}'"))?;
        Ok(answer)
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Plain line reader for piped or redirected input.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}: ")
            .and_then(|()| self.output.flush())
            .context("failed to write prompt")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .with_context(|| format!("failed to read input for '{prompt}'"))?;
        if read == 0 {
            bail!("input closed at '{prompt}'");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, line: &str) {
        let _ = writeln!(self.output, "{line}");
    }
}

/// What the user asked for in one pass through the prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub symbol: Symbol,
    pub range: DateRange,
    pub kind: ChartKind,
}

#[derive(Debug)]
pub enum SessionState {
    AwaitInput,
    Fetching(ChartRequest),
    NoData,
    Success(RenderArtifact),
}

pub struct Session<'a, P: Prompter> {
    prompter: P,
    provider: &'a dyn DataProvider,
    renderer: &'a dyn ChartRenderer,
    clock: fn() -> NaiveDate,
    print_records: bool,
    state: SessionState,
}

impl<'a, P: Prompter> Session<'a, P> {
    pub fn new(prompter: P, provider: &'a dyn DataProvider, renderer: &'a dyn ChartRenderer) -> Self {
        Self {
            prompter,
            provider,
            renderer,
            clock: today,
            print_records: false,
            state: SessionState::AwaitInput,
        }
    }

    /// Replace the source of "today" used for clamping and filtering.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// Print the filtered records as a table before charting.
    pub fn with_record_listing(mut self, enabled: bool) -> Self {
        self.print_records = enabled;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Drive the session until a chart has been rendered.
    pub fn run(&mut self) -> Result<RenderArtifact> {
        loop {
            if let SessionState::Success(artifact) = &self.state {
                return Ok(artifact.clone());
            }
            self.step()?;
        }
    }

    /// Advance by one transition.
    pub fn step(&mut self) -> Result<()> {
        let current = std::mem::replace(&mut self.state, SessionState::AwaitInput);
        self.state = match current {
            SessionState::AwaitInput => SessionState::Fetching(self.gather()?),
            SessionState::Fetching(request) => self.fetch_and_render(request)?,
            SessionState::NoData => SessionState::AwaitInput,
            done @ SessionState::Success(_) => done,
        };
        debug!(state = ?self.state, "session transition");
        Ok(())
    }

    fn gather(&mut self) -> Result<ChartRequest> {
        let symbol = self.read_symbol()?;
        let range = self.read_range()?;

        let today = (self.clock)();
        let clamped = range.clamp_end(today);
        if clamped.clamped {
            self.prompter.say(&format!(
                "End date can't be after today's date: {today}. Adjusting to {today}."
            ));
        }

        let kind = self.read_chart_kind()?;
        Ok(ChartRequest {
            symbol,
            range: clamped.range,
            kind,
        })
    }

    fn read_symbol(&mut self) -> Result<Symbol> {
        loop {
            let input = self.prompter.ask(SYMBOL_PROMPT)?;
            match Symbol::parse(&input) {
                Ok(symbol) => return Ok(symbol),
                Err(e) => self.prompter.say(&e.to_string()),
            }
        }
    }

    fn read_range(&mut self) -> Result<DateRange> {
        loop {
            let start = self.prompter.ask(START_PROMPT)?;
            let end = self.prompter.ask(END_PROMPT)?;
            match DateRange::parse(&start, &end) {
                Ok(range) => return Ok(range),
                Err(DataError::InvalidDateRange { .. }) => self.prompter.say(INVALID_RANGE_MSG),
                Err(e) => self
                    .prompter
                    .say(&format!("{e}. Please enter the dates again.")),
            }
        }
    }

    fn read_chart_kind(&mut self) -> Result<ChartKind> {
        loop {
            let input = self.prompter.ask(CHART_PROMPT)?;
            match input.parse::<ChartKind>() {
                Ok(kind) => return Ok(kind),
                Err(msg) => self.prompter.say(&msg),
            }
        }
    }

    fn fetch_and_render(&mut self, request: ChartRequest) -> Result<SessionState> {
        let today = (self.clock)();
        let filtered = match load_series_on(self.provider, &request.symbol, request.range, today) {
            Ok(filtered) => filtered,
            Err(e) if e.is_recoverable() => {
                warn!(symbol = %request.symbol, provider = self.provider.name(), "fetch failed: {e}");
                self.report_fetch_failure(&e);
                return Ok(SessionState::NoData);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("could not load data for {}", request.symbol))
            }
        };
        self.prompter.say(FETCHED_MSG);
        info!(symbol = %request.symbol, records = filtered.len(), "series filtered");

        if self.print_records {
            self.list_records(&filtered);
        }

        let Some(chart) = PriceChart::from_series(&request.symbol, request.kind, &filtered) else {
            self.prompter.say(NO_DATA_MSG);
            return Ok(SessionState::NoData);
        };

        let artifact = self
            .renderer
            .render(&chart)
            .with_context(|| format!("{} renderer failed", self.renderer.name()))?;
        self.prompter.say(&completion_message(&artifact));
        Ok(SessionState::Success(artifact))
    }

    fn report_fetch_failure(&mut self, err: &DataError) {
        match err {
            DataError::Http { status } => {
                self.prompter.say(&format!("Error fetching data: {status}"))
            }
            DataError::NoData { .. } => self.prompter.say("No daily data found in response."),
            other => self.prompter.say(&other.to_string()),
        }
        self.prompter.say(RETRY_TICKER_MSG);
    }

    fn list_records(&mut self, series: &FilteredSeries) {
        for line in format_records(&series.sorted_by_date()).lines() {
            self.prompter.say(line);
        }
    }
}

/// Final user-facing line for a rendered chart.
pub fn completion_message(artifact: &RenderArtifact) -> String {
    match artifact {
        RenderArtifact::HtmlFile {
            opened_in_browser: true,
            ..
        } => OPENED_MSG.to_string(),
        RenderArtifact::HtmlFile { path, .. } => {
            format!("Chart generated and saved to {}.", path.display())
        }
        RenderArtifact::TerminalWindow => "Chart window closed.".to_string(),
    }
}
