//! Full-screen chart window.
//!
//! Takes over the terminal (raw mode + alternate screen), draws the chart
//! until the user closes it and puts the terminal back the way it was.

use std::io::{self, Stdout};
use std::sync::Once;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use stockchart_core::{ChartRenderer, PriceChart, RenderArtifact, RenderError};
use tracing::{debug, info};

use crate::panel::PriceChartPanel;
use crate::theme::Theme;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

static PANIC_HOOK: Once = Once::new();

/// Restore the terminal before the default panic message is printed.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stderr(), LeaveAlternateScreen);
            default_hook(info);
        }));
    });
}

/// Keys that dismiss the window.
pub fn is_close_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Leaves raw mode and the alternate screen when dropped, on every exit path.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Draws the chart inside the current terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalChartRenderer {
    theme: Theme,
}

impl TerminalChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn run(&self, chart: &PriceChart) -> io::Result<()> {
        install_panic_hook();
        let mut guard = TerminalGuard::enter()?;

        loop {
            guard
                .terminal
                .draw(|f| f.render_widget(PriceChartPanel::new(chart, &self.theme), f.area()))?;

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if is_close_key(&key) => break,
                    Event::Resize(w, h) => debug!(w, h, "terminal resized"),
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

impl ChartRenderer for TerminalChartRenderer {
    fn name(&self) -> &str {
        "terminal"
    }

    fn render(&self, chart: &PriceChart) -> Result<RenderArtifact, RenderError> {
        info!(points = chart.points().len(), kind = %chart.kind(), "opening chart window");
        self.run(chart)
            .map_err(|e| RenderError::Terminal(e.to_string()))?;
        Ok(RenderArtifact::TerminalWindow)
    }
}
