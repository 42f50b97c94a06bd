//! Interactive terminal display
//!
//! Each call owns its own alternate-screen session; the terminal is restored
//! when the session drops, including on error.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use thiserror::Error;

use super::chart::OrderFlowChart;
use super::style::ChartStyle;
use crate::application::render::render_with_style;
use crate::domain::{RenderError, Snapshot, TradeSeries};

/// Input poll timeout between redraws
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, ViewerError>;

/// Raw-mode, alternate-screen terminal restored on drop
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn open() -> Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(e.into())
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Display the chart until `q` or `Esc` is pressed
pub fn show(chart: &OrderFlowChart) -> Result<()> {
    let mut session = TerminalSession::open()?;
    run(session.terminal_mut(), chart)
}

/// Render the book and display it; invalid input fails before the terminal is touched
pub fn show_book(
    book: &[Snapshot],
    trades: Option<&TradeSeries>,
    style: ChartStyle,
) -> Result<()> {
    let chart = render_with_style(book, trades, style)?;
    show(&chart)
}

fn run<B: Backend>(terminal: &mut Terminal<B>, chart: &OrderFlowChart) -> Result<()> {
    loop {
        terminal.draw(|frame| frame.render_widget(chart, frame.area()))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    break;
                }
            }
        }
    }

    Ok(())
}
