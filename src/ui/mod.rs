//! UI module for the LineageScope TUI
//!
//! This module provides the terminal explorer for toggling node, type and
//! relationship visibility and column filters over a loaded lineage.

mod app;
pub mod panes;

pub use app::{run_app, App, VirtualScrollState};
pub use panes::{Pane, Panes};

use std::io;

use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// Sets up the terminal, runs the explorer until quit, and restores the
/// terminal even if the loop fails.
pub fn run(app: &mut App) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let result = Terminal::new(CrosstermBackend::new(io::stdout())).and_then(|mut terminal| {
        terminal.clear()?;
        let result = run_app(&mut terminal, app);
        terminal.show_cursor()?;
        result
    });

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}
