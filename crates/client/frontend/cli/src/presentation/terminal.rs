//! Terminal setup/teardown for the map UI.
//!
//! Mouse reporting is limited to button presses and the wheel. Motion events
//! are never requested, so pointer movement cannot queue up ahead of clicks.
use anyhow::Result;
use crossterm::{
    Command,
    event::DisableMouseCapture,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    fmt,
    io::{self, Stdout},
};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Press/release and wheel reporting (`?1000`) with SGR coordinates (`?1006`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnableClickCapture;

impl Command for EnableClickCapture {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[?1000h\x1b[?1006h")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        // The console API has no motion-free mode; filtering happens on read.
        crossterm::event::EnableMouseCapture.execute_winapi()
    }
}

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableClickCapture)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    tracing::debug!("terminal initialised with click capture");

    Ok(terminal)
}

/// Undo [`init`]. Safe to call more than once.
pub fn restore() -> Result<()> {
    // Clears every tracking mode, including the ones never enabled.
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Restores the terminal on drop, including on panic unwinding.
pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = restore() {
            tracing::warn!("terminal restore failed: {err}");
        }
    }
}
