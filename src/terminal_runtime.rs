//! Terminal ownership for the game front-end.
//!
//! [`GameScreen`] pairs a ratatui terminal with the last snapshot it painted,
//! so the event loop can offer every frame and only real changes reach the
//! terminal. On a real TTY it also holds raw mode and the alternate screen.

use std::io::{self, Stdout};
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Size;

use crate::config::Palette;
use crate::game::Snapshot;
use crate::renderer;

/// Raw mode and alternate screen, released on drop.
struct TtyMode;

impl TtyMode {
    fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(error) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }
        Ok(Self)
    }
}

impl Drop for TtyMode {
    fn drop(&mut self) {
        let _ = leave_tty_mode();
    }
}

/// Paints snapshots, skipping frames that would look the same.
pub struct GameScreen<B: Backend> {
    terminal: Terminal<B>,
    palette: Palette,
    last_frame: Option<(Snapshot, Size)>,
    // Declared last so the terminal is dropped before the TTY is released.
    _tty: Option<TtyMode>,
}

impl GameScreen<CrosstermBackend<Stdout>> {
    /// Takes over stdout: raw mode, alternate screen, hidden cursor.
    pub fn enter(palette: Palette) -> io::Result<Self> {
        let tty = TtyMode::acquire()?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            palette,
            last_frame: None,
            _tty: Some(tty),
        })
    }
}

impl<B: Backend> GameScreen<B> {
    /// Wraps any backend without touching the controlling terminal.
    pub fn with_backend(backend: B, palette: Palette) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            palette,
            last_frame: None,
            _tty: None,
        })
    }

    /// Draws `snapshot` unless it is already on screen at the current size.
    ///
    /// Returns whether a frame was drawn.
    pub fn present(&mut self, snapshot: &Snapshot) -> io::Result<bool> {
        let size = self.terminal.size()?;
        if self
            .last_frame
            .as_ref()
            .is_some_and(|(drawn, drawn_size)| drawn == snapshot && *drawn_size == size)
        {
            return Ok(false);
        }

        let palette = self.palette;
        self.terminal
            .draw(|frame| renderer::render(frame, snapshot, &palette))?;
        self.last_frame = Some((snapshot.clone(), size));
        Ok(true)
    }
}

/// Leaves the alternate screen before the default panic message is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = leave_tty_mode();
        default_hook(panic_info);
    }));
}

fn leave_tty_mode() -> io::Result<()> {
    let _ = disable_raw_mode();
    execute!(io::stdout(), Show, LeaveAlternateScreen)
}
