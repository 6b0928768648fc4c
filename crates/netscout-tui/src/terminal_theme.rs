//! Pushes the active theme to the host terminal's default colours.
//!
//! Uses OSC 10 / OSC 11 to set the default foreground and background and
//! OSC 110 / OSC 111 to restore them on exit. Terminals that do not
//! understand the sequences ignore them.

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use netscout_core::{Theme, ThemeSink};
use ratatui::style::Color;
use tracing::{debug, warn};

use crate::theme::Palette;

const RESET_SEQUENCE: &str = "\x1b]110\x07\x1b]111\x07";

/// [`ThemeSink`] that writes terminal colour escape sequences.
pub struct TerminalThemeSink<W: Write + Send = Stdout> {
    out: Mutex<W>,
}

impl TerminalThemeSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalThemeSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> ThemeSink for TerminalThemeSink<W> {
    fn apply(&self, theme: Theme) {
        let Some(sequence) = theme_sequence(Palette::for_theme(theme)) else {
            return;
        };
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match out
            .write_all(sequence.as_bytes())
            .and_then(|()| out.flush())
        {
            Ok(()) => debug!(%theme, "terminal colours updated"),
            Err(e) => warn!(error = %e, "failed to write terminal colours"),
        }
    }
}

/// Restore the terminal's own default foreground and background.
pub fn reset_default_colors(out: &mut impl Write) {
    let _ = out.write_all(RESET_SEQUENCE.as_bytes());
    let _ = out.flush();
}

fn theme_sequence(palette: &Palette) -> Option<String> {
    let fg = xparse_color(palette.text)?;
    let bg = xparse_color(palette.background)?;
    Some(format!("\x1b]10;{fg}\x07\x1b]11;{bg}\x07"))
}

/// `rgb:rr/gg/bb` form accepted by OSC colour requests.
fn xparse_color(color: Color) -> Option<String> {
    match color {
        Color::Rgb(r, g, b) => Some(format!("rgb:{r:02x}/{g:02x}/{b:02x}")),
        _ => None,
    }
}
