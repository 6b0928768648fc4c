//! Presence indicator: `●` with the palette colour for the state.

use netscout_core::Presence;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::theme::Palette;

/// Styled dot plus label, e.g. `● Online`.
pub fn presence_line(presence: Presence, palette: &Palette) -> Line<'static> {
    let color = match presence {
        Presence::Online => palette.success,
    };
    Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(presence.label(), Style::default().fg(color)),
    ])
}
