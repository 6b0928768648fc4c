//! Light and dark palettes plus semantic styles for the dashboard.
//!
//! Nothing here reads global state: the active [`Palette`] is derived from
//! the controller's [`Theme`] and handed to every render call.

use netscout_core::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Colour set for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

pub const DARK: Palette = Palette {
    background: Color::Rgb(30, 31, 41), // #1e1f29
    surface: Color::Rgb(40, 42, 54),    // #282a36
    text: Color::Rgb(189, 193, 207),    // #bdc1cf
    text_dim: Color::Rgb(98, 114, 164), // #6272a4
    border: Color::Rgb(98, 114, 164),   // #6272a4
    accent: Color::Rgb(128, 255, 234),  // #80ffea
    accent_alt: Color::Rgb(225, 53, 255), // #e135ff
    success: Color::Rgb(80, 250, 123),  // #50fa7b
    error: Color::Rgb(255, 99, 99),     // #ff6363
    warning: Color::Rgb(241, 250, 140), // #f1fa8c
};

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(248, 250, 252), // #f8fafc
    surface: Color::Rgb(226, 232, 240),    // #e2e8f0
    text: Color::Rgb(30, 41, 59),          // #1e293b
    text_dim: Color::Rgb(100, 116, 139),   // #64748b
    border: Color::Rgb(148, 163, 184),     // #94a3b8
    accent: Color::Rgb(37, 99, 235),       // #2563eb
    accent_alt: Color::Rgb(147, 51, 234),  // #9333ea
    success: Color::Rgb(22, 163, 74),      // #16a34a
    error: Color::Rgb(220, 38, 38),        // #dc2626
    warning: Color::Rgb(202, 138, 4),      // #ca8a04
};

impl Palette {
    pub fn for_theme(theme: Theme) -> &'static Self {
        if theme.is_dark() { &DARK } else { &LIGHT }
    }

    /// Base style painted under every panel.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Title text for blocks/panels.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Table header row.
    pub fn table_header(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Normal table row text.
    pub fn table_row(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Selected / highlighted table row.
    pub fn table_selected(&self) -> Style {
        Style::default()
            .fg(self.accent_alt)
            .bg(self.surface)
            .add_modifier(Modifier::BOLD)
    }

    /// Vendor cell when the manufacturer lookup came back empty.
    pub fn unknown_vendor(&self) -> Style {
        Style::default()
            .fg(self.text_dim)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn error_banner(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint text (e.g., "q quit  r refresh").
    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Key hint key character.
    pub fn key_hint_key(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_follows_theme() {
        assert_eq!(Palette::for_theme(Theme::Dark), &DARK);
        assert_eq!(Palette::for_theme(Theme::Light), &LIGHT);
        assert_ne!(DARK.background, LIGHT.background);
    }

    #[test]
    fn base_style_uses_theme_background() {
        assert_eq!(LIGHT.base().bg, Some(LIGHT.background));
        assert_eq!(DARK.base().fg, Some(DARK.text));
    }
}
