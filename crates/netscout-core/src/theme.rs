// ── Theme ──
//
// Dark mode travels as an explicit `Theme` value through the presentation
// tree. The only process-wide side effect goes through a `ThemeSink`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Presentation theme derived from the dark-mode toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

/// Boundary adapter for the one global effect of a theme change
/// (root-level attribute, terminal palette, ...).
///
/// The controller calls [`apply`](Self::apply) once at session start and
/// after every dark-mode toggle, always with the value now in state.
pub trait ThemeSink: Send + Sync {
    fn apply(&self, theme: Theme);
}

/// Sink for hosts with no global theming surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopThemeSink;

impl ThemeSink for NoopThemeSink {
    fn apply(&self, _theme: Theme) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_mode_maps_to_theme() {
        assert_eq!(Theme::from_dark_mode(true), Theme::Dark);
        assert_eq!(Theme::from_dark_mode(false), Theme::Light);
        assert!(Theme::Dark.is_dark());
        assert!(!Theme::Light.is_dark());
        assert_eq!(Theme::Light.to_string(), "light");
    }
}
