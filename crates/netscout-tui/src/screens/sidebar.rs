//! Overview sidebar: scan summary, backend, and display toggles.

use std::time::Duration;

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use netscout_core::DashboardState;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::action::Action;
use crate::component::Component;
use crate::theme::Palette;

pub struct SidebarPanel {
    backend_url: String,
    state: DashboardState,
}

impl SidebarPanel {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            state: DashboardState::default(),
        }
    }

    fn lines(&self, palette: &Palette, now: DateTime<Utc>) -> Vec<Line<'static>> {
        let known = self
            .state
            .devices
            .iter()
            .filter(|d| d.has_known_vendor())
            .count();

        vec![
            Line::from(""),
            stat_line("Devices", self.state.devices.len().to_string(), palette),
            stat_line("Known vendors", known.to_string(), palette),
            stat_line(
                "Last scan",
                last_scan_caption(self.state.last_scan_at, now),
                palette,
            ),
            stat_line("Scans", self.state.scans_completed.to_string(), palette),
            Line::from(""),
            Line::styled(" Backend", palette.key_hint()),
            Line::styled(format!(" {}", self.backend_url), palette.table_row()),
            Line::from(""),
            toggle_line("d", "Dark mode", self.state.dark_mode, palette),
            toggle_line("b", "Blur MACs", self.state.mac_blurred, palette),
        ]
    }
}

fn stat_line(label: &str, value: String, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<14}"), palette.key_hint()),
        Span::styled(value, Style::default().fg(palette.accent)),
    ])
}

fn toggle_line(key: &str, label: &str, on: bool, palette: &Palette) -> Line<'static> {
    let (value, color) = if on {
        ("on", palette.success)
    } else {
        ("off", palette.text_dim)
    };
    Line::from(vec![
        Span::styled(format!(" {key} "), palette.key_hint_key()),
        Span::styled(format!("{label:<12}"), palette.key_hint()),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Human caption for the time since the last completed scan.
pub fn last_scan_caption(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last) = last else {
        return "never".into();
    };
    let secs = (now - last).num_seconds();
    if secs < 1 {
        return "just now".into();
    }
    let elapsed = Duration::from_secs(secs.unsigned_abs());
    format!("{} ago", humantime::format_duration(elapsed))
}

impl Component for SidebarPanel {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::StateUpdated(state) = action {
            self.state = state.as_ref().clone();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default()
            .title(" Overview ")
            .title_style(palette.title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border())
            .style(palette.base());

        let paragraph = Paragraph::new(self.lines(palette, Utc::now()))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
