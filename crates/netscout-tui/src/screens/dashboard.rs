//! Main panel: error banner, device table, and the loading / empty views.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use netscout_core::{DashboardState, ViewMode};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::action::Action;
use crate::component::Component;
use crate::theme::Palette;
use crate::widgets::{mac, status_indicator};

pub struct DashboardScreen {
    state: DashboardState,
    table_state: TableState,
    throbber_state: ThrobberState,
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            state: DashboardState::default(),
            table_state: TableState::default().with_selected(Some(0)),
            throbber_state: ThrobberState::default(),
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.state.devices.len();
        if len == 0 {
            return;
        }
        let current = self.selected_index();
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let Some(message) = self.state.error.as_deref() else {
            return;
        };
        let line = Line::from(vec![
            Span::styled(" ✗ ", palette.error_banner()),
            Span::styled(format!("Error: {message}"), palette.error_banner()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);
        let [_, center, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(24),
            Constraint::Fill(1),
        ])
        .areas(rows[1]);

        let throbber = Throbber::default()
            .label("Scanning network...")
            .style(Style::default().fg(palette.accent))
            .throbber_style(Style::default().fg(palette.accent_alt));
        frame.render_stateful_widget(throbber, center, &mut self.throbber_state.clone());

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Discovering hosts on the local network",
                palette.key_hint(),
            ))
            .centered(),
            rows[2],
        );
    }

    fn render_empty(frame: &mut Frame, area: Rect, palette: &Palette) {
        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .split(area);
        let lines = vec![
            Line::styled("No devices found yet.", palette.title()),
            Line::styled(
                "Check your connection or try scanning again.",
                palette.key_hint(),
            ),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), rows[1]);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let header = Row::new(vec![
            Cell::from("IP Address").style(palette.table_header()),
            Cell::from("MAC Address").style(palette.table_header()),
            Cell::from("Vendor").style(palette.table_header()),
            Cell::from("Status").style(palette.table_header()),
        ]);

        let selected = self.selected_index();
        let rows: Vec<Row> = self
            .state
            .devices
            .iter()
            .enumerate()
            .map(|(i, dev)| {
                let prefix = if i == selected { "▸" } else { " " };
                let vendor_style = if dev.has_known_vendor() {
                    palette.table_row()
                } else {
                    palette.unknown_vendor()
                };
                Row::new(vec![
                    Cell::from(format!("{prefix}{}", dev.ip))
                        .style(Style::default().fg(palette.accent)),
                    Cell::from(mac::mac_cell_text(dev, self.state.mac_blurred)),
                    Cell::from(dev.vendor.clone()).style(vendor_style),
                    Cell::from(status_indicator::presence_line(dev.presence(), palette)),
                ])
                .style(palette.table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(17),
            Constraint::Length(19),
            Constraint::Min(16),
            Constraint::Length(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(palette.table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if self.state.is_refreshing() {
            let throbber = Throbber::default()
                .label("Refreshing...")
                .style(palette.key_hint())
                .throbber_style(Style::default().fg(palette.warning));
            frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
            return;
        }
        let hints = Line::from(vec![
            Span::styled("  j/k ", palette.key_hint_key()),
            Span::styled("navigate", palette.key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') | KeyCode::Home => self.table_state.select(Some(0)),
            KeyCode::Char('G') | KeyCode::End => {
                self.move_selection(isize::MAX);
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StateUpdated(state) => {
                self.state = state.as_ref().clone();
                let len = self.state.devices.len();
                if len > 0 && self.selected_index() >= len {
                    self.table_state.select(Some(len - 1));
                }
            }
            Action::Tick if self.state.loading => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let count = self.state.devices.len();
        let block = Block::default()
            .title(format!(" Devices ({count}) "))
            .title_style(palette.title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border())
            .style(palette.base());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let banner_height = u16::from(self.state.shows_error_banner());
        let [banner_area, body_area, hint_area] = Layout::vertical([
            Constraint::Length(banner_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_banner(frame, banner_area, palette);

        match self.state.view_mode() {
            ViewMode::InitialLoading => self.render_loading(frame, body_area, palette),
            ViewMode::Empty => Self::render_empty(frame, body_area, palette),
            ViewMode::ErrorOnly | ViewMode::Refreshing | ViewMode::Populated => {
                self.render_table(frame, body_area, palette);
            }
        }

        self.render_hints(frame, hint_area, palette);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use netscout_core::{Device, DeviceCollection, ScanPhase};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::theme::DARK;

    fn render_to_string(screen: &DashboardScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 14)).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area(), &DARK))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn screen_with(state: DashboardState) -> DashboardScreen {
        let mut screen = DashboardScreen::new();
        screen
            .update(&Action::StateUpdated(Box::new(state)))
            .unwrap();
        screen
    }

    fn populated() -> DashboardState {
        DashboardState {
            devices: Arc::new(DeviceCollection::from_scan(vec![
                Device::new("192.168.1.1", "00:11:22:33:44:55", "Netgear"),
                Device::new("192.168.1.2", "aa:bb:cc:dd:ee:ff", "Unknown Device"),
            ])),
            phase: ScanPhase::Succeeded,
            ..DashboardState::default()
        }
    }

    #[test]
    fn initial_scan_shows_full_page_loader() {
        let state = DashboardState {
            loading: true,
            phase: ScanPhase::Scanning,
            ..DashboardState::default()
        };
        let text = render_to_string(&screen_with(state));
        assert!(text.contains("Scanning network..."));
        assert!(!text.contains("No devices found yet."));
        assert!(!text.contains("IP Address"));
    }

    #[test]
    fn idle_with_no_devices_shows_empty_state() {
        let text = render_to_string(&screen_with(DashboardState::default()));
        assert!(text.contains("No devices found yet."));
        assert!(text.contains("Check your connection or try scanning again."));
    }

    #[test]
    fn populated_table_lists_each_device() {
        let text = render_to_string(&screen_with(populated()));
        assert!(text.contains("Devices (2)"));
        assert!(text.contains("192.168.1.1"));
        assert!(text.contains("AA:BB:CC:DD:EE:FF"));
        assert!(text.contains("Netgear"));
        assert!(text.contains("Unknown Device"));
        assert!(text.contains("● Online"));
        assert!(!text.contains("Error:"));
    }

    #[test]
    fn blurred_macs_are_masked() {
        let state = DashboardState {
            mac_blurred: true,
            ..populated()
        };
        let text = render_to_string(&screen_with(state));
        assert!(!text.contains("AA:BB:CC:DD:EE:FF"));
        assert!(text.contains("••:••:••:••:••:••"));
        assert!(text.contains("192.168.1.2"));
    }

    #[test]
    fn failed_refresh_keeps_rows_and_shows_banner() {
        let state = DashboardState {
            error: Some("Failed to connect to backend. Is it running as root?".into()),
            phase: ScanPhase::Failed,
            ..populated()
        };
        let text = render_to_string(&screen_with(state));
        assert!(text.contains("Error: Failed to connect to backend. Is it running as root?"));
        assert!(text.contains("Netgear"));
    }

    #[test]
    fn failure_without_devices_shows_only_banner() {
        let state = DashboardState {
            error: Some("Permission denied".into()),
            phase: ScanPhase::Failed,
            ..DashboardState::default()
        };
        let text = render_to_string(&screen_with(state));
        assert!(text.contains("Error: Permission denied"));
        assert!(!text.contains("No devices found yet."));
        assert!(!text.contains("Scanning network..."));
    }

    #[test]
    fn refresh_keeps_table_and_shows_indicator() {
        let state = DashboardState {
            loading: true,
            phase: ScanPhase::Scanning,
            ..populated()
        };
        let text = render_to_string(&screen_with(state));
        assert!(text.contains("Netgear"));
        assert!(text.contains("Refreshing..."));
        assert!(!text.contains("Scanning network..."));
    }

    #[test]
    fn selection_is_clamped_when_rows_shrink() {
        let mut screen = screen_with(populated());
        screen.move_selection(1);
        assert_eq!(screen.selected_index(), 1);

        let smaller = DashboardState {
            devices: Arc::new(DeviceCollection::from_scan(vec![Device::new(
                "192.168.1.1",
                "00:11:22:33:44:55",
                "Netgear",
            )])),
            ..populated()
        };
        screen
            .update(&Action::StateUpdated(Box::new(smaller)))
            .unwrap();
        assert_eq!(screen.selected_index(), 0);
    }
}
