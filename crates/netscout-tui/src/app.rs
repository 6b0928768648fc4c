//! Application core: event loop, key mapping, action dispatch.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use netscout_core::{DashboardController, DashboardState, ScanPhase};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::sidebar::last_scan_caption;
use crate::screens::{DashboardScreen, SidebarPanel};
use crate::state_bridge::spawn_state_bridge;
use crate::theme::Palette;
use crate::tui::Tui;

const SIDEBAR_WIDTH: u16 = 32;

/// Top-level application state and event loop.
pub struct App {
    controller: DashboardController,
    /// Latest snapshot published by the controller.
    state: DashboardState,
    dashboard: DashboardScreen,
    sidebar: SidebarPanel,
    /// Whether the app should keep running.
    running: bool,
    /// Action sender, shared with the state bridge.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver, drained by the main loop.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(controller: DashboardController, backend_url: impl Into<String>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let state = controller.snapshot();

        Self {
            controller,
            state,
            dashboard: DashboardScreen::new(),
            sidebar: SidebarPanel::new(backend_url),
            running: true,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let bridge_cancel = CancellationToken::new();
        tokio::spawn(spawn_state_bridge(
            self.controller.subscribe(),
            self.action_tx.clone(),
            bridge_cancel.clone(),
        ));

        // Applies the theme and kicks off the first scan; the bridge picks
        // up the resulting state.
        self.controller.start();

        let mut events = EventReader::new(
            Duration::from_millis(100), // throbber tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        bridge_cancel.cancel();
        events.stop();
        tui.exit()?;
        info!("TUI event loop ended");
        Ok(())
    }

    /// Global keys first, then the device table.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(action) = global_action(key) {
            return Ok(Some(action));
        }
        self.dashboard.handle_key_event(key)
    }

    /// Apply a single action to the controller and propagate it to panels.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }
            Action::Refresh => {
                if !self.controller.trigger_scan() {
                    debug!("refresh ignored, scan already in flight");
                }
            }
            Action::ToggleSidebar => {
                self.controller.toggle_sidebar();
            }
            Action::ToggleDarkMode => {
                self.controller.toggle_dark_mode();
            }
            Action::ToggleMacBlur => {
                self.controller.toggle_mac_blur();
            }
            Action::StateUpdated(state) => {
                self.state = state.as_ref().clone();
            }
            Action::Render | Action::Tick | Action::Resize(..) => {}
        }

        for panel in [
            &mut self.dashboard as &mut dyn Component,
            &mut self.sidebar,
        ] {
            if let Some(follow_up) = panel.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }

        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let palette = Palette::for_theme(self.state.theme());
        let area = frame.area();
        frame.render_widget(Block::default().style(palette.base()), area);

        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header_area, palette);

        if self.state.sidebar_open {
            let [sidebar_area, main_area] = Layout::horizontal([
                Constraint::Length(SIDEBAR_WIDTH),
                Constraint::Min(1),
            ])
            .areas(body_area);
            self.sidebar.render(frame, sidebar_area, palette);
            self.dashboard.render(frame, main_area, palette);
        } else {
            self.dashboard.render(frame, body_area, palette);
        }

        self.render_footer(frame, footer_area, palette);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let status = match self.state.phase {
            ScanPhase::Scanning => Span::styled("◐ scanning", Style::default().fg(palette.warning)),
            ScanPhase::Failed => Span::styled("○ last scan failed", Style::default().fg(palette.error)),
            ScanPhase::Idle | ScanPhase::Succeeded => {
                Span::styled("● active", Style::default().fg(palette.success))
            }
        };
        let line = Line::from(vec![
            Span::styled(
                concat!(" Network Scout v", env!("CARGO_PKG_VERSION")),
                palette.title(),
            ),
            Span::styled("  │ ", palette.key_hint()),
            status,
            Span::styled(
                format!(
                    "  │ last scan {}",
                    last_scan_caption(self.state.last_scan_at, chrono::Utc::now())
                ),
                palette.key_hint(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let refresh = if self.state.accepts_scan_trigger() {
            vec![
                Span::styled(" r ", palette.key_hint_key()),
                Span::styled("refresh network  ", palette.key_hint()),
            ]
        } else {
            vec![Span::styled(" scanning...      ", palette.key_hint())]
        };
        let mut spans = refresh;
        spans.extend([
            Span::styled("s ", palette.key_hint_key()),
            Span::styled("sidebar  ", palette.key_hint()),
            Span::styled("d ", palette.key_hint_key()),
            Span::styled("theme  ", palette.key_hint()),
            Span::styled("b ", palette.key_hint_key()),
            Span::styled("blur MACs  ", palette.key_hint()),
            Span::styled("q ", palette.key_hint_key()),
            Span::styled("quit", palette.key_hint()),
        ]);
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Keys that work regardless of what the table is doing.
fn global_action(key: KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c'))
        | (KeyModifiers::NONE, KeyCode::Char('q') | KeyCode::Esc) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Char('r') | KeyCode::F(5)) => Some(Action::Refresh),
        (KeyModifiers::NONE, KeyCode::Char('s')) => Some(Action::ToggleSidebar),
        (KeyModifiers::NONE, KeyCode::Char('d')) => Some(Action::ToggleDarkMode),
        (KeyModifiers::NONE, KeyCode::Char('b')) => Some(Action::ToggleMacBlur),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use futures::future::{self, BoxFuture};
    use netscout_core::{NoopThemeSink, ScanOutcome, Scanner, UiPreferences};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    struct NeverScanner;

    impl Scanner for NeverScanner {
        fn perform_scan(&self) -> BoxFuture<'_, ScanOutcome> {
            Box::pin(future::pending())
        }
    }

    fn app() -> App {
        let controller = DashboardController::new(
            Arc::new(NeverScanner),
            Arc::new(NoopThemeSink),
            UiPreferences::default(),
        );
        App::new(controller, "http://localhost:8000")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
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

    /// Forward whatever the controller published, like the bridge does.
    fn sync(app: &mut App) {
        let state = app.controller.snapshot();
        app.process_action(&Action::StateUpdated(Box::new(state)))
            .unwrap();
    }

    #[test]
    fn global_keys_map_to_dashboard_actions() {
        assert_eq!(global_action(key(KeyCode::Char('r'))), Some(Action::Refresh));
        assert_eq!(global_action(key(KeyCode::Char('s'))), Some(Action::ToggleSidebar));
        assert_eq!(global_action(key(KeyCode::Char('d'))), Some(Action::ToggleDarkMode));
        assert_eq!(global_action(key(KeyCode::Char('b'))), Some(Action::ToggleMacBlur));
        assert_eq!(global_action(key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            global_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(global_action(key(KeyCode::Char('j'))), None);
    }

    #[test]
    fn toggles_go_through_the_controller() {
        let mut app = app();
        app.process_action(&Action::ToggleSidebar).unwrap();
        app.process_action(&Action::ToggleMacBlur).unwrap();
        app.process_action(&Action::ToggleDarkMode).unwrap();

        let state = app.controller.snapshot();
        assert!(!state.sidebar_open);
        assert!(state.mac_blurred);
        assert!(!state.dark_mode);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app();
        app.process_action(&Action::Quit).unwrap();
        assert!(!app.running);
    }

    #[test]
    fn sidebar_follows_published_state() {
        let mut app = app();
        sync(&mut app);
        assert!(screen_text(&app).contains("Overview"));

        app.process_action(&Action::ToggleSidebar).unwrap();
        sync(&mut app);
        let text = screen_text(&app);
        assert!(!text.contains("Overview"));
        assert!(text.contains("No devices found yet."));
    }

    #[tokio::test]
    async fn refresh_disables_the_refresh_hint_while_scanning() {
        let mut app = app();
        assert!(screen_text(&app).contains("refresh network"));

        app.process_action(&Action::Refresh).unwrap();
        sync(&mut app);
        let text = screen_text(&app);
        assert!(text.contains("scanning..."));
        assert!(!text.contains("refresh network"));
        assert!(text.contains("Scanning network..."));
    }
}
