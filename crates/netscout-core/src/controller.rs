// ── Dashboard controller ──
//
// Owns the one `DashboardState`, drives the scanner, and publishes every
// change through a `watch` channel. It is the sole writer; consumers only
// read snapshots or subscribe.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::UiPreferences;
use crate::model::ScanOutcome;
use crate::scanner::Scanner;
use crate::store::{DashboardState, ScanPhase};
use crate::theme::{Theme, ThemeSink};

/// The main entry point for presentation layers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. At most one scan is
/// outstanding at any time: a trigger while `Scanning` is ignored, so an
/// outcome is always the answer to the request that set `loading`.
#[derive(Clone)]
pub struct DashboardController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    scanner: Arc<dyn Scanner>,
    theme_sink: Arc<dyn ThemeSink>,
    state: watch::Sender<DashboardState>,
    /// Set by the first `start()`; the implicit session scan runs once.
    started: AtomicBool,
}

impl DashboardController {
    /// Create a controller in the `Idle` state. Does NOT scan -- call
    /// [`start()`](Self::start) to open the session.
    pub fn new(
        scanner: Arc<dyn Scanner>,
        theme_sink: Arc<dyn ThemeSink>,
        prefs: UiPreferences,
    ) -> Self {
        let (state, _) = watch::channel(DashboardState::new(prefs));

        Self {
            inner: Arc::new(ControllerInner {
                scanner,
                theme_sink,
                state,
                started: AtomicBool::new(false),
            }),
        }
    }

    // ── Session lifecycle ────────────────────────────────────────

    /// Open the session: push the initial theme through the sink and run
    /// the implicit first scan. Later calls do nothing and return `false`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> bool {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            debug!("session already started");
            return false;
        }

        let theme = self.theme();
        info!(%theme, "dashboard session started");
        self.inner.theme_sink.apply(theme);

        self.trigger_scan()
    }

    // ── Scanning ─────────────────────────────────────────────────

    /// Start a scan in the background.
    ///
    /// Returns `false` without side effects if a scan is already
    /// outstanding. Must be called from within a tokio runtime.
    pub fn trigger_scan(&self) -> bool {
        if !self.begin_scan() {
            return false;
        }

        let this = self.clone();
        tokio::spawn(async move {
            this.run_scan().await;
        });
        true
    }

    /// Run a scan to completion on the current task.
    ///
    /// Returns the phase the scan ended in, or `None` if another scan was
    /// already outstanding (in which case nothing happened). Dropping the
    /// future before it resolves records a transport failure.
    pub async fn scan_now(&self) -> Option<ScanPhase> {
        if !self.begin_scan() {
            return None;
        }
        Some(self.run_scan().await)
    }

    /// Atomic guard-and-transition into `Scanning`.
    fn begin_scan(&self) -> bool {
        let started = self.inner.state.send_if_modified(DashboardState::begin_scan);
        if started {
            info!("scan started");
        } else {
            debug!("scan already in flight, trigger ignored");
        }
        started
    }

    async fn run_scan(&self) -> ScanPhase {
        let pending = PendingScan {
            state: &self.inner.state,
            settled: false,
        };
        let began = Instant::now();
        let outcome = self.inner.scanner.perform_scan().await;
        let elapsed = began.elapsed();

        match &outcome {
            ScanOutcome::Success { devices } => {
                info!(devices = devices.len(), ?elapsed, "scan succeeded");
            }
            ScanOutcome::Failure(failure) => {
                warn!(kind = ?failure.kind, message = %failure.message, ?elapsed, "scan failed");
            }
        }

        pending.settle(outcome)
    }

    // ── Read model ───────────────────────────────────────────────

    /// Point-in-time copy of the dashboard state (devices are shared).
    pub fn snapshot(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    pub fn theme(&self) -> Theme {
        self.inner.state.borrow().theme()
    }

    // ── UI toggles ───────────────────────────────────────────────

    /// Flip the sidebar. Returns the new value.
    pub fn toggle_sidebar(&self) -> bool {
        self.flip(|state| &mut state.sidebar_open, "sidebar_open")
    }

    /// Flip MAC blurring. Returns the new value.
    pub fn toggle_mac_blur(&self) -> bool {
        self.flip(|state| &mut state.mac_blurred, "mac_blurred")
    }

    /// Flip dark mode, then push the resulting theme through the sink.
    /// Returns the new value.
    pub fn toggle_dark_mode(&self) -> bool {
        let dark_mode = self.flip(|state| &mut state.dark_mode, "dark_mode");
        self.inner.theme_sink.apply(Theme::from_dark_mode(dark_mode));
        dark_mode
    }

    fn flip(&self, field: impl FnOnce(&mut DashboardState) -> &mut bool, name: &str) -> bool {
        let mut value = false;
        self.inner.state.send_modify(|state| {
            let flag = field(state);
            *flag = !*flag;
            value = *flag;
        });
        debug!(toggle = name, value, "toggled");
        value
    }
}

/// The scan `begin_scan` opened. Dropping it unsettled (the scan future
/// was cancelled or panicked) records a transport failure so the
/// controller leaves `Scanning`.
struct PendingScan<'a> {
    state: &'a watch::Sender<DashboardState>,
    settled: bool,
}

impl PendingScan<'_> {
    fn settle(mut self, outcome: ScanOutcome) -> ScanPhase {
        self.settled = true;
        let mut phase = ScanPhase::Scanning;
        self.state.send_modify(|state| {
            if !state.apply_outcome(outcome, Utc::now()) {
                warn!("scan outcome arrived with no scan outstanding, dropped");
            }
            phase = state.phase;
        });
        phase
    }
}

impl Drop for PendingScan<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("scan abandoned before it completed, recording failure");
        self.state.send_modify(|state| {
            state.apply_outcome(ScanOutcome::backend_unreachable(), Utc::now());
        });
    }
}
