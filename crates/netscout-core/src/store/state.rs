// ── Dashboard state ──
//
// The single read model the presentation layer renders from. Transition
// methods are pure; the controller is the only caller that mutates a
// published instance.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::collection::DeviceCollection;
use crate::config::UiPreferences;
use crate::model::ScanOutcome;
use crate::theme::Theme;

/// Where the dashboard is in the scan lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPhase {
    #[default]
    Idle,
    Scanning,
    Succeeded,
    Failed,
}

/// Which main-panel presentation the current state calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// No devices yet and a scan is outstanding: full-page loader.
    InitialLoading,
    /// Devices on screen and a scan is outstanding: overlay loader.
    Refreshing,
    /// Nothing found, nothing pending, nothing wrong.
    Empty,
    /// No devices and the last attempt failed; only the banner has content.
    ErrorOnly,
    /// Devices on screen, idle.
    Populated,
}

/// Snapshot of everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct DashboardState {
    /// Most recent successful scan. Survives failed scans.
    pub devices: Arc<DeviceCollection>,
    /// `true` exactly while a scan request is outstanding.
    pub loading: bool,
    /// Message from the last failed scan, cleared when a new scan starts.
    pub error: Option<String>,
    pub phase: ScanPhase,
    pub mac_blurred: bool,
    pub sidebar_open: bool,
    pub dark_mode: bool,
    /// When the last scan (either outcome) completed.
    pub last_scan_at: Option<DateTime<Utc>>,
    /// Number of `Scanning -> Succeeded | Failed` transitions so far.
    pub scans_completed: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(UiPreferences::default())
    }
}

impl DashboardState {
    /// Session-start state: idle, no devices, toggles from preferences.
    pub fn new(prefs: UiPreferences) -> Self {
        Self {
            devices: Arc::new(DeviceCollection::new()),
            loading: false,
            error: None,
            phase: ScanPhase::Idle,
            mac_blurred: prefs.mac_blurred,
            sidebar_open: prefs.sidebar_open,
            dark_mode: prefs.dark_mode,
            last_scan_at: None,
            scans_completed: 0,
        }
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Enter `Scanning`. Returns `false` and changes nothing if a scan is
    /// already outstanding.
    pub fn begin_scan(&mut self) -> bool {
        if self.phase == ScanPhase::Scanning {
            return false;
        }
        self.phase = ScanPhase::Scanning;
        self.loading = true;
        self.error = None;
        true
    }

    /// Record the outcome of the outstanding scan. Returns `false` and
    /// changes nothing if no scan is outstanding.
    pub fn apply_outcome(&mut self, outcome: ScanOutcome, at: DateTime<Utc>) -> bool {
        if self.phase != ScanPhase::Scanning {
            return false;
        }

        match outcome {
            ScanOutcome::Success { devices } => {
                self.devices = Arc::new(DeviceCollection::from_scan(devices));
                self.error = None;
                self.phase = ScanPhase::Succeeded;
            }
            ScanOutcome::Failure(failure) => {
                self.error = Some(failure.message);
                self.phase = ScanPhase::Failed;
            }
        }

        self.loading = false;
        self.last_scan_at = Some(at);
        self.scans_completed += 1;
        true
    }

    // ── Derived view flags ──────────────────────────────────────────

    /// Nothing to show and nothing pending or wrong.
    pub fn is_empty_view(&self) -> bool {
        self.devices.is_empty() && !self.loading && self.error.is_none()
    }

    pub fn is_initial_loading(&self) -> bool {
        self.devices.is_empty() && self.loading
    }

    pub fn is_refreshing(&self) -> bool {
        !self.devices.is_empty() && self.loading
    }

    pub fn shows_error_banner(&self) -> bool {
        self.error.is_some()
    }

    /// Whether `trigger_scan` would start a new scan right now.
    pub fn accepts_scan_trigger(&self) -> bool {
        self.phase != ScanPhase::Scanning
    }

    pub fn view_mode(&self) -> ViewMode {
        match (self.devices.is_empty(), self.loading) {
            (true, true) => ViewMode::InitialLoading,
            (false, true) => ViewMode::Refreshing,
            (false, false) => ViewMode::Populated,
            (true, false) if self.error.is_some() => ViewMode::ErrorOnly,
            (true, false) => ViewMode::Empty,
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode)
    }
}
