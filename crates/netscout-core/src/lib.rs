//! Scan lifecycle orchestration and dashboard state for Network Scout.
//!
//! This crate sits between `netscout-api` and the presentation layer:
//!
//! - **[`Scanner`]**: the Scan Client seam. [`HttpScanner`] performs one
//!   `GET /api/scan` and folds every result into a [`ScanOutcome`]; no error
//!   escapes past it.
//!
//! - **[`DashboardController`]**: owns the single [`DashboardState`], guards
//!   against overlapping scans, applies outcomes, and flips the UI toggles.
//!   Consumers read snapshots or subscribe to a `tokio::sync::watch` channel.
//!
//! - **[`DeviceCollection`]**: the ordered, MAC-keyed device list a
//!   successful scan is reconciled into.
//!
//! - **[`Theme`] / [`ThemeSink`]**: the dark-mode value and the one adapter
//!   allowed to push it into process-wide presentation state.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod scanner;
pub mod store;
pub mod theme;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ScanConfig, TlsVerification, UiPreferences};
pub use controller::DashboardController;
pub use error::CoreError;
pub use model::{
    BACKEND_UNREACHABLE, Device, FailureKind, Presence, ScanFailure, ScanOutcome, UNKNOWN_VENDOR,
    normalize_mac,
};
pub use scanner::{HttpScanner, Scanner};
pub use store::{DashboardState, DeviceCollection, ScanPhase, ViewMode};
pub use theme::{NoopThemeSink, Theme, ThemeSink};
