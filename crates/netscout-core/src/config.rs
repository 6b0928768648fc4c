// ── Runtime scan configuration ──
//
// These types describe *where* the discovery service lives and how the
// dashboard starts out. They never touch disk; `netscout-config` builds
// them from files and the environment.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Default discovery service root.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// TLS verification strategy for HTTPS service endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Where and how to reach the discovery service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Service root (e.g., `http://localhost:8000`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout. `None` lets a scan run for as long as the sweep takes.
    pub timeout: Option<Duration>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend URL is valid"),
            tls: TlsVerification::default(),
            timeout: None,
        }
    }
}

/// Initial values of the dashboard's UI toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiPreferences {
    pub dark_mode: bool,
    pub sidebar_open: bool,
    pub mac_blurred: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            sidebar_open: true,
            mac_blurred: false,
        }
    }
}
