//! Configuration for Network Scout.
//!
//! Layered with figment: built-in defaults, then the TOML file at
//! [`config_path()`], then `NETSCOUT_*` environment variables (sections
//! separated by a double underscore, e.g. `NETSCOUT_BACKEND__URL`).
//! The result translates into `netscout_core`'s runtime types.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use netscout_core::config::DEFAULT_BACKEND_URL;
use netscout_core::{ScanConfig, TlsVerification, UiPreferences};

const ENV_PREFIX: &str = "NETSCOUT_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default)]
    pub ui: Ui,
}

/// Where the discovery service lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Backend {
    /// Service root (e.g., "http://localhost:8000").
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds. Unset waits for the scan indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Path to a custom CA certificate for HTTPS services.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS verification.
    #[serde(default)]
    pub insecure: bool,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
            ca_cert: None,
            insecure: false,
        }
    }
}

fn default_url() -> String {
    DEFAULT_BACKEND_URL.into()
}

/// Initial toggle values for a new dashboard session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Ui {
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    #[serde(default = "default_true")]
    pub sidebar_open: bool,

    #[serde(default)]
    pub mac_blurred: bool,
}

impl Default for Ui {
    fn default() -> Self {
        let prefs = UiPreferences::default();
        Self {
            dark_mode: prefs.dark_mode,
            sidebar_open: prefs.sidebar_open,
            mac_blurred: prefs.mac_blurred,
        }
    }
}

fn default_true() -> bool {
    true
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "netscout", "netscout").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netscout");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the default file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment. A missing file is
/// not an error; defaults apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(config)
}

/// Render a config as TOML.
pub fn render_config(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}

// ── Translation to runtime types ────────────────────────────────────

/// Build the core `ScanConfig` from the `[backend]` section.
pub fn to_scan_config(cfg: &Config) -> Result<ScanConfig, ConfigError> {
    let backend = &cfg.backend;

    let url: url::Url = backend.url.parse().map_err(|e| ConfigError::Validation {
        field: "backend.url".into(),
        reason: format!("invalid URL '{}': {e}", backend.url),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "backend.url".into(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    let tls = if backend.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = backend.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = match backend.timeout_secs {
        Some(0) => {
            return Err(ConfigError::Validation {
                field: "backend.timeout_secs".into(),
                reason: "must be greater than zero (omit it to wait indefinitely)".into(),
            });
        }
        Some(secs) => Some(Duration::from_secs(secs)),
        None => None,
    };

    Ok(ScanConfig { url, tls, timeout })
}

/// Initial toggle values from the `[ui]` section.
pub fn to_ui_preferences(cfg: &Config) -> UiPreferences {
    UiPreferences {
        dark_mode: cfg.ui.dark_mode,
        sidebar_open: cfg.ui.sidebar_open,
        mac_blurred: cfg.ui.mac_blurred,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.backend.url, DEFAULT_BACKEND_URL);
        assert_eq!(cfg.backend.timeout_secs, None);
        assert!(cfg.ui.dark_mode);
        assert!(cfg.ui.sidebar_open);
        assert!(!cfg.ui.mac_blurred);
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
[backend]
url = "http://scanner.lan:9000"
timeout_secs = 45

[ui]
dark_mode = false
mac_blurred = true
"#,
        );
        let cfg = load_config_from(file.path()).unwrap();
        assert_eq!(cfg.backend.url, "http://scanner.lan:9000");
        assert_eq!(cfg.backend.timeout_secs, Some(45));
        assert!(!cfg.ui.dark_mode);
        assert!(cfg.ui.sidebar_open);
        assert!(cfg.ui.mac_blurred);
    }

    #[test]
    fn scan_config_translation() {
        let mut cfg = Config::default();
        cfg.backend.timeout_secs = Some(120);
        cfg.backend.ca_cert = Some(PathBuf::from("/etc/netscout/ca.pem"));

        let scan = to_scan_config(&cfg).unwrap();
        assert_eq!(scan.url.as_str(), "http://localhost:8000/");
        assert_eq!(scan.timeout, Some(Duration::from_secs(120)));
        assert_eq!(
            scan.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/netscout/ca.pem"))
        );
    }

    #[test]
    fn default_scan_config_waits_indefinitely() {
        let scan = to_scan_config(&Config::default()).unwrap();
        assert_eq!(scan.timeout, None);
        assert_eq!(scan.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn insecure_wins_over_ca_cert() {
        let mut cfg = Config::default();
        cfg.backend.insecure = true;
        cfg.backend.ca_cert = Some(PathBuf::from("/tmp/ca.pem"));
        let scan = to_scan_config(&cfg).unwrap();
        assert_eq!(scan.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn rejects_bad_url_and_zero_timeout() {
        let mut cfg = Config::default();
        cfg.backend.url = "not a url".into();
        assert!(matches!(
            to_scan_config(&cfg),
            Err(ConfigError::Validation { ref field, .. }) if field == "backend.url"
        ));

        cfg.backend.url = "ftp://scanner.lan".into();
        assert!(to_scan_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.backend.timeout_secs = Some(0);
        assert!(matches!(
            to_scan_config(&cfg),
            Err(ConfigError::Validation { ref field, .. }) if field == "backend.timeout_secs"
        ));
    }

    #[test]
    fn ui_preferences_translation() {
        let mut cfg = Config::default();
        cfg.ui.sidebar_open = false;
        let prefs = to_ui_preferences(&cfg);
        assert!(!prefs.sidebar_open);
        assert!(prefs.dark_mode);
    }

    #[test]
    fn rendered_config_loads_back() {
        let mut cfg = Config::default();
        cfg.backend.url = "http://10.0.0.5:8000".into();
        cfg.ui.mac_blurred = true;

        let rendered = render_config(&cfg).unwrap();
        assert!(rendered.contains("[backend]"));
        assert!(!rendered.contains("timeout_secs"));

        let file = write_config(&rendered);
        assert_eq!(load_config_from(file.path()).unwrap(), cfg);
    }
}
