// Scan endpoint client
//
// Wraps `reqwest::Client` with the discovery service's URL layout and
// response envelope. A scan is a single `GET /api/scan` with no query,
// headers, or body; the service decides which range to sweep.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

const SCAN_PATH: &str = "api/scan";
const ERROR_STATUS: &str = "error";
const BODY_PREVIEW_LEN: usize = 200;

/// One host as reported by the discovery service.
///
/// Field values are passed through untouched; in particular the MAC keeps
/// whatever case the service produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedDevice {
    pub ip: String,
    pub mac: String,
    pub vendor: String,
}

/// A successful scan, devices in the order the service listed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub devices: Vec<ScannedDevice>,
    /// The service's own `count` field, when it sends one.
    pub reported_count: Option<usize>,
}

/// Wire shape shared by the success and error payloads.
///
/// Success: `{"status": "success", "devices": [...], "count": N}`
/// Error:   `{"status": "error", "message": "..."}`
#[derive(Debug, Deserialize)]
struct ScanEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    devices: Option<Vec<ScannedDevice>>,
    #[serde(default)]
    count: Option<usize>,
}

/// HTTP client for the discovery service's scan endpoint.
#[derive(Debug, Clone)]
pub struct ScanClient {
    http: reqwest::Client,
    scan_url: Url,
}

impl ScanClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the service root, e.g. `http://localhost:8000`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            scan_url: scan_url_for(&base_url),
        }
    }

    /// Fully resolved scan endpoint.
    pub fn scan_url(&self) -> &Url {
        &self.scan_url
    }

    /// Ask the service for one network scan.
    ///
    /// No retries are attempted; a failed call is simply returned.
    pub async fn scan(&self) -> Result<ScanReport, Error> {
        debug!("GET {}", self.scan_url);

        let resp = self
            .http
            .get(self.scan_url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body_preview: preview(&body).to_owned(),
            });
        }

        parse_scan_body(&body)
    }
}

/// Decode a 2xx body into a report or a service-reported error.
fn parse_scan_body(body: &str) -> Result<ScanReport, Error> {
    let envelope: ScanEnvelope = serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })?;

    if envelope.status.as_deref() == Some(ERROR_STATUS) {
        return Err(Error::Service {
            message: envelope.message.unwrap_or_default(),
        });
    }

    let Some(devices) = envelope.devices else {
        return Err(Error::Deserialization {
            message: "scan response has no `devices` field".into(),
            body: body.to_owned(),
        });
    };

    if let Some(count) = envelope.count {
        if count != devices.len() {
            warn!(
                reported = count,
                received = devices.len(),
                "scan response count does not match device list"
            );
        }
    }

    Ok(ScanReport {
        devices,
        reported_count: envelope.count,
    })
}

fn scan_url_for(base_url: &Url) -> Url {
    let mut url = base_url.clone();
    let path = format!("{}/{SCAN_PATH}", base_url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_query(None);
    url
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREVIEW_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
