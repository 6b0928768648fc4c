// ── Scan Client ──
//
// Performs one discovery scan and normalizes whatever happens into a
// `ScanOutcome`. This is the boundary past which no scan error travels.

use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use netscout_api::transport::{TlsMode, TransportConfig};
use netscout_api::{ScanClient, ScanReport};

use crate::config::{ScanConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{Device, ScanOutcome};

/// Something that can run a discovery scan.
///
/// Implementations must not retry and must not touch dashboard state;
/// they only report what one attempt produced.
pub trait Scanner: Send + Sync {
    fn perform_scan(&self) -> BoxFuture<'_, ScanOutcome>;
}

/// Scanner backed by the discovery service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpScanner {
    client: ScanClient,
}

impl HttpScanner {
    pub fn new(client: ScanClient) -> Self {
        Self { client }
    }

    /// Build the HTTP client described by `config`.
    pub fn from_config(config: &ScanConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let client = ScanClient::new(config.url.clone(), &transport)?;
        Ok(Self::new(client))
    }
}

impl Scanner for HttpScanner {
    fn perform_scan(&self) -> BoxFuture<'_, ScanOutcome> {
        Box::pin(async move {
            match self.client.scan().await {
                Ok(report) => outcome_from_report(report),
                Err(e) => {
                    debug!(url = %self.client.scan_url(), "scan request failed");
                    outcome_from_error(e)
                }
            }
        })
    }
}

fn outcome_from_report(report: ScanReport) -> ScanOutcome {
    debug!(devices = report.devices.len(), "scan report received");
    ScanOutcome::success(report.devices.into_iter().map(Device::from).collect())
}

/// Service-reported errors keep their message; everything else collapses
/// into the fixed unreachable-backend diagnostic.
fn outcome_from_error(err: netscout_api::Error) -> ScanOutcome {
    match err {
        netscout_api::Error::Service { message } => {
            warn!(%message, "discovery service reported a scan failure");
            ScanOutcome::service_error(message)
        }
        other => {
            warn!(error = %other, "discovery service unreachable");
            ScanOutcome::backend_unreachable()
        }
    }
}

fn build_transport(config: &ScanConfig) -> TransportConfig {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };

    TransportConfig {
        tls,
        timeout: config.timeout,
        ..TransportConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::{BACKEND_UNREACHABLE, FailureKind};

    #[test]
    fn service_error_is_verbatim() {
        let outcome = outcome_from_error(netscout_api::Error::Service {
            message: "Permission denied".into(),
        });
        match outcome {
            ScanOutcome::Failure(f) => {
                assert_eq!(f.kind, FailureKind::Service);
                assert_eq!(f.message, "Permission denied");
            }
            ScanOutcome::Success { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn other_errors_use_fixed_diagnostic() {
        let outcome = outcome_from_error(netscout_api::Error::Http {
            status: 502,
            body_preview: "Bad Gateway".into(),
        });
        assert_eq!(outcome, ScanOutcome::backend_unreachable());

        let outcome = outcome_from_error(netscout_api::Error::Deserialization {
            message: "expected value".into(),
            body: "oops".into(),
        });
        match outcome {
            ScanOutcome::Failure(f) => {
                assert_eq!(f.kind, FailureKind::Transport);
                assert_eq!(f.message, BACKEND_UNREACHABLE);
            }
            ScanOutcome::Success { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn report_converts_in_order_without_touching_case() {
        let report = ScanReport {
            devices: vec![
                netscout_api::ScannedDevice {
                    ip: "10.0.0.2".into(),
                    mac: "aa:bb:cc:dd:ee:02".into(),
                    vendor: "B".into(),
                },
                netscout_api::ScannedDevice {
                    ip: "10.0.0.1".into(),
                    mac: "aa:bb:cc:dd:ee:01".into(),
                    vendor: "A".into(),
                },
            ],
            reported_count: Some(2),
        };
        let outcome = outcome_from_report(report);
        assert_eq!(
            outcome,
            ScanOutcome::success(vec![
                Device::new("10.0.0.2", "aa:bb:cc:dd:ee:02", "B"),
                Device::new("10.0.0.1", "aa:bb:cc:dd:ee:01", "A"),
            ])
        );
    }

    #[test]
    fn transport_mirrors_config() {
        let config = ScanConfig {
            tls: TlsVerification::DangerAcceptInvalid,
            timeout: Some(Duration::from_secs(90)),
            ..ScanConfig::default()
        };
        let transport = build_transport(&config);
        assert_eq!(transport.tls, TlsMode::DangerAcceptInvalid);
        assert_eq!(transport.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn default_config_has_no_timeout() {
        let transport = build_transport(&ScanConfig::default());
        assert!(transport.timeout.is_none());
        assert_eq!(transport.tls, TlsMode::System);
    }
}
