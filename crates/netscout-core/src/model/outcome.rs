// ── Scan outcome ──

use std::fmt;

use serde::{Deserialize, Serialize};

use super::device::Device;

/// Diagnostic shown whenever the discovery service cannot be reached or
/// understood. Kept deliberately vague; the cause goes to the log.
pub const BACKEND_UNREACHABLE: &str = "Failed to connect to backend. Is it running as root?";

/// Which side of the wire a failed scan broke on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Unreachable, timed out, bad status, or an unreadable body.
    Transport,
    /// The service ran and reported its own error.
    Service,
}

/// A failed scan with the message the dashboard should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of one scan attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanOutcome {
    /// Devices in the order the service listed them.
    Success { devices: Vec<Device> },
    Failure(ScanFailure),
}

impl ScanOutcome {
    pub fn success(devices: Vec<Device>) -> Self {
        Self::Success { devices }
    }

    /// Failure carrying the service's own message verbatim.
    pub fn service_error(message: impl Into<String>) -> Self {
        Self::Failure(ScanFailure {
            kind: FailureKind::Service,
            message: message.into(),
        })
    }

    /// Failure with the fixed unreachable-backend diagnostic.
    pub fn backend_unreachable() -> Self {
        Self::Failure(ScanFailure {
            kind: FailureKind::Transport,
            message: BACKEND_UNREACHABLE.to_owned(),
        })
    }
}
