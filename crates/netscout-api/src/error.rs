use thiserror::Error;

/// Top-level error type for the `netscout-api` crate.
///
/// Separates failures where the discovery service could not be reached or
/// understood from failures the service reported about its own scan.
/// `netscout-core` folds these into a `ScanOutcome`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed (bad CA file, TLS backend).
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status}: {body_preview}")]
    Http { status: u16, body_preview: String },

    // ── Service ─────────────────────────────────────────────────────
    /// The service ran the scan and reported `status: "error"`.
    #[error("{message}")]
    Service { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the service itself reported the failure.
    pub fn is_service_error(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    /// Returns `true` if this is a connectivity problem worth a manual retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
