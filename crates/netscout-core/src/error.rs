// ── Core error types ──
//
// Errors raised while *building* the scan pipeline. Errors from an
// individual scan never surface here: the Scan Client turns them into a
// `ScanOutcome::Failure` and the controller records it in its state.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<netscout_api::Error> for CoreError {
    fn from(err: netscout_api::Error) -> Self {
        let message = match err {
            netscout_api::Error::InvalidUrl(e) => format!("Invalid URL: {e}"),
            netscout_api::Error::ClientBuild(message) => message,
            other => other.to_string(),
        };
        CoreError::Config { message }
    }
}
