// ── Domain model ──
//
// Canonical types shared by the scan client, the store, and the
// presentation layer.

pub mod device;
pub mod outcome;

pub use device::{Device, Presence, UNKNOWN_VENDOR, normalize_mac};
pub use outcome::{BACKEND_UNREACHABLE, FailureKind, ScanFailure, ScanOutcome};
