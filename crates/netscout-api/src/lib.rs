// netscout-api: Async Rust client for the Network Scout discovery service

pub mod error;
pub mod scan;
pub mod transport;

pub use error::Error;
pub use scan::{ScanClient, ScanReport, ScannedDevice};
pub use transport::{TlsMode, TransportConfig};
