// ── Device domain type ──

use std::fmt;

use serde::{Deserialize, Serialize};

use netscout_api::ScannedDevice;

/// Vendor string the discovery service uses when a MAC prefix is not in
/// its vendor database.
pub const UNKNOWN_VENDOR: &str = "Unknown Device";

/// One discovered network host.
///
/// Values are stored exactly as the service reported them. Display
/// concerns (MAC casing, reachability) are derived on read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    pub ip: String,
    pub mac: String,
    pub vendor: String,
}

impl Device {
    pub fn new(ip: impl Into<String>, mac: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            mac: mac.into(),
            vendor: vendor.into(),
        }
    }

    /// MAC address as shown to the user (upper-cased).
    pub fn display_mac(&self) -> String {
        normalize_mac(&self.mac)
    }

    /// Stable identity used to key rows. Case-insensitive on the MAC.
    pub fn identity_key(&self) -> String {
        normalize_mac(&self.mac)
    }

    /// `false` when the service could not resolve a manufacturer.
    pub fn has_known_vendor(&self) -> bool {
        let vendor = self.vendor.trim();
        !vendor.is_empty() && vendor != UNKNOWN_VENDOR
    }

    /// Reachability shown for this row.
    pub fn presence(&self) -> Presence {
        Presence::of_listed_device()
    }
}

impl From<ScannedDevice> for Device {
    fn from(raw: ScannedDevice) -> Self {
        Self {
            ip: raw.ip,
            mac: raw.mac,
            vendor: raw.vendor,
        }
    }
}

/// Upper-case a MAC address for display. Idempotent.
pub fn normalize_mac(raw: &str) -> String {
    raw.to_uppercase()
}

/// Reachability of a listed device.
///
/// The service sends no per-host liveness; every host in a successful scan
/// answered the ARP sweep, so listed devices are online by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presence {
    Online,
}

impl Presence {
    pub fn of_listed_device() -> Self {
        Self::Online
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
