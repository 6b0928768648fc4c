// ── Ordered device collection ──
//
// Insertion-ordered storage keyed by the device's identity (upper-cased
// MAC), with IP uniqueness enforced while a scan result is reconciled.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::model::{Device, normalize_mac};

/// The devices from one successful scan, ready for display.
///
/// Built once per scan and shared behind an `Arc`; never mutated after
/// construction, so snapshots handed to the view stay consistent.
#[derive(Debug, Clone, Default)]
pub struct DeviceCollection {
    /// identity key -> device, in first-seen order.
    by_key: IndexMap<String, Arc<Device>>,
}

impl DeviceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile a scan's device sequence.
    ///
    /// - No duplicates: order and contents equal the input exactly.
    /// - Repeated MAC (any case): the last report wins and keeps the slot
    ///   of the first occurrence.
    /// - Repeated IP under a different MAC: the earlier host is dropped and
    ///   the later one takes its own slot.
    pub fn from_scan(devices: impl IntoIterator<Item = Device>) -> Self {
        let mut by_key: IndexMap<String, Arc<Device>> = IndexMap::new();
        let mut ip_to_key: HashMap<String, String> = HashMap::new();

        for device in devices {
            let key = device.identity_key();

            if let Some(other) = ip_to_key.get(&device.ip).filter(|k| **k != key) {
                by_key.shift_remove(other);
            }

            if let Some(previous) = by_key.get(&key) {
                if previous.ip != device.ip {
                    ip_to_key.remove(&previous.ip);
                }
            }

            ip_to_key.insert(device.ip.clone(), key.clone());
            by_key.insert(key, Arc::new(device));
        }

        Self { by_key }
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Devices in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Device>> {
        self.by_key.values()
    }

    /// Look up a device by MAC, in any case.
    pub fn get(&self, mac: &str) -> Option<&Arc<Device>> {
        self.by_key.get(&normalize_mac(mac))
    }

    /// Owned copy of the devices in display order.
    pub fn to_vec(&self) -> Vec<Device> {
        self.iter().map(|d| Device::clone(d)).collect()
    }
}

impl PartialEq for DeviceCollection {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for DeviceCollection {}

impl<'a> IntoIterator for &'a DeviceCollection {
    type Item = &'a Arc<Device>;
    type IntoIter = indexmap::map::Values<'a, String, Arc<Device>>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_key.values()
    }
}
