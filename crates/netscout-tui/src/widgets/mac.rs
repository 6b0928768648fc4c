//! MAC address cell text, masked when privacy blur is on.

use netscout_core::Device;

const MASK: char = '•';

/// Upper-cased MAC, or the same shape with every hex digit masked.
pub fn mac_cell_text(device: &Device, blurred: bool) -> String {
    let mac = device.display_mac();
    if blurred { mask(&mac) } else { mac }
}

fn mask(mac: &str) -> String {
    mac.chars()
        .map(|c| if c.is_ascii_alphanumeric() { MASK } else { c })
        .collect()
}
