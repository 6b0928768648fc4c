// ── Dashboard store ──
//
// The device collection a scan reconciles into, and the state snapshot
// the controller publishes.

mod collection;
mod state;

pub use collection::DeviceCollection;
pub use state::{DashboardState, ScanPhase, ViewMode};
