//! UI actions. Every state change on screen goes through one of these.

use netscout_core::DashboardState;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,

    // ── Dashboard operations ──
    Refresh,
    ToggleSidebar,
    ToggleDarkMode,
    ToggleMacBlur,

    /// New snapshot published by the controller.
    StateUpdated(Box<DashboardState>),
}
