pub mod dashboard;
pub mod sidebar;

pub use dashboard::DashboardScreen;
pub use sidebar::SidebarPanel;
