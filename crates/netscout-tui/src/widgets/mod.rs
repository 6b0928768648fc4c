pub mod mac;
pub mod status_indicator;
