//! Versioned vendor media types, sent as `Accept` on reads and
//! `Content-Type` on writes. The firmware matches them exactly.

pub const DEVICE_STATE: &str = "application/vnd.wtg.local.device-state.v1+json";
pub const DEVICE_STATE_V2: &str = "application/vnd.wtg.local.device-state.v2+json";
pub const NETWORKING: &str = "application/vnd.wtg.local.networking.v1+json";
pub const TELEMETRY: &str = "application/vnd.wtg.local.telemetry.v1+json";
pub const AUTO_SHUT_OFF: &str = "application/vnd.wtg.local.auto-shut-off.v1+json";
pub const AUTO_SHUT_OFF_REPORT: &str = "application/vnd.wtg.local.auto-shut-off.report.v1+json";
pub const WEBHOOK: &str = "application/vnd.wtg.local.webhook.v1+json";
pub const VALVE_CHANGE: &str = "application/vnd.wtg.local.valve-change.v1+json";
