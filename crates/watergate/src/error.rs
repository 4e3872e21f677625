//! CLI error types with miette diagnostics.
//!
//! Maps `watergate_api::Error` variants into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not {operation} {url} after {attempts} attempts")]
    #[diagnostic(
        code(watergate::connection_failed),
        help(
            "Check that the device is powered and on the same network,\n\
             and that the URL points at it (e.g. http://192.168.1.20).\n\
             Increase the per-request timeout with --timeout."
        )
    )]
    ConnectionFailed {
        operation: String,
        url: String,
        attempts: u32,
    },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("Unexpected response from device: {message}")]
    #[diagnostic(code(watergate::invalid_response), help("Raw body: {body}"))]
    InvalidResponse { message: String, body: String },

    #[error("Unknown webhook event type '{event_type}'")]
    #[diagnostic(
        code(watergate::unknown_event),
        help(
            "Known types: auto-shut-off-report, telemetry, valve,\n\
             power-supply-changed, wifi-changed, online"
        )
    )]
    UnknownEvent { event_type: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(watergate::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No device configured")]
    #[diagnostic(
        code(watergate::no_device),
        help(
            "Pass --device http://<ip>, set WATERGATE_DEVICE, or add a profile with:\n\
             watergate config set-device http://<ip>\n\
             Config file: {path}"
        )
    )]
    NoDevice { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(watergate::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: watergate config set-device <URL> --name {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(watergate::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to write configuration: {0}")]
    #[diagnostic(code(watergate::config_write))]
    ConfigWrite(#[from] toml::ser::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Validation { .. }
            | Self::NoDevice { .. }
            | Self::ProfileNotFound { .. }
            | Self::UnknownEvent { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── API error → CliError mapping ─────────────────────────────────────

impl From<watergate_api::Error> for CliError {
    fn from(err: watergate_api::Error) -> Self {
        use watergate_api::Error as ApiError;

        match err {
            ApiError::RetriesExhausted {
                operation,
                url,
                attempts,
            } => Self::ConnectionFailed {
                operation: operation.to_string(),
                url: url.to_string(),
                attempts,
            },
            ApiError::InvalidUrl(e) => Self::Validation {
                field: "device".into(),
                reason: e.to_string(),
            },
            ApiError::Session(reason) => Self::Validation {
                field: "session".into(),
                reason,
            },
            ApiError::Deserialization { message, body } => Self::InvalidResponse { message, body },
            ApiError::Serialization(message) => Self::InvalidResponse {
                message,
                body: String::new(),
            },
            ApiError::UnknownEventType(event_type) => Self::UnknownEvent { event_type },
        }
    }
}
