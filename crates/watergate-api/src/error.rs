use thiserror::Error;
use url::Url;

/// Which kind of request exhausted its retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    /// A GET of device data.
    Fetch,
    /// A PUT or PATCH changing device configuration.
    Update,
}

/// Top-level error type for the `watergate-api` crate.
///
/// Transport failures (connection refused, timeouts, unexpected status
/// codes) are consumed by the retry loop and only ever surface as
/// [`Error::RetriesExhausted`]. No `reqwest` error type crosses this
/// boundary.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// Every attempt of a request failed.
    #[error("Failed to {operation} {url} after {attempts} attempts")]
    RetriesExhausted {
        operation: Operation,
        url: Url,
        attempts: u32,
    },

    /// The configured device URL (or a path joined onto it) is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The pooled HTTP session could not be built.
    #[error("Failed to create HTTP session: {0}")]
    Session(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON did not match the expected model, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Webhooks ────────────────────────────────────────────────────
    /// Webhook envelope carried a `type` this crate does not know.
    #[error("Unknown webhook event type: {0}")]
    UnknownEventType(String),
}

impl Error {
    /// Returns `true` if the device could not be reached or kept failing.
    pub fn is_retries_exhausted(&self) -> bool {
        matches!(self, Self::RetriesExhausted { .. })
    }

    /// The request URL, for errors tied to a specific request.
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::RetriesExhausted { url, .. } => Some(url),
            _ => None,
        }
    }

    pub(crate) fn deserialization(err: &serde_json::Error, body: impl Into<String>) -> Self {
        Self::Deserialization {
            message: err.to_string(),
            body: body.into(),
        }
    }
}
