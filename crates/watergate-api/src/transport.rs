// Shared transport configuration for the local API session.
//
// Timeout and retry settings live here so the client only deals with
// session lifecycle and request plumbing.

use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("watergate-api/", env!("CARGO_PKG_VERSION"));

/// Settings applied when building the pooled HTTP session.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Total time allowed for a single request attempt.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: USER_AGENT.into(),
        }
    }
}

impl TransportConfig {
    /// Config with a custom per-attempt timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| Error::Session(e.to_string()))
    }
}

/// Fixed-delay retry policy.
///
/// Every failed attempt (including the last one) is followed by `delay`
/// before the next attempt or the final error. Status failures and
/// transport errors are treated the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per logical call; `0` is treated as `1`.
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Keep the default attempt count but wait `delay` between attempts.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }
}
