// Local API HTTP client
//
// Wraps a pooled `reqwest::Client` with lazy session management, the
// fixed-delay retry loop, and media-type headers. Endpoint methods live in
// sibling modules as inherent impls so this file stays focused on
// transport mechanics.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::error::{Error, Operation};
use crate::transport::{RetryPolicy, TransportConfig};

const API_PREFIX: &str = "/api/sonic";

/// Why a single attempt failed. Never leaves this module.
#[derive(Debug, thiserror::Error)]
enum AttemptFailure {
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("undecodable body: {0}")]
    Body(String),
}

/// Async client for a Watergate Sonic's local API.
///
/// Owns at most one pooled HTTP session. The session is created on first
/// use (or by [`open`](Self::open)), shared by all concurrent calls, and
/// recreated transparently after [`close`](Self::close). Use
/// [`scoped`](Self::scoped) to guarantee the session is closed when a
/// block of work ends, however it ends.
pub struct LocalClient {
    api_base: Url,
    transport: TransportConfig,
    retry: RetryPolicy,
    session: Mutex<Option<reqwest::Client>>,
}

impl LocalClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Client for the device at `base_url` (e.g. `http://192.168.1.20`)
    /// with the default 10s timeout and 3-attempt retry.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_config(base_url, TransportConfig::default(), RetryPolicy::default())
    }

    pub fn with_config(
        base_url: &str,
        transport: TransportConfig,
        retry: RetryPolicy,
    ) -> Result<Self, Error> {
        Ok(Self {
            api_base: Self::normalize_base_url(base_url)?,
            transport,
            retry,
            session: Mutex::new(None),
        })
    }

    /// Append `/api/sonic` to the device URL, ignoring a trailing slash.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}{API_PREFIX}"));
        Ok(url)
    }

    /// The API base URL (`<device>/api/sonic`).
    pub fn base_url(&self) -> &Url {
        &self.api_base
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Create the HTTP session if there is none. Reuses an open one.
    pub fn open(&self) -> Result<(), Error> {
        self.session().map(drop)
    }

    /// Drop the HTTP session. The next request opens a fresh one.
    pub fn close(&self) {
        let closed = self.slot().take();
        if closed.is_some() {
            debug!(base = %self.api_base, "closed HTTP session");
        }
    }

    pub fn is_open(&self) -> bool {
        self.slot().is_some()
    }

    /// Run `f` with an open session and close it afterwards.
    ///
    /// The session is closed on every exit path: normal return, error,
    /// panic unwind, or the returned future being dropped mid-flight.
    pub async fn scoped<'a, F, Fut, T, E>(&'a self, f: F) -> Result<T, E>
    where
        F: FnOnce(&'a Self) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<Error>,
    {
        self.open()?;
        let _scope = SessionScope { client: self };
        f(self).await
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<reqwest::Client>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the open session, creating it first if needed.
    ///
    /// The lock only guards the slot; requests run on a clone of the
    /// (reference-counted) client, so concurrent calls share one pool.
    fn session(&self) -> Result<reqwest::Client, Error> {
        let mut slot = self.slot();
        if let Some(http) = slot.as_ref() {
            return Ok(http.clone());
        }
        let http = self.transport.build_client()?;
        debug!(base = %self.api_base, timeout = ?self.transport.timeout, "opened HTTP session");
        *slot = Some(http.clone());
        Ok(http)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Full URL for an endpoint path such as `/networking`. The empty
    /// path addresses the API base itself.
    pub(crate) fn url(&self, path: &str) -> Url {
        let mut url = self.api_base.clone();
        url.set_path(&format!("{}{path}", self.api_base.path()));
        url
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET `path`; only 200 counts as success.
    ///
    /// Returns `None` when the body is empty, JSON `null`, or `{}`.
    pub(crate) async fn get(
        &self,
        path: &str,
        media_type: &'static str,
    ) -> Result<Option<Value>, Error> {
        let url = self.url(path);
        self.with_retry(Operation::Fetch, &url, |http| {
            fetch_once(http, url.clone(), media_type, false)
        })
        .await
    }

    /// GET `path`, additionally treating 204 No Content as success (`None`).
    pub(crate) async fn get_optional(
        &self,
        path: &str,
        media_type: &'static str,
    ) -> Result<Option<Value>, Error> {
        let url = self.url(path);
        self.with_retry(Operation::Fetch, &url, |http| {
            fetch_once(http, url.clone(), media_type, true)
        })
        .await
    }

    /// PUT a JSON body; 200 and 204 are success.
    pub(crate) async fn put(
        &self,
        path: &str,
        media_type: &'static str,
        body: &impl Serialize,
    ) -> Result<(), Error> {
        self.update(Method::PUT, path, media_type, body).await
    }

    /// PATCH a JSON body; 200 and 204 are success.
    pub(crate) async fn patch(
        &self,
        path: &str,
        media_type: &'static str,
        body: &impl Serialize,
    ) -> Result<(), Error> {
        self.update(Method::PATCH, path, media_type, body).await
    }

    async fn update(
        &self,
        method: Method,
        path: &str,
        media_type: &'static str,
        body: &impl Serialize,
    ) -> Result<(), Error> {
        let url = self.url(path);
        let payload = serde_json::to_vec(body).map_err(|e| Error::Serialization(e.to_string()))?;
        self.with_retry(Operation::Update, &url, |http| {
            update_once(http, method.clone(), url.clone(), media_type, payload.clone())
        })
        .await
    }

    /// Drive `attempt` up to `retry.attempts` times (at least once).
    ///
    /// Every failure is logged and followed by `retry.delay`, the last one
    /// included, before the terminal [`Error::RetriesExhausted`].
    async fn with_retry<T, F, Fut>(
        &self,
        operation: Operation,
        url: &Url,
        mut attempt: F,
    ) -> Result<T, Error>
    where
        F: FnMut(reqwest::Client) -> Fut,
        Fut: Future<Output = Result<T, AttemptFailure>>,
    {
        let attempts = self.retry.attempts.max(1);
        for n in 1..=attempts {
            let http = self.session()?;
            debug!(%url, %operation, attempt = n, "sending request");

            match attempt(http).await {
                Ok(value) => return Ok(value),
                Err(AttemptFailure::Status(status)) => {
                    let status = status.as_u16();
                    warn!(%url, %operation, attempt = n, status, "request failed");
                }
                Err(failure) => {
                    warn!(%url, %operation, attempt = n, error = %failure, "request failed");
                }
            }

            tokio::time::sleep(self.retry.delay).await;
        }

        error!(%url, %operation, attempts, "giving up");
        Err(Error::RetriesExhausted {
            operation,
            url: url.clone(),
            attempts,
        })
    }
}

/// Closes the client's session when dropped.
struct SessionScope<'a> {
    client: &'a LocalClient,
}

impl Drop for SessionScope<'_> {
    fn drop(&mut self) {
        self.client.close();
    }
}

// ── Single attempts ──────────────────────────────────────────────────

async fn fetch_once(
    http: reqwest::Client,
    url: Url,
    media_type: &'static str,
    no_content_ok: bool,
) -> Result<Option<Value>, AttemptFailure> {
    let resp = http.get(url).header(ACCEPT, media_type).send().await?;

    match resp.status() {
        StatusCode::OK => {
            let body = resp.text().await?;
            decode_body(&body)
        }
        StatusCode::NO_CONTENT if no_content_ok => Ok(None),
        status => Err(AttemptFailure::Status(status)),
    }
}

async fn update_once(
    http: reqwest::Client,
    method: Method,
    url: Url,
    media_type: &'static str,
    payload: Vec<u8>,
) -> Result<(), AttemptFailure> {
    let resp = http
        .request(method, url)
        .header(CONTENT_TYPE, media_type)
        .body(payload)
        .send()
        .await?;

    match resp.status() {
        StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
        status => Err(AttemptFailure::Status(status)),
    }
}

fn decode_body(body: &str) -> Result<Option<Value>, AttemptFailure> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str(body) {
        Ok(Value::Null) => Ok(None),
        Ok(Value::Object(map)) if map.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(AttemptFailure::Body(e.to_string())),
    }
}

/// Map a decoded body onto a model, keeping `None` as `None`.
pub(crate) fn parse_model<T: DeserializeOwned>(value: Option<Value>) -> Result<Option<T>, Error> {
    value
        .map(|value| {
            T::deserialize(&value).map_err(|e| Error::deserialization(&e, value.to_string()))
        })
        .transpose()
}
