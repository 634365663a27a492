//! Bounded fetch — a single HTTP attempt raced against a hard deadline.
//!
//! Every network call the widget makes goes through [`fetch_bounded`]:
//! one request, no retry, abandoned the moment the deadline elapses.
//! Cancellation is drop-based — the `select!` discards the in-flight
//! request future on timeout, which tears down the connection, and
//! discards the timer on settle, so neither can outlive the call.
//!
//! The race is deterministic: the deadline arm is polled first, so when
//! both sides are ready on the same tick the abort wins.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;
use tracing::debug;

/// Deadline applied when the caller does not supply one.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Error)]
pub enum FetchError {
    /// The deadline elapsed before the request settled; the in-flight
    /// call was aborted.
    #[error("request aborted after {timeout:?}")]
    TimedOut { timeout: Duration },

    /// The underlying request failed for any other reason (connect,
    /// protocol, TLS, body read).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl FetchError {
    /// `true` when the failure is the deadline abort.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::TimedOut { .. })
    }
}

/// Per-request options, passed through to the HTTP client unchanged.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    method: Method,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Issue one request to `url` and return the response, unless `timeout`
/// elapses first.
///
/// Exactly one network attempt is made. A `timeout` of zero is
/// well-defined: the deadline arm fires on the first poll, before the
/// request future runs.
///
/// # Errors
///
/// [`FetchError::TimedOut`] when the deadline won the race,
/// [`FetchError::Request`] for every other failure. Both propagate to
/// the caller — this function is not a catch boundary.
pub async fn fetch_bounded(
    client: &reqwest::Client,
    url: &str,
    opts: RequestOptions,
    timeout: Duration,
) -> Result<reqwest::Response, FetchError> {
    let mut request = client.request(opts.method, url).headers(opts.headers);
    if let Some(body) = opts.body {
        request = request.body(body);
    }

    let request = request.send();
    tokio::pin!(request);

    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);

    tokio::select! {
        // Deadline arm first: at an exact tie the abort wins.
        biased;

        _ = &mut deadline => {
            debug!(%url, ?timeout, "fetch aborted at deadline");
            Err(FetchError::TimedOut { timeout })
        }

        result = &mut request => Ok(result?),
    }
}
