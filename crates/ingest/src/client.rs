//! Blocking client for the remote event API.
//!
//! The API is read-only: `GET /auth` hands out a key, `GET /get-events`
//! reports the entry count, and `GET /get-events?from=&to=` returns a range
//! of raw events. Every request is a plain GET, so nothing here retries.

use std::time::Duration;

use authlog_core::{ProgressMarker, Window};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::debug;

use crate::types::{ClientSettings, FetchError};

const MAX_IDLE_PER_HOST: usize = 10;
const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the orchestrator gets its data from.
pub trait EventSource: Sync {
    /// Current size of the remote dataset.
    fn fetch_total_count(&self) -> Result<ProgressMarker, FetchError>;

    /// Raw records for one window, undecoded so each can be rejected on its own.
    fn fetch_window(&self, window: Window) -> Result<Vec<Value>, FetchError>;
}

/// Builds the pooled HTTP client shared by key bootstrap and [`ApiClient`].
///
/// reqwest is built without its gzip feature, so responses arrive uncompressed.
pub fn build_http_client(settings: &ClientSettings) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
        .pool_idle_timeout(IDLE_TIMEOUT)
        .timeout(settings.request_timeout)
        .build()?)
}

/// Requests a fresh API key from `GET <base>/auth`.
pub fn fetch_api_key(client: &Client, base_url: &str) -> Result<String, FetchError> {
    let url = format!("{}/auth", trim_base(base_url));
    debug!(%url, "requesting api key");
    let body = read_body(client.get(url))?;
    let key = body.trim();
    if key.is_empty() {
        return Err(FetchError::UnexpectedShape {
            expected: "a non-empty api key",
        });
    }
    Ok(key.to_string())
}

/// HTTP-backed [`EventSource`] authenticated with a raw API key.
pub struct ApiClient {
    client: Client,
    events_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings, api_key: impl Into<String>) -> Result<Self, FetchError> {
        let client = build_http_client(settings)?;
        Ok(Self::with_client(client, &settings.base_url, api_key))
    }

    /// Reuses an existing pooled client.
    pub fn with_client(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            events_url: format!("{}/get-events", trim_base(base_url)),
            api_key: api_key.into(),
        }
    }

    fn events_request(&self) -> RequestBuilder {
        self.client
            .get(&self.events_url)
            .header(AUTHORIZATION, self.api_key.as_str())
    }
}

impl EventSource for ApiClient {
    fn fetch_total_count(&self) -> Result<ProgressMarker, FetchError> {
        let body = read_body(self.events_request())?;
        Ok(serde_json::from_str(&body)?)
    }

    fn fetch_window(&self, window: Window) -> Result<Vec<Value>, FetchError> {
        debug!(from = window.from, to = window.to, "fetching window");
        let request = self
            .events_request()
            .query(&[("from", window.from), ("to", window.to)]);
        let body = read_body(request)?;
        let value: Value = serde_json::from_str(&body)?;
        match value {
            Value::Array(records) => Ok(records),
            Value::Null => Ok(Vec::new()),
            _ => Err(FetchError::UnexpectedShape {
                expected: "a JSON array of events",
            }),
        }
    }
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

fn read_body(request: RequestBuilder) -> Result<String, FetchError> {
    let response = request.send()?;
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
