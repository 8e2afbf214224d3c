use bytes::Bytes;
use http::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{DecodeError, DispatchError};

use super::{RateGate, merge_headers};

/// Per-scenario test context: one HTTP session, one pacing clock.
///
/// A `World` is constructed before each scenario and torn down after it,
/// whatever the outcome. All requests flow through [`World::dispatch`], which
/// spaces consecutive dispatch initiations by the configured minimum
/// interval. Requests are serialized by construction: `dispatch` takes
/// `&mut self`, so one world never has two exchanges in flight.
#[derive(Debug)]
pub struct World {
    config: ApiConfig,
    session: Option<Session>,
    gate: RateGate,
}

#[derive(Debug)]
struct Session {
    client: Client,
    base_url: Url,
}

/// Caller-supplied request pieces passed to [`World::dispatch`].
///
/// Query pairs keep their order and may repeat keys (`name[]` batches rely on
/// this). Headers are merged with the configured API key, key winning.
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub headers: Vec<(String, String)>,
}

/// A fully read response: status, headers, and the raw body bytes.
///
/// Dispatch never interprets the payload; decoding happens at the caller via
/// [`RawResponse::json`] or the schema accessor.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    /// Decodes the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Malformed`] when the body is not valid JSON and
    /// [`DecodeError::Shape`] when it does not match `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, DecodeError> {
        let value: serde_json::Value = serde_json::from_slice(&self.body)
            .map_err(|source| DecodeError::Malformed { source })?;
        serde_json::from_value(value).map_err(|source| DecodeError::Shape { source })
    }

    /// The `content-type` header, if present and valid UTF-8.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|value| value.contains("application/json"))
    }
}

impl World {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        let gate = RateGate::new(config.min_request_interval);
        Self {
            config,
            session: None,
            gate,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Acquires the HTTP session bound to the configured base URL and
    /// timeout. Must be called once before [`World::dispatch`].
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidBaseUrl`] when the configured base URL
    /// does not parse and [`DispatchError::Session`] when the client cannot
    /// be built. Neither is retried.
    pub fn init(&mut self) -> Result<(), DispatchError> {
        let base_url =
            Url::parse(&self.config.base_url).map_err(|source| DispatchError::InvalidBaseUrl {
                url: self.config.base_url.clone(),
                source,
            })?;
        let client = Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|source| DispatchError::Session { source })?;
        debug!("Session open against {}", base_url);
        self.session = Some(Session { client, base_url });
        Ok(())
    }

    /// Issues one rate-limited request and reads the full response.
    ///
    /// Consecutive calls on the same world are spaced by at least the
    /// configured minimum interval, measured from the completion of the
    /// previous exchange, so two dispatch initiations are never closer
    /// together than the interval regardless of request latency.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnsupportedMethod`] for anything other than
    /// GET or POST (checked before any waiting or network I/O),
    /// [`DispatchError::SessionNotInitialized`] when [`World::init`] has not
    /// run, and [`DispatchError::Transport`] for network, timeout, or
    /// body-read failures. No retry happens at this layer.
    pub async fn dispatch(
        &mut self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<RawResponse, DispatchError> {
        if method != Method::GET && method != Method::POST {
            return Err(DispatchError::UnsupportedMethod {
                method: method.to_string(),
            });
        }
        let session = self
            .session
            .as_ref()
            .ok_or(DispatchError::SessionNotInitialized)?;

        let url = session
            .base_url
            .join(path)
            .map_err(|source| DispatchError::JoinPathFailed {
                path: path.to_owned(),
                source,
            })?;
        let headers = merge_headers(&options.headers, self.config.api_key.as_deref())?;

        self.gate.wait().await;
        debug!("Dispatching {} {}", method, url);

        let mut builder = session.client.request(method, url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = options.body {
            builder = builder.json(&body);
        }

        let result = Self::execute(builder).await;
        // Marked even on failure so a failing exchange still spaces its
        // successor.
        self.gate.mark();
        result
    }

    async fn execute(builder: reqwest::RequestBuilder) -> Result<RawResponse, DispatchError> {
        let response = builder
            .send()
            .await
            .map_err(|source| DispatchError::Transport { source })?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| DispatchError::Transport { source })?;
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    /// Releases the HTTP session. Idempotent: a second call is a no-op.
    pub fn teardown(&mut self) {
        if self.session.take().is_some() {
            debug!("Session released");
        }
    }
}
