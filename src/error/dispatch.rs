use thiserror::Error;

/// Failures raised by the rate-limited request dispatcher.
///
/// None of these are retried at this layer; they bubble to the calling step
/// and the harness decides whether the scenario fails or is re-run.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to start HTTP session: {source}")]
    Session {
        #[source]
        source: reqwest::Error,
    },
    #[error("Dispatch called before init().")]
    SessionNotInitialized,
    #[error("Unsupported HTTP method: {method}. Only GET and POST are dispatched.")]
    UnsupportedMethod { method: String },
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to join path '{path}' onto the base URL: {source}")]
    JoinPathFailed {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid header '{name}': {source}")]
    InvalidHeader {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Transport failure: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
}

impl DispatchError {
    /// True when the underlying transport failure was a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport { source } => source.is_timeout(),
            Self::Session { .. }
            | Self::SessionNotInitialized
            | Self::UnsupportedMethod { .. }
            | Self::InvalidBaseUrl { .. }
            | Self::JoinPathFailed { .. }
            | Self::InvalidHeader { .. } => false,
        }
    }
}
