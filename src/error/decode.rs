use thiserror::Error;

/// Failures decoding a response body into the typed Agify shapes.
///
/// Never silently defaulted: a body that does not match the expected shape
/// surfaces here rather than producing a partially populated record.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Response body was not valid JSON: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },
    #[error("Response body did not match the expected shape: {source}")]
    Shape {
        #[source]
        source: serde_json::Error,
    },
    #[error("Expected status 200, got {status}.")]
    UnexpectedStatus { status: u16 },
    #[error("Expected a JSON content type, got '{found}'.")]
    UnexpectedContentType { found: String },
    #[error("Expected a JSON array, got {found}.")]
    NotAnArray { found: &'static str },
}
