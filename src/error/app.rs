use thiserror::Error;

use super::{DecodeError, DispatchError};

pub type AgifyResult<T> = Result<T, AgifyError>;

/// Umbrella error for operations that cross the dispatch and decode layers,
/// such as the schema accessor.
#[derive(Debug, Error)]
pub enum AgifyError {
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}
