use crate::session::Phase;
use thiserror::Error;

/// Recoverable reducer failures. Callers that guard indices themselves may
/// treat these as a no-op; the input state is left untouched either way.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReducerError {
    #[error("cell index {index} out of range for text of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Fatal lifecycle misuse. These are propagated, never swallowed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid transition: {event} while session is {from}")]
    InvalidTransition { from: Phase, event: &'static str },
}
