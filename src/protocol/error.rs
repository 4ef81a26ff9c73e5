use thiserror::Error;

use crate::utils::limits::{MAX_HEADERS, MAX_PAYLOAD_SIZE};

pub type CodecResult<T> = Result<T, CodecError>;

/// A message breaks one of the format's content rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("too many headers: {0} (max {})", MAX_HEADERS)]
    TooManyHeaders(usize),

    #[error("header names and values must be 7-bit ASCII")]
    NonAsciiHeader,

    #[error("Header names and values are limited to 1023 bytes.")]
    HeaderTooLarge,

    #[error("payload too large: {0} bytes (max {})", MAX_PAYLOAD_SIZE)]
    PayloadTooLarge(usize),
}

/// The byte layout itself is broken
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("truncated message: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("{0} unexpected bytes after payload")]
    TrailingBytes(usize),

    #[error("input exceeds {0} bytes")]
    TooLong(usize),
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            CodecError::Validation(e) => Some(e),
            _ => None,
        }
    }

    pub fn format(&self) -> Option<&FormatError> {
        match self {
            CodecError::Format(e) => Some(e),
            _ => None,
        }
    }
}
