//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. Translation
//! errors are tagged by kind and keep the underlying cause reachable through
//! `source()`, so callers can match on the variant instead of parsing messages.

use thiserror::Error;

use crate::workflow::WorkflowState;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a workflow state could not be mapped to a legacy status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The state is outside the set the mapper knows how to translate.
    #[error("unrecognized workflow state {0}")]
    UnrecognizedState(WorkflowState),

    /// The opaque data could not be decoded into a context.
    #[error("malformed opaque context: {0}")]
    MalformedContext(String),
}

impl MappingError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedContext(msg.into())
    }
}

/// Why a timestamp string was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,

    /// Not RFC 3339, or a field is out of range.
    #[error(transparent)]
    Malformed(#[from] chrono::ParseError),

    /// Parsed, but only under a lenient reading RFC 3339 does not allow.
    #[error("non-canonical RFC 3339 timestamp: {0}")]
    NonCanonical(&'static str),
}

/// Failure to translate a single workflow event.
///
/// Exactly one of these is returned per failed translation. Status mapping is
/// attempted first, so a `StatusMapping` error wins over a bad timestamp on the
/// same event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("unable to parse job update event state {state}: {source}")]
    StatusMapping {
        state: WorkflowState,
        #[source]
        source: MappingError,
    },

    #[error("unable to parse job update event timestamp {timestamp:?}: {source}")]
    TimestampParse {
        timestamp: String,
        #[source]
        source: TimestampError,
    },
}

impl TranslateError {
    /// Translation errors describe bad input, never a transient failure.
    pub fn is_retryable(&self) -> bool {
        false
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::StatusMapping { .. } => "status_mapping",
            TranslateError::TimestampParse { .. } => "timestamp_parse",
        }
    }
}

/// Main error enum for the bridge event crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation errors (map to INVALID_ARGUMENT).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable configuration (map to FAILED_PRECONDITION).
    #[error("config error: {0}")]
    Config(String),

    /// A workflow event could not be translated (map to INVALID_ARGUMENT).
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable error code reported alongside un-forwardable records.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) | Error::Translate(_) | Error::Serialization(_) => {
                "INVALID_ARGUMENT"
            }
            Error::Config(_) => "FAILED_PRECONDITION",
            Error::Io(_) => "INTERNAL",
        }
    }
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_status_mapping_exposes_cause() {
        let err = TranslateError::StatusMapping {
            state: WorkflowState::Invalid,
            source: MappingError::UnrecognizedState(WorkflowState::Invalid),
        };
        let cause = err.source().unwrap().to_string();
        assert_eq!(cause, "unrecognized workflow state WORKFLOW_STATE_INVALID");
        assert!(err.to_string().contains("WORKFLOW_STATE_INVALID"));
        assert_eq!(err.kind(), "status_mapping");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_timestamp_error_keeps_offending_string() {
        let err = TranslateError::TimestampParse {
            timestamp: "yesterday".to_string(),
            source: TimestampError::Empty,
        };
        assert!(err.to_string().contains("\"yesterday\""));
        assert_eq!(err.kind(), "timestamp_parse");
    }

    #[test]
    fn test_error_codes() {
        let translate: Error = TranslateError::TimestampParse {
            timestamp: String::new(),
            source: TimestampError::Empty,
        }
        .into();
        assert_eq!(translate.error_code(), "INVALID_ARGUMENT");
        assert_eq!(Error::config("bad").error_code(), "FAILED_PRECONDITION");
        assert_eq!(Error::validation("bad").error_code(), "INVALID_ARGUMENT");
    }
}
