//! Error types for pipeline operations
//!
//! This module hides error representation details and provides a single
//! error type for every fallible pipeline operation. The kind enumeration
//! is closed: the four variants below are the only failures the store can
//! report, and each carries a short fixed message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The kind of failure a pipeline operation reported
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// An expired or unknown node id was provided
    #[error("invalid node ID")]
    InvalidNodeId,

    /// The requested input slot does not exist on the destination node
    #[error("no such slot")]
    NoSuchSlot,

    /// The requested input slot is already filled by another producer
    #[error("slot already used")]
    SlotAlreadyUsed,

    /// The producer's output type does not match the slot's input type
    #[error("connection type mismatch")]
    ConnectionTypeMismatch,
}

/// Error raised by pipeline mutations
///
/// All failures are raised at the point of the offending operation; none
/// are deferred, and a failed operation leaves the pipeline unchanged.
///
/// # Examples
///
/// ```
/// use rheo::{ErrorKind, PipelineError};
///
/// let err = PipelineError::new(ErrorKind::NoSuchSlot);
/// assert_eq!(err.kind(), ErrorKind::NoSuchSlot);
/// assert_eq!(err.to_string(), "no such slot");
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind}")]
pub struct PipelineError {
    kind: ErrorKind,
}

impl PipelineError {
    /// Creates an error of the given kind
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<ErrorKind> for PipelineError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
