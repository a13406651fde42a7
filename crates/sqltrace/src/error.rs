//! Error types for sqltrace

use std::sync::Arc;
use thiserror::Error;

/// Result type alias for driver cursor operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors surfaced by a driver row cursor.
///
/// The instrumented cursor never creates these on its own behalf (apart from
/// [`DriverError::Skip`] for a missing result-set capability); it returns
/// whatever the wrapped cursor returned.
#[derive(Debug, Clone, Error)]
pub enum DriverError {
    /// Row iteration is exhausted. Expected terminal condition, not a fault.
    #[error("no more rows")]
    NoMoreRows,

    /// The driver does not support the call; the caller should fall back to
    /// its generic implementation.
    #[error("driver: skip fast-path; continue as if unimplemented")]
    Skip,

    /// The underlying connection is no longer usable.
    #[error("driver: bad connection")]
    BadConn,

    /// Driver-reported failure with a plain message
    #[error("{0}")]
    Other(String),

    /// Driver-reported failure carrying the original error
    #[error(transparent)]
    Source(Arc<dyn std::error::Error + Send + Sync>),
}

impl DriverError {
    /// Create an error from a message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Wrap an arbitrary driver error
    pub fn source(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source(Arc::new(err))
    }

    /// Check if this is the end-of-rows sentinel
    pub fn is_no_more_rows(&self) -> bool {
        matches!(self, Self::NoMoreRows)
    }

    /// Check if this is the fallback sentinel
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    /// Check if this is a bad connection error
    pub fn is_bad_conn(&self) -> bool {
        matches!(self, Self::BadConn)
    }
}

/// Returned when parsing an unknown operation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation identifier: {0}")]
pub struct UnknownOp(pub String);
