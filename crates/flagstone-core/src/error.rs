//! Error types for Flagstone.
//!
//! Remote failures are classified exactly once, at the point where the outcome
//! of a remote call is first interpreted. After that an error keeps its kind:
//! outer layers match on it, they never re-wrap it.
//!
//! Two kinds matter to callers:
//! - [`FlagError::RemoteUnavailable`] is a degradation case. The cache
//!   services swallow it and serve an empty mapping instead.
//! - [`FlagError::InvalidSignature`] is an integrity failure. It always
//!   reaches the caller.
//!
//! # Example
//!
//! ```
//! use flagstone_core::{FlagError, Result};
//!
//! fn evaluate(reachable: bool) -> Result<bool> {
//!     if !reachable {
//!         return Err(FlagError::remote_unavailable("connection refused"));
//!     }
//!     Ok(true)
//! }
//!
//! let err = evaluate(false).unwrap_err();
//! assert!(err.is_suppressible());
//! ```

use thiserror::Error;

/// Main error type for Flagstone operations.
#[derive(Debug, Error)]
pub enum FlagError {
    /// The remote evaluator could not be reached or answered with a failure
    /// (connection error, timeout, non-2xx status, undecodable body).
    #[error("remote evaluation failed: {reason}")]
    RemoteUnavailable {
        /// Description of what went wrong
        reason: String,
        /// HTTP status returned by the remote, if any
        status: Option<u16>,
    },

    /// A successful remote response carried a missing or invalid signature.
    #[error("invalid signature on response from '{endpoint}'")]
    InvalidSignature {
        /// Endpoint whose response failed verification
        endpoint: String,
    },

    /// Settings could not be loaded or are inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the problem
        message: String,
    },
}

impl FlagError {
    /// Creates a RemoteUnavailable error without a status code.
    pub fn remote_unavailable(reason: impl Into<String>) -> Self {
        Self::RemoteUnavailable {
            reason: reason.into(),
            status: None,
        }
    }

    /// Creates a RemoteUnavailable error for a non-2xx response.
    pub fn remote_status(status: u16, reason: impl Into<String>) -> Self {
        Self::RemoteUnavailable {
            reason: reason.into(),
            status: Some(status),
        }
    }

    /// Creates an InvalidSignature error.
    pub fn invalid_signature(endpoint: impl Into<String>) -> Self {
        Self::InvalidSignature {
            endpoint: endpoint.into(),
        }
    }

    /// Creates a Configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true if the remote was unreachable.
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable { .. })
    }

    /// Returns true if a response failed signature verification.
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, Self::InvalidSignature { .. })
    }

    /// Returns true if the cache services may replace this error with an
    /// empty mapping.
    pub fn is_suppressible(&self) -> bool {
        self.is_remote_unavailable()
    }

    /// HTTP status attached to the error, if the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteUnavailable { status, .. } => *status,
            _ => None,
        }
    }
}

/// Type alias for Results with FlagError.
pub type Result<T> = std::result::Result<T, FlagError>;
