// ABOUTME: Unified error taxonomy for Strava API client operations
// ABOUTME: Distinguishes confirmed-absence and authorization outcomes from transport failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by transport calls and service facades.
///
/// The propagation rule is uniform: every error that a facade does not
/// explicitly downgrade (`NotFound` on single-entity gets, `Unauthorized`
/// with a structurally valid token) crosses the facade boundary unchanged,
/// so callers can branch on the original failure kind.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote API confirmed the resource does not exist (HTTP 404).
    ///
    /// Single-entity facade gets translate this into `Ok(None)` rather than
    /// an error; list operations and mutations propagate it.
    #[error("{resource} not found")]
    NotFound {
        /// Description of the missing resource, e.g. `athlete 42`.
        resource: String,
    },

    /// The token lacks rights for the requested resource (HTTP 401/403).
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Message returned by the remote API, if any.
        message: String,
    },

    /// The remote API rejected the request due to rate limiting (HTTP 429).
    #[error("rate limit exceeded")]
    RateLimited {
        /// Seconds until the limit resets, from the `Retry-After` header.
        retry_after: Option<u64>,
    },

    /// A paging instruction was malformed; rejected before any network call.
    #[error("invalid paging instruction: {0}")]
    InvalidPaging(String),

    /// Client configuration is invalid (e.g. a malformed base URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// Network or protocol failure. Never retried by this crate.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected model.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A background task submitted through [`crate::task::submit`] failed to
    /// complete (panicked or was aborted before producing a result).
    #[error("background task failed: {0}")]
    Task(String),
}

impl ApiError {
    /// Confirmed-absence error for the named resource.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Authorization failure with the remote's message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Whether this error is the confirmed-absence outcome.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error is an authorization failure.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ApiError::not_found("athlete 42");
        assert_eq!(err.to_string(), "athlete 42 not found");
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized_display() {
        let err = ApiError::unauthorized("token lacks activity:read");
        assert!(err.to_string().contains("activity:read"));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_invalid_paging_display() {
        let err = ApiError::InvalidPaging("page must be >= 1".into());
        assert!(err.to_string().contains("page must be >= 1"));
    }
}
