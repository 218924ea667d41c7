//! Acknowledgement error types.

use thiserror::Error;

/// Failure reported by an [`AckPort`](crate::domain::ports::AckPort).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum AckError {
    #[error("network error while acknowledging: {message}")]
    Network { message: String },

    #[error("acknowledgement rejected by Discord: {message}")]
    Unauthorized { message: String },

    #[error("rate limited by Discord, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("Discord API is temporarily unavailable: {message}")]
    Unavailable { message: String },

    #[error("unexpected acknowledgement error: {message}")]
    Unexpected { message: String },
}

impl AckError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether a later acknowledgement may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::RateLimited { .. } | Self::Unavailable { .. }
        )
    }

    /// Returns whether error is a rate limit.
    #[must_use]
    pub const fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(AckError::network("reset").is_recoverable());
        assert!(AckError::RateLimited { retry_after_ms: 10 }.is_recoverable());
        assert!(!AckError::unauthorized("bad token").is_recoverable());
        assert!(!AckError::unexpected("?").is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = AckError::RateLimited {
            retry_after_ms: 1500,
        };
        assert_eq!(err.to_string(), "rate limited by Discord, retry after 1500ms");
        assert!(err.is_rate_limit());
    }
}
