use thiserror::Error;

/// Errors raised by a generation engine
///
/// The adapter passes these through to the caller unchanged.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Engine was unreachable or returned an unexpected error
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Engine rejected the request (bad schema, malformed tool, etc.)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Engine rejected the credentials
    #[error("authentication failed")]
    Unauthorized,

    /// Engine is throttling requests
    #[error("rate limit exceeded")]
    RateLimited {
        /// Seconds until the rate limit resets
        retry_after: u64,
    },

    /// Structured generation did not produce a JSON object
    #[error("no object generated: {0}")]
    NoObjectGenerated(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl LlmError {
    /// Whether repeating the same call later could succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::RateLimited { .. } | Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(LlmError::Upstream("502".to_owned()).is_retryable());
        assert!(LlmError::RateLimited { retry_after: 3 }.is_retryable());
        assert!(!LlmError::Unauthorized.is_retryable());
        assert!(!LlmError::InvalidRequest("bad schema".to_owned()).is_retryable());
        assert!(!LlmError::NoObjectGenerated("not json".to_owned()).is_retryable());
    }

    #[test]
    fn display_messages() {
        assert_eq!(LlmError::Unauthorized.to_string(), "authentication failed");
        assert_eq!(
            LlmError::InvalidRequest("missing schema".to_owned()).to_string(),
            "invalid request: missing schema"
        );
    }
}
