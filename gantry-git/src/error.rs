//! Error taxonomy for provider calls and delivery.

use thiserror::Error;

/// Errors from the git provider boundary.
///
/// Split into transient failures, which the caller retries with backoff,
/// and fatal ones, which surface immediately. Each variant carries the
/// operation context so failures are actionable without re-deriving state.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("request timed out during {context}")]
    Timeout { context: String },

    #[error("transient provider failure during {context}: {message}")]
    Transient { context: String, message: String },

    #[error("rate limited during {context}")]
    RateLimited { context: String },

    #[error("authentication rejected by provider")]
    Auth,

    #[error("permission denied for {context}")]
    PermissionDenied { context: String },

    #[error("{context} not found")]
    NotFound { context: String },

    #[error("provider returned {status} during {context}: {message}")]
    Api {
        status: u16,
        context: String,
        message: String,
    },

    #[error("transport failure during {context}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },
}

impl GitError {
    /// Whether a retry with backoff can reasonably succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Transient { .. } | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            // Connection-level failures are worth retrying; the request
            // never reached the provider.
            Self::Transport { .. } => true,
            Self::Auth | Self::PermissionDenied { .. } | Self::NotFound { .. } => false,
        }
    }
}

/// Terminal outcome of a failed delivery.
///
/// The caller receives either a pull-request handle, a no-op outcome, or
/// one of these; never a partially-applied repository state.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("delivery aborted")]
    Fatal(#[source] GitError),

    #[error("retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: GitError,
    },

    #[error("delivery cancelled before submission")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_statuses_are_transient() {
        for status in [429, 500, 502, 503, 504] {
            assert!(
                GitError::Api {
                    status,
                    context: "get file".into(),
                    message: String::new(),
                }
                .is_transient()
            );
        }
    }

    #[test]
    fn auth_and_not_found_are_fatal() {
        assert!(!GitError::Auth.is_transient());
        assert!(!GitError::NotFound {
            context: "repo".into()
        }
        .is_transient());
        assert!(!GitError::Api {
            status: 422,
            context: "pull request".into(),
            message: String::new(),
        }
        .is_transient());
    }
}
