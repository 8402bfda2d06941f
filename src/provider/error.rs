//! Error types for metadata lookups.
//!
//! These never cross the [`MetadataProvider`](super::MetadataProvider)
//! boundary: providers log them and report "no results" instead.

use thiserror::Error;

/// Ways a metadata lookup can be unavailable.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The HTTP client could not be constructed.
    #[error("cannot build HTTP client for '{provider}': {reason}")]
    Client {
        /// Provider name
        provider: String,
        /// Builder failure text
        reason: String,
    },

    /// The request could not be sent or the connection broke.
    #[error("cannot reach {provider}: {reason}\n  Suggestion: Check your network connection")]
    Transport {
        /// Provider name
        provider: String,
        /// Transport failure text
        reason: String,
    },

    /// The request exceeded the configured timeout.
    #[error("{provider} did not answer within {timeout_secs}s")]
    Timeout {
        /// Provider name
        provider: String,
        /// Configured timeout
        timeout_secs: u64,
    },

    /// The API answered with a non-success HTTP status.
    #[error("{provider} returned HTTP {status}: {reason}")]
    Status {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Human-readable reason
        reason: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("unexpected {provider} response format: {reason}")]
    Decode {
        /// Provider name
        provider: String,
        /// Decode failure text
        reason: String,
    },
}

impl LookupError {
    /// Classifies a `reqwest` send failure.
    #[must_use]
    pub fn from_send(provider: &str, timeout_secs: u64, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
                timeout_secs,
            }
        } else {
            Self::Transport {
                provider: provider.to_string(),
                reason: error.to_string(),
            }
        }
    }

    /// Creates a `Status` error with a reason suited to the status code.
    #[must_use]
    pub fn status(provider: &str, status: u16) -> Self {
        let reason = match status {
            400 => "request rejected (check the API key)".to_string(),
            403 => "access denied (API key invalid or quota exhausted)".to_string(),
            429 => "rate limit exceeded, try again in a few seconds".to_string(),
            s if s >= 500 => "service unavailable, try again later".to_string(),
            s => format!("unexpected status {s}"),
        };
        Self::Status {
            provider: provider.to_string(),
            status,
            reason,
        }
    }

    /// Creates a `Decode` error.
    #[must_use]
    pub fn decode(provider: &str, reason: impl Into<String>) -> Self {
        Self::Decode {
            provider: provider.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_status_reason_by_code() {
        assert!(
            LookupError::status("google_books", 429)
                .to_string()
                .contains("rate limit")
        );
        assert!(
            LookupError::status("google_books", 503)
                .to_string()
                .contains("unavailable")
        );
        assert!(
            LookupError::status("google_books", 403)
                .to_string()
                .contains("quota")
        );
        assert!(
            LookupError::status("google_books", 418)
                .to_string()
                .contains("418")
        );
    }

    #[test]
    fn test_lookup_error_timeout_message() {
        let err = LookupError::Timeout {
            provider: "google_books".to_string(),
            timeout_secs: 5,
        };
        assert_eq!(err.to_string(), "google_books did not answer within 5s");
    }

    #[test]
    fn test_lookup_error_transport_has_suggestion() {
        let err = LookupError::Transport {
            provider: "google_books".to_string(),
            reason: "connection refused".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("connection refused"));
        assert!(msg.contains("Suggestion"));
    }
}
