//! Shared HTTP client construction policy for metadata providers.
//!
//! Centralizes timeout, user-agent and compression defaults so every provider
//! behaves the same on slow networks.

use std::time::Duration;

use reqwest::Client;

use crate::user_agent;

use super::LookupError;

/// Default bound on a single metadata lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds a provider HTTP client.
///
/// `timeout` bounds both connection setup and the whole request; a lookup
/// that exceeds it fails with [`LookupError::Timeout`].
///
/// # Errors
///
/// Returns [`LookupError::Client`] when client construction fails.
pub fn build_lookup_http_client(provider: &str, timeout: Duration) -> Result<Client, LookupError> {
    Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .user_agent(user_agent::default_lookup_user_agent())
        .gzip(true)
        .build()
        .map_err(|error| LookupError::Client {
            provider: provider.to_string(),
            reason: error.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_lookup_http_client_with_short_timeout() {
        assert!(build_lookup_http_client("test", Duration::from_millis(250)).is_ok());
    }

    #[test]
    fn test_default_lookup_timeout_is_a_few_seconds() {
        assert_eq!(DEFAULT_LOOKUP_TIMEOUT.as_secs(), 5);
    }
}
