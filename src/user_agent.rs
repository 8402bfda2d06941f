//! Shared User-Agent string for outbound metadata requests.

/// Project URL for User-Agent identification (RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/bookshelf";

/// Default User-Agent for metadata lookups.
#[must_use]
pub(crate) fn default_lookup_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("bookshelf/{version} (+{PROJECT_UA_URL})")
}
