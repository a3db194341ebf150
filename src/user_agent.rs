//! Shared User-Agent string for the metadata and media HTTP clients.
//!
//! Single source for project URL and UA format so both requests identify
//! the tool consistently (good citizenship; RFC 9308).

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/apod-fetch";

/// Default User-Agent for all HTTP requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("apod-fetch/{version} (+{PROJECT_UA_URL})")
}
