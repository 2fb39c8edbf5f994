//! Timetable client error types.

use super::convert::RejectedConnection;

/// Errors from the timetable HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body.as_ref().map(|b| format!(" (body: {b})")).unwrap_or_default())]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response decoded but could not be converted to journeys
    #[error("malformed response: {0}")]
    Conversion(#[from] RejectedConnection),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by timetable API")]
    RateLimited,

    /// Request rejected as unauthorized
    #[error("unauthorized by timetable API")]
    Unauthorized,

    /// Client could not be set up or is no longer usable
    #[error("client error: {0}")]
    Client(String),
}
