//! Timetable HTTP client.
//!
//! Provides async methods for querying the `/connections` endpoint.
//! Handles concurrency limiting and conversion to domain types.

use std::sync::Arc;

use reqwest::StatusCode;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{ConnectionQuery, Journey};

use super::convert::convert_connections;
use super::error::TimetableError;
use super::types::ConnectionsResponse;

/// Default base URL for the Swiss public transport API.
const DEFAULT_BASE_URL: &str = "https://transport.opendata.ch/v1";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the timetable client.
#[derive(Debug, Clone)]
pub struct TimetableConfig {
    /// Base URL for the API (defaults to transport.opendata.ch)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TimetableConfig {
    /// Create a new config pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Timetable API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct TimetableClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl TimetableClient {
    /// Create a new timetable client with the given configuration.
    pub fn new(config: TimetableConfig) -> Result<Self, TimetableError> {
        if config.max_concurrent == 0 {
            return Err(TimetableError::Client(
                "max_concurrent must be at least 1".to_string(),
            ));
        }
        if config.timeout_secs == 0 {
            return Err(TimetableError::Client(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Get journeys for a query.
    ///
    /// Returns up to `query.limit` journeys departing at or after
    /// `query.time` on the query date, in the order the service returned
    /// them. A response with any unconvertible connection is an error.
    pub async fn connections(&self, query: &ConnectionQuery) -> Result<Vec<Journey>, TimetableError> {
        let response = self.connections_raw(query).await?;
        let journeys = convert_connections(&response)?;

        debug!(
            origin = %query.origin(),
            destination = %query.destination(),
            date = %query.date(),
            time = %query.time,
            journeys = journeys.len(),
            "received connections"
        );

        Ok(journeys)
    }

    /// Get the raw `/connections` response (for debugging/testing).
    pub async fn connections_raw(
        &self,
        query: &ConnectionQuery,
    ) -> Result<ConnectionsResponse, TimetableError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TimetableError::Client("semaphore closed".to_string()))?;

        let url = format!("{}/connections", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&query_params(query))
            .send()
            .await?;

        let status = response.status();
        let body = if status.is_success() {
            response.text().await?
        } else {
            response.text().await.unwrap_or_default()
        };

        decode_response(status, body)
    }
}

/// Longest body excerpt kept in a JSON error.
const BODY_EXCERPT_CHARS: usize = 500;

/// Map a `/connections` status and body to a response or an error.
fn decode_response(status: StatusCode, body: String) -> Result<ConnectionsResponse, TimetableError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(TimetableError::Unauthorized);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(TimetableError::RateLimited);
    }

    if !status.is_success() {
        return Err(TimetableError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_str(&body).map_err(|e| TimetableError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
    })
}

/// Query string for `/connections`.
fn query_params(query: &ConnectionQuery) -> [(&'static str, String); 5] {
    [
        ("from", query.origin().to_string()),
        ("to", query.destination().to_string()),
        ("date", query.combination.date_string()),
        ("time", query.time.to_string()),
        ("limit", query.limit.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Combination, StationName, TimeOfDay};

    #[test]
    fn config_builder() {
        let config = TimetableConfig::new()
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = TimetableConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = TimetableClient::new(TimetableConfig::new());
        assert!(client.is_ok());
    }

    #[test]
    fn client_rejects_zero_concurrency() {
        let client = TimetableClient::new(TimetableConfig::new().with_max_concurrent(0));
        assert!(matches!(client, Err(TimetableError::Client(_))));
    }

    #[test]
    fn trailing_slash_trimmed() {
        let client =
            TimetableClient::new(TimetableConfig::new().with_base_url("http://localhost/v1/"))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost/v1");
    }

    #[test]
    fn query_string() {
        let combo = Combination::new(
            StationName::parse("Basel").unwrap(),
            StationName::parse("Zürich").unwrap(),
            chrono::NaiveDate::from_ymd_opt(2020, 3, 9).unwrap(),
        )
        .unwrap();
        let query = ConnectionQuery::new(combo, TimeOfDay::from_hm(0, 0).unwrap(), 15);

        let params = query_params(&query);
        assert_eq!(params[0], ("from", "Basel".to_string()));
        assert_eq!(params[1], ("to", "Zürich".to_string()));
        assert_eq!(params[2], ("date", "2020-03-09".to_string()));
        assert_eq!(params[3], ("time", "00:00".to_string()));
        assert_eq!(params[4], ("limit", "15".to_string()));
    }

    #[test]
    fn client_rejects_zero_timeout() {
        let client = TimetableClient::new(TimetableConfig::new().with_timeout(0));
        assert!(matches!(client, Err(TimetableError::Client(_))));
    }

    #[test]
    fn auth_statuses_map_to_unauthorized() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let result = decode_response(status, "denied".into());
            assert!(matches!(result, Err(TimetableError::Unauthorized)));
        }
    }

    #[test]
    fn too_many_requests_maps_to_rate_limited() {
        let result = decode_response(StatusCode::TOO_MANY_REQUESTS, String::new());
        assert!(matches!(result, Err(TimetableError::RateLimited)));
    }

    #[test]
    fn other_error_status_keeps_body() {
        let result = decode_response(StatusCode::BAD_GATEWAY, "upstream down".into());
        match result {
            Err(TimetableError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("expected Api error, got {other:?}"),
        }

        let result = decode_response(StatusCode::NOT_FOUND, String::new());
        assert!(matches!(result, Err(TimetableError::Api { status: 404, .. })));
    }

    #[test]
    fn undecodable_body_is_truncated() {
        let body = "x".repeat(2000);
        match decode_response(StatusCode::OK, body) {
            Err(TimetableError::Json { body: Some(excerpt), .. }) => {
                assert_eq!(excerpt.chars().count(), BODY_EXCERPT_CHARS);
            }
            other => panic!("expected Json error, got {other:?}"),
        }

        // Multi-byte characters are not split
        let body = "ü".repeat(600);
        match decode_response(StatusCode::OK, body) {
            Err(TimetableError::Json { body: Some(excerpt), .. }) => {
                assert_eq!(excerpt, "ü".repeat(BODY_EXCERPT_CHARS));
            }
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn success_body_decodes() {
        let response = decode_response(
            StatusCode::OK,
            r#"{"connections": [{"sections": []}, {"sections": []}]}"#.into(),
        )
        .unwrap();
        assert_eq!(response.connections.len(), 2);
    }

    // Live API tests would go here; they hit transport.opendata.ch and
    // belong behind #[ignore].
}
