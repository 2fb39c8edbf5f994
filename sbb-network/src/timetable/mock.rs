//! Mock timetable for testing without API access.
//!
//! Serves canned journeys per (origin, destination) pair, either built in
//! code or loaded from saved `/connections` responses on disk.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{ConnectionQuery, Journey, StationName};

use super::convert::{RejectedConnection, convert_connections};
use super::error::TimetableError;
use super::types::ConnectionsResponse;

type Route = (StationName, StationName);

/// Mock timetable that answers from memory.
///
/// Every date and time for a route gets the same journeys. Routes with no
/// canned data return an empty list; routes marked as failing return an
/// API error, and saved responses that do not convert return the
/// conversion error.
#[derive(Debug, Default)]
pub struct MockTimetable {
    routes: HashMap<Route, Result<Vec<Journey>, RejectedConnection>>,
    failing: HashSet<Route>,
    calls: AtomicUsize,
}

impl MockTimetable {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `journeys` for every query from `origin` to `destination`.
    pub fn with_route(
        mut self,
        origin: StationName,
        destination: StationName,
        journeys: Vec<Journey>,
    ) -> Self {
        self.routes.insert((origin, destination), Ok(journeys));
        self
    }

    /// Fail every query from `origin` to `destination`.
    pub fn with_failing_route(mut self, origin: StationName, destination: StationName) -> Self {
        self.failing.insert((origin, destination));
        self
    }

    /// Load saved responses from a directory.
    ///
    /// Expects files named `{origin}__{destination}.json` (e.g.
    /// `Basel__Bern.json`), each holding a raw `/connections` response.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            TimetableError::Client(format!("failed to read mock data directory: {}", e))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                TimetableError::Client(format!("failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let route = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(parse_route)
                .ok_or_else(|| {
                    TimetableError::Client(format!("invalid mock filename: {:?}", path))
                })?;

            let json = std::fs::read_to_string(&path)
                .map_err(|e| TimetableError::Client(format!("failed to read {:?}: {}", path, e)))?;

            let response: ConnectionsResponse =
                serde_json::from_str(&json).map_err(|e| TimetableError::Json {
                    message: format!("{:?}: {}", path, e),
                    body: None,
                })?;

            mock.routes.insert(route, convert_connections(&response));
        }

        if mock.routes.is_empty() {
            return Err(TimetableError::Client(format!(
                "no mock response files found in {:?}",
                data_dir
            )));
        }

        Ok(mock)
    }

    /// Answer a query.
    ///
    /// Mimics `TimetableClient::connections`. Journeys are truncated to the
    /// query limit.
    pub async fn connections(&self, query: &ConnectionQuery) -> Result<Vec<Journey>, TimetableError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let route = (query.origin().clone(), query.destination().clone());

        if self.failing.contains(&route) {
            return Err(TimetableError::Api {
                status: 500,
                message: format!("mock failure for {} -> {}", route.0, route.1),
            });
        }

        match self.routes.get(&route) {
            Some(Ok(journeys)) => Ok(journeys
                .iter()
                .take(usize::from(query.limit))
                .cloned()
                .collect()),
            Some(Err(rejected)) => Err(TimetableError::Conversion(rejected.clone())),
            None => Ok(Vec::new()),
        }
    }

    /// Number of queries answered so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

/// Parse `Origin__Destination` into a route.
fn parse_route(stem: &str) -> Option<Route> {
    let (origin, destination) = stem.split_once("__")?;
    Some((
        StationName::parse(origin).ok()?,
        StationName::parse(destination).ok()?,
    ))
}
