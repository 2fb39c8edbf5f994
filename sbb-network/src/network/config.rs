//! Configuration for a network sampling run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{StationName, TimeOfDay};

use super::combinations::QuerySpace;

/// Journeys requested per query.
pub const DEFAULT_LIMIT: u8 = 15;

/// Most journeys the service returns for one request.
pub const MAX_LIMIT: u8 = 16;

/// Queries in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Times of day sampled for every combination: midnight, morning,
/// midday, afternoon and evening.
pub fn default_sample_times() -> Vec<TimeOfDay> {
    [(0, 0), (9, 0), (13, 0), (17, 0), (21, 0)]
        .into_iter()
        .filter_map(|(h, m)| TimeOfDay::from_hm(h, m))
        .collect()
}

/// Configuration errors. These are the only fatal errors of a run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no stations configured")]
    EmptyStations,

    #[error("at least two stations are needed, got {0}")]
    TooFewStations(usize),

    #[error("station {0} is listed more than once")]
    DuplicateStation(StationName),

    #[error("date range is empty: start {start} is not before end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("no sample times configured")]
    EmptyTimes,

    #[error("limit must be between 1 and 16, got {0}")]
    InvalidLimit(u8),

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything a sampling run needs besides the timetable itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// Stations and dates to sample.
    pub query_space: QuerySpace,

    /// Departure times queried for every combination.
    pub times: Vec<TimeOfDay>,

    /// Journeys requested per query.
    pub limit: u8,

    /// Maximum queries in flight.
    pub concurrency: usize,
}

impl NetworkConfig {
    /// Create a configuration with default times, limit and concurrency.
    pub fn new(query_space: QuerySpace) -> Self {
        Self {
            query_space,
            times: default_sample_times(),
            limit: DEFAULT_LIMIT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_times(mut self, times: Vec<TimeOfDay>) -> Self {
        self.times = times;
        self
    }

    pub fn with_limit(mut self, limit: u8) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Number of queries a run will issue.
    pub fn query_count(&self) -> usize {
        let n = self.query_space.stations.len();
        n * n.saturating_sub(1) * self.query_space.sample_dates().len() * self.times.len()
    }

    /// Check the configuration before any query is issued.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let stations = &self.query_space.stations;
        if stations.is_empty() {
            return Err(ConfigError::EmptyStations);
        }
        if stations.len() < 2 {
            return Err(ConfigError::TooFewStations(stations.len()));
        }

        let mut seen = HashSet::new();
        for station in stations {
            if !seen.insert(station) {
                return Err(ConfigError::DuplicateStation(station.clone()));
            }
        }

        let QuerySpace { start, end, .. } = self.query_space;
        if start >= end {
            return Err(ConfigError::InvalidDateRange { start, end });
        }

        if self.times.is_empty() {
            return Err(ConfigError::EmptyTimes);
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ConfigError::InvalidLimit(self.limit));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        Ok(())
    }

    /// Parse a TOML configuration.
    ///
    /// `start`, `end` and `stations` are required; the rest fall back to
    /// the defaults. The result is not validated.
    ///
    /// ```toml
    /// start = "2020-03-09"
    /// end = "2020-05-05"
    /// stations = ["Basel", "Bern", "Zürich"]
    /// times = ["09:00", "17:00"]
    /// limit = 10
    /// concurrency = 2
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(s)?;
        Ok(file.into())
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

/// On-disk layout of the configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    start: NaiveDate,
    end: NaiveDate,
    stations: Vec<StationName>,
    #[serde(default = "default_sample_times")]
    times: Vec<TimeOfDay>,
    #[serde(default = "default_limit")]
    limit: u8,
    #[serde(default = "default_concurrency")]
    concurrency: usize,
}

fn default_limit() -> u8 {
    DEFAULT_LIMIT
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl From<ConfigFile> for NetworkConfig {
    fn from(file: ConfigFile) -> Self {
        NetworkConfig::new(QuerySpace::new(file.start, file.end, file.stations))
            .with_times(file.times)
            .with_limit(file.limit)
            .with_concurrency(file.concurrency)
    }
}
