//! Query space generation.
//!
//! Every ordered pair of distinct stations is sampled on a weekly cadence
//! across the configured date range. Pairs are directed because a
//! connection from A to B says nothing about one from B to A.

use chrono::NaiveDate;

use crate::domain::{Combination, StationName};

/// Days between sampled dates.
pub const SAMPLE_INTERVAL_DAYS: usize = 7;

/// Bounds of the query space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpace {
    /// First sampled date.
    pub start: NaiveDate,
    /// End of the range, exclusive.
    pub end: NaiveDate,
    /// Stations to pair up, in output order.
    pub stations: Vec<StationName>,
}

impl QuerySpace {
    pub fn new(start: NaiveDate, end: NaiveDate, stations: Vec<StationName>) -> Self {
        Self {
            start,
            end,
            stations,
        }
    }

    /// Dates in `[start, end)`, every `SAMPLE_INTERVAL_DAYS` days from `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sbb_network::network::QuerySpace;
    /// use chrono::NaiveDate;
    ///
    /// let d = |m, d| NaiveDate::from_ymd_opt(2020, m, d).unwrap();
    /// let space = QuerySpace::new(d(3, 9), d(3, 24), vec![]);
    /// assert_eq!(space.sample_dates(), vec![d(3, 9), d(3, 16), d(3, 23)]);
    /// ```
    pub fn sample_dates(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .step_by(SAMPLE_INTERVAL_DAYS)
            .take_while(|date| *date < self.end)
            .collect()
    }

    /// Generate every combination in this space.
    pub fn combinations(&self) -> Vec<Combination> {
        generate_combinations(self)
    }
}

/// Generate all (origin, destination, date) triples with origin ≠ destination.
///
/// Order is origin-major, destination-minor, date-innermost. An empty or
/// single-station list yields nothing, as does an empty date range.
pub fn generate_combinations(space: &QuerySpace) -> Vec<Combination> {
    let dates = space.sample_dates();
    let n = space.stations.len();
    let mut combinations = Vec::with_capacity(n * n.saturating_sub(1) * dates.len());

    for origin in &space.stations {
        for destination in &space.stations {
            if origin == destination {
                continue;
            }
            for date in &dates {
                if let Ok(combination) = Combination::new(origin.clone(), destination.clone(), *date)
                {
                    combinations.push(combination);
                }
            }
        }
    }

    combinations
}
