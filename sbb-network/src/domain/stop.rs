//! Stop visit types.
//!
//! A `StopVisit` is one scheduled stop within a leg, with the arrival and
//! departure the service reported for it.

use super::{Station, Timestamp};

/// A scheduled visit to a stop within a leg.
///
/// # Time Semantics
///
/// - First stop of a leg: only departure is present
/// - Last stop of a leg: only arrival is present
/// - Intermediate stops: both are normally present
/// - Either may be missing when the service has no data for the stop
#[derive(Debug, Clone, PartialEq)]
pub struct StopVisit {
    /// The station visited
    pub station: Station,
    /// Scheduled arrival
    pub arrival: Option<Timestamp>,
    /// Scheduled departure
    pub departure: Option<Timestamp>,
}

impl StopVisit {
    /// Creates a visit with no timing data.
    pub fn new(station: Station) -> Self {
        Self {
            station,
            arrival: None,
            departure: None,
        }
    }

    pub fn with_arrival(mut self, arrival: Timestamp) -> Self {
        self.arrival = Some(arrival);
        self
    }

    pub fn with_departure(mut self, departure: Timestamp) -> Self {
        self.departure = Some(departure);
        self
    }

    /// Returns true if the train terminates here: an arrival but no departure.
    ///
    /// # Examples
    ///
    /// ```
    /// use sbb_network::domain::{Station, StopVisit, Timestamp};
    ///
    /// let arr = Timestamp::parse("2020-03-09T10:00:00+0100").unwrap();
    /// let visit = StopVisit::new(Station::new("Bern", None)).with_arrival(arr);
    /// assert!(visit.is_terminal());
    ///
    /// // Missing both times is not terminal, just unknown
    /// let visit = StopVisit::new(Station::new("Bern", None));
    /// assert!(!visit.is_terminal());
    /// ```
    pub fn is_terminal(&self) -> bool {
        self.departure.is_none() && self.arrival.is_some()
    }

    /// Returns true if neither arrival nor departure is known.
    pub fn is_untimed(&self) -> bool {
        self.arrival.is_none() && self.departure.is_none()
    }

    /// Returns the station name.
    pub fn station_name(&self) -> &str {
        &self.station.name
    }
}
