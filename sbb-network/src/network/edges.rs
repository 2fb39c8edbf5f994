//! Journey-to-edge transformation.
//!
//! The stops of every journey returned for one query are flattened into a
//! single sequence, and each stop becomes one edge whose `to` is inferred
//! by looking one stop ahead:
//!
//! - a stop with an arrival but no departure ends its journey, so `to` is
//!   the `end-station` sentinel;
//! - any other stop points at the next stop in the flattened sequence,
//!   even when it has no times at all;
//! - the last stop has nothing ahead of it and gets `None`.
//!
//! Because flattening ignores leg boundaries, the last stop of one leg
//! without an arrival time can point at the first stop of the next journey.
//! That edge is wrong but kept; the table is a sample, not a timetable.

use std::fmt;
use std::iter::Peekable;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::domain::{Journey, StopVisit, Timestamp};

/// `to` label for a stop where the journey terminates.
pub const END_STATION: &str = "end-station";

/// Placeholder for an absent time or an unresolvable `to`.
pub const MISSING: &str = "None";

/// Where an edge leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStop {
    /// The next stop in the flattened sequence
    Station(String),
    /// The journey ends here
    EndStation,
    /// Last stop of the sequence without being terminal
    Unresolved,
}

impl NextStop {
    pub fn as_str(&self) -> &str {
        match self {
            NextStop::Station(name) => name,
            NextStop::EndStation => END_STATION,
            NextStop::Unresolved => MISSING,
        }
    }
}

impl fmt::Display for NextStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NextStop {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Lookahead adapter pairing each stop with its inferred next stop.
pub struct WithNextStop<I: Iterator> {
    stops: Peekable<I>,
}

impl<'a, I: Iterator<Item = &'a StopVisit>> Iterator for WithNextStop<I> {
    type Item = (&'a StopVisit, NextStop);

    fn next(&mut self) -> Option<Self::Item> {
        let stop = self.stops.next()?;

        let next = if stop.is_terminal() {
            NextStop::EndStation
        } else {
            match self.stops.peek() {
                Some(ahead) => NextStop::Station(ahead.station_name().to_string()),
                None => NextStop::Unresolved,
            }
        };

        Some((stop, next))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stops.size_hint()
    }
}

/// Pair each stop with its inferred next stop.
///
/// # Examples
///
/// ```
/// use sbb_network::domain::{Station, StopVisit, Timestamp};
/// use sbb_network::network::{NextStop, with_next_stop};
///
/// let ts = |s| Timestamp::parse(s).unwrap();
/// let stops = vec![
///     StopVisit::new(Station::new("Basel SBB", None)).with_departure(ts("2020-03-09T09:00:00+0100")),
///     StopVisit::new(Station::new("Olten", None)).with_arrival(ts("2020-03-09T09:25:00+0100")),
/// ];
///
/// let next: Vec<_> = with_next_stop(stops.iter()).map(|(_, n)| n).collect();
/// assert_eq!(next, [NextStop::Station("Olten".into()), NextStop::EndStation]);
/// ```
pub fn with_next_stop<'a, I>(stops: I) -> WithNextStop<I::IntoIter>
where
    I: IntoIterator<Item = &'a StopVisit>,
{
    WithNextStop {
        stops: stops.into_iter().peekable(),
    }
}

/// A stop visit that cannot become an edge.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EdgeError {
    #[error("station {station} has no coordinate")]
    MissingCoordinate { station: String },

    #[error("station {station} has invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { station: String, lat: f64, lon: f64 },
}

/// One row of the network table: a directed hop from a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub from: String,
    pub arrival: String,
    pub departure: String,
    pub lat: f64,
    pub lon: f64,
    pub to: NextStop,
}

impl EdgeRecord {
    /// Build a record from a stop and its inferred next stop.
    ///
    /// Fails if the stop has no usable coordinate.
    pub fn from_visit(stop: &StopVisit, to: NextStop) -> Result<Self, EdgeError> {
        let station = stop.station_name();

        let coordinate = stop
            .station
            .coordinate
            .ok_or_else(|| EdgeError::MissingCoordinate {
                station: station.to_string(),
            })?;

        if !coordinate.is_valid() {
            return Err(EdgeError::InvalidCoordinate {
                station: station.to_string(),
                lat: coordinate.lat,
                lon: coordinate.lon,
            });
        }

        Ok(Self {
            from: station.to_string(),
            arrival: format_time(stop.arrival),
            departure: format_time(stop.departure),
            lat: coordinate.lat,
            lon: coordinate.lon,
            to,
        })
    }
}

fn format_time(time: Option<Timestamp>) -> String {
    time.map_or_else(|| MISSING.to_string(), |t| t.to_string())
}

/// Edges built from one query's journeys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeBatch {
    pub edges: Vec<EdgeRecord>,
    /// Stop visits dropped for bad station data
    pub rejected: usize,
}

/// Flatten the journeys of one query into edge records.
///
/// Next-stop inference runs over every stop, so a stop rejected for a bad
/// coordinate still names the `to` of the stop before it.
pub fn build_edges(journeys: &[Journey]) -> EdgeBatch {
    let mut batch = EdgeBatch::default();

    for (stop, next) in with_next_stop(journeys.iter().flat_map(|j| j.stops())) {
        match EdgeRecord::from_visit(stop, next) {
            Ok(edge) => batch.edges.push(edge),
            Err(e) => {
                warn!(error = %e, "skipping stop visit");
                batch.rejected += 1;
            }
        }
    }

    batch
}

/// All edges accumulated over a run, in accumulation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkTable {
    records: Vec<EdgeRecord>,
}

impl NetworkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records at the end of the table.
    pub fn append(&mut self, records: impl IntoIterator<Item = EdgeRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[EdgeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EdgeRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<EdgeRecord> {
        self.records
    }
}
