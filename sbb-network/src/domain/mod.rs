//! Domain types for the network sampler.
//!
//! This module contains the validated values that flow through the
//! pipeline: station names and query times on the way in, journeys and
//! stop visits on the way back from the timetable service.

mod journey;
mod query;
mod station;
mod stop;
mod time;

pub use journey::{Journey, Leg, Section};
pub use query::{Combination, ConnectionQuery, SameStation};
pub use station::{Coordinate, InvalidStationName, Station, StationName};
pub use stop::StopVisit;
pub use time::{TimeError, TimeOfDay, Timestamp};
