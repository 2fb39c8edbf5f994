//! SBB network sampler.
//!
//! Queries the Swiss public transport timetable for every ordered pair of a
//! set of stations across a date range, and flattens the returned journeys
//! into a table of stop-to-stop edges with coordinates and times.

pub mod cli;
pub mod domain;
pub mod logging;
pub mod network;
pub mod timetable;
