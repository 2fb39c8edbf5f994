//! Swiss public transport timetable client.
//!
//! This module provides an HTTP client for the `/connections` endpoint of
//! the public transport API (transport.opendata.ch), which plans journeys
//! between two stations on the SBB network.
//!
//! Key characteristics of the service:
//! - Stations are queried by free-text name; the service resolves them
//! - Results are capped per request (at most 16 connections)
//! - Stop times are full timestamps with a UTC offset
//! - Coordinates and stop times are `null` when unknown

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{TimetableClient, TimetableConfig};
pub use convert::{ConversionError, RejectedConnection, convert_connection, convert_connections};
pub use error::TimetableError;
pub use mock::MockTimetable;
pub use types::{
    CheckpointDto, ConnectionDto, ConnectionsResponse, CoordinateDto, JourneyDto, LocationDto,
    SectionDto,
};
