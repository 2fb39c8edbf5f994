//! Conversion from timetable DTOs to domain types.
//!
//! A response converts as a whole. One unparseable connection makes the
//! response malformed: dropping it would splice the neighbouring journeys
//! together in the flattened stop sequence.

use crate::domain::{Coordinate, Journey, Leg, Section, Station, StopVisit, Timestamp};

use super::types::{CheckpointDto, ConnectionDto, ConnectionsResponse, LocationDto, SectionDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse a timestamp string
    #[error("invalid timestamp: {0}")]
    InvalidTime(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// The first connection of a response that failed to convert.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("connection {index}: {source}")]
pub struct RejectedConnection {
    pub index: usize,
    #[source]
    pub source: ConversionError,
}

/// Convert a `/connections` response to journeys, preserving service order.
///
/// Fails on the first connection that cannot be converted.
pub fn convert_connections(
    response: &ConnectionsResponse,
) -> Result<Vec<Journey>, RejectedConnection> {
    response
        .connections
        .iter()
        .enumerate()
        .map(|(index, connection)| {
            convert_connection(connection).map_err(|source| RejectedConnection { index, source })
        })
        .collect()
}

/// Convert a single connection to a journey.
pub fn convert_connection(connection: &ConnectionDto) -> Result<Journey, ConversionError> {
    let sections = connection
        .sections
        .iter()
        .map(convert_section)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Journey::new(sections))
}

fn convert_section(section: &SectionDto) -> Result<Section, ConversionError> {
    let Some(journey) = &section.journey else {
        return Ok(Section::walk());
    };

    let stops = journey
        .pass_list
        .iter()
        .map(convert_checkpoint)
        .collect::<Result<Vec<_>, _>>()?;

    let leg = Leg::new(stops);
    Ok(Section::ride(match &journey.name {
        Some(name) => leg.with_name(name.clone()),
        None => leg,
    }))
}

fn convert_checkpoint(checkpoint: &CheckpointDto) -> Result<StopVisit, ConversionError> {
    let location = checkpoint
        .station
        .as_ref()
        .ok_or(ConversionError::MissingField("station"))?;

    Ok(StopVisit {
        station: convert_location(location)?,
        arrival: parse_timestamp(checkpoint.arrival.as_deref())?,
        departure: parse_timestamp(checkpoint.departure.as_deref())?,
    })
}

fn convert_location(location: &LocationDto) -> Result<Station, ConversionError> {
    // Some stops come back without a name; the id still identifies them
    let name = location
        .name
        .as_deref()
        .or(location.id.as_deref())
        .filter(|n| !n.trim().is_empty())
        .ok_or(ConversionError::MissingField("station name"))?;

    let coordinate = location
        .coordinate
        .as_ref()
        .and_then(|c| Some(Coordinate::new(c.x?, c.y?)));

    Ok(Station::new(name, coordinate))
}

fn parse_timestamp(raw: Option<&str>) -> Result<Option<Timestamp>, ConversionError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => Timestamp::parse(s)
            .map(Some)
            .map_err(|_| ConversionError::InvalidTime(s.to_string())),
    }
}
