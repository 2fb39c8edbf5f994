//! Timetable API response DTOs.
//!
//! These types map directly to the `/connections` JSON response of the
//! Swiss public transport API. They use `Option` liberally because the
//! service sends `null` for anything it does not know, including station
//! coordinates and stop times.

use serde::Deserialize;

/// Response from `GET /connections`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionsResponse {
    /// Found connections, in the order the service ranked them.
    #[serde(default)]
    pub connections: Vec<ConnectionDto>,

    /// Resolved origin.
    pub from: Option<LocationDto>,

    /// Resolved destination.
    pub to: Option<LocationDto>,
}

/// One connection (itinerary) between origin and destination.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionDto {
    /// Departure checkpoint at the origin.
    pub from: Option<CheckpointDto>,

    /// Arrival checkpoint at the destination.
    pub to: Option<CheckpointDto>,

    /// Total duration, e.g. "00d01:03:00".
    pub duration: Option<String>,

    /// Number of changes.
    pub transfers: Option<u32>,

    /// Products used, e.g. ["IC 3", "S 12"].
    #[serde(default)]
    pub products: Vec<String>,

    /// Legs and walks making up the connection.
    #[serde(default)]
    pub sections: Vec<SectionDto>,
}

/// One section of a connection: a vehicle journey or a walk.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionDto {
    /// The vehicle journey; `null` for walking sections.
    pub journey: Option<JourneyDto>,

    /// Boarding checkpoint.
    pub departure: Option<CheckpointDto>,

    /// Alighting checkpoint.
    pub arrival: Option<CheckpointDto>,
}

/// A vehicle journey within a section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDto {
    /// Display name, e.g. "IC 3".
    pub name: Option<String>,

    /// Category, e.g. "IC", "S", "B".
    pub category: Option<String>,

    /// Train or line number.
    pub number: Option<String>,

    /// Operating company.
    pub operator: Option<String>,

    /// Final destination of the vehicle.
    pub to: Option<String>,

    /// Stops served within this section, in travel order.
    #[serde(default)]
    pub pass_list: Vec<CheckpointDto>,
}

/// A stop with its scheduled times.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckpointDto {
    /// The station served.
    pub station: Option<LocationDto>,

    /// Scheduled arrival, e.g. "2020-03-09T09:30:00+0100".
    pub arrival: Option<String>,

    /// Scheduled departure.
    pub departure: Option<String>,

    /// Platform.
    pub platform: Option<String>,
}

/// A station, address or point of interest.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationDto {
    /// Service identifier (UIC number for stations).
    pub id: Option<String>,

    /// Display name.
    pub name: Option<String>,

    /// Position.
    pub coordinate: Option<CoordinateDto>,
}

/// A position. For WGS84, `x` is latitude and `y` is longitude.
#[derive(Debug, Clone, Deserialize)]
pub struct CoordinateDto {
    /// Reference system, normally "WGS84".
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub x: Option<f64>,

    pub y: Option<f64>,
}
