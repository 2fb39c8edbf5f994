//! Station types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Error returned when parsing an invalid station name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStationName {
    reason: &'static str,
}

/// A station name as passed to the timetable service.
///
/// Station names are free text ("Zürich", "Basel SBB"), so the only
/// guarantees are that the name is non-empty and carries no surrounding
/// whitespace. The service resolves names to stations itself.
///
/// # Examples
///
/// ```
/// use sbb_network::domain::StationName;
///
/// let zurich = StationName::parse(" Zürich ").unwrap();
/// assert_eq!(zurich.as_str(), "Zürich");
///
/// assert!(StationName::parse("").is_err());
/// assert!(StationName::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationName(String);

impl StationName {
    /// Parse a station name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationName> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationName {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidStationName {
                reason: "must not contain control characters",
            });
        }

        Ok(StationName(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for StationName {
    type Err = InvalidStationName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for StationName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StationName::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns true if both components are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// A station as reported by the timetable service.
///
/// Unlike [`StationName`], this is whatever the service returned: the
/// coordinate may be missing for stops the service has no geodata for.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Display name
    pub name: String,
    /// Position, if the service knows it
    pub coordinate: Option<Coordinate>,
}

impl Station {
    pub fn new(name: impl Into<String>, coordinate: Option<Coordinate>) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_names() {
        assert!(StationName::parse("Basel").is_ok());
        assert!(StationName::parse("Zürich HB").is_ok());
        assert!(StationName::parse("Genève-Aéroport").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let name = StationName::parse("  Bern\t").unwrap();
        assert_eq!(name.as_str(), "Bern");
    }

    #[test]
    fn reject_empty() {
        assert!(StationName::parse("").is_err());
        assert!(StationName::parse(" \t ").is_err());
    }

    #[test]
    fn reject_control_characters() {
        assert!(StationName::parse("Ba\nsel").is_err());
        assert!(StationName::parse("Lu\0zern").is_err());
    }

    #[test]
    fn display_and_debug() {
        let name = StationName::parse("Davos").unwrap();
        assert_eq!(format!("{}", name), "Davos");
        assert_eq!(format!("{:?}", name), "StationName(Davos)");
    }

    #[test]
    fn deserialize_validates() {
        let name: StationName = serde_json::from_str(r#"" Locarno ""#).unwrap();
        assert_eq!(name.as_str(), "Locarno");

        assert!(serde_json::from_str::<StationName>(r#""""#).is_err());
    }

    #[test]
    fn coordinate_bounds() {
        assert!(Coordinate::new(47.547408, 7.589563).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(90.5, 7.0).is_valid());
        assert!(!Coordinate::new(47.0, -180.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 7.0).is_valid());
        assert!(!Coordinate::new(47.0, f64::INFINITY).is_valid());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Parsing is idempotent: a parsed name parses to itself
        #[test]
        fn parse_idempotent(s in "[A-Za-zÀ-ÿ .-]{1,30}") {
            if let Ok(name) = StationName::parse(&s) {
                let again = StationName::parse(name.as_str()).unwrap();
                prop_assert_eq!(again, name);
            }
        }

        /// Surrounding whitespace never changes the parsed name
        #[test]
        fn whitespace_insensitive(s in "[A-Za-z]{1,20}", pad in "[ \t]{0,4}") {
            let padded = format!("{pad}{s}{pad}");
            prop_assert_eq!(
                StationName::parse(&padded).unwrap(),
                StationName::parse(&s).unwrap()
            );
        }

        /// Any in-range coordinate is valid
        #[test]
        fn in_range_coordinates_valid(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert!(Coordinate::new(lat, lon).is_valid());
        }
    }
}
