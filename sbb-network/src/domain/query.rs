//! Query units.
//!
//! A `Combination` is an (origin, destination, date) triple; a
//! `ConnectionQuery` pins it to a clock time and a result cap, which is
//! exactly what one request to the timetable service needs.

use chrono::NaiveDate;

use super::{StationName, TimeOfDay};

/// Error returned when origin and destination are the same station.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("origin and destination are both {0}")]
pub struct SameStation(pub StationName);

/// One unit of query work: a directed station pair on a date.
///
/// # Examples
///
/// ```
/// use sbb_network::domain::{Combination, StationName};
/// use chrono::NaiveDate;
///
/// let basel = StationName::parse("Basel").unwrap();
/// let bern = StationName::parse("Bern").unwrap();
/// let date = NaiveDate::from_ymd_opt(2020, 3, 9).unwrap();
///
/// let combo = Combination::new(basel.clone(), bern, date).unwrap();
/// assert_eq!(combo.date_string(), "2020-03-09");
///
/// assert!(Combination::new(basel.clone(), basel, date).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combination {
    origin: StationName,
    destination: StationName,
    date: NaiveDate,
}

impl Combination {
    /// Create a combination, rejecting origin == destination.
    pub fn new(
        origin: StationName,
        destination: StationName,
        date: NaiveDate,
    ) -> Result<Self, SameStation> {
        if origin == destination {
            return Err(SameStation(origin));
        }
        Ok(Self {
            origin,
            destination,
            date,
        })
    }

    pub fn origin(&self) -> &StationName {
        &self.origin
    }

    pub fn destination(&self) -> &StationName {
        &self.destination
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the date as an ISO calendar date (`YYYY-MM-DD`).
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// A single request to the timetable service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionQuery {
    pub combination: Combination,
    /// Earliest departure time on the combination's date
    pub time: TimeOfDay,
    /// Maximum number of journeys to ask for
    pub limit: u8,
}

impl ConnectionQuery {
    pub fn new(combination: Combination, time: TimeOfDay, limit: u8) -> Self {
        Self {
            combination,
            time,
            limit,
        }
    }

    pub fn origin(&self) -> &StationName {
        self.combination.origin()
    }

    pub fn destination(&self) -> &StationName {
        self.combination.destination()
    }

    pub fn date(&self) -> NaiveDate {
        self.combination.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, 9).unwrap()
    }

    #[test]
    fn combination_accessors() {
        let combo = Combination::new(name("Luzern"), name("Davos"), date()).unwrap();
        assert_eq!(combo.origin().as_str(), "Luzern");
        assert_eq!(combo.destination().as_str(), "Davos");
        assert_eq!(combo.date(), date());
    }

    #[test]
    fn same_station_rejected() {
        let err = Combination::new(name("Genf"), name("Genf"), date()).unwrap_err();
        assert_eq!(err.to_string(), "origin and destination are both Genf");
    }

    #[test]
    fn direction_matters() {
        let ab = Combination::new(name("Basel"), name("Bern"), date()).unwrap();
        let ba = Combination::new(name("Bern"), name("Basel"), date()).unwrap();
        assert_ne!(ab, ba);
    }

    #[test]
    fn date_string_is_iso() {
        let d = NaiveDate::from_ymd_opt(2020, 5, 4).unwrap();
        let combo = Combination::new(name("Basel"), name("Bern"), d).unwrap();
        assert_eq!(combo.date_string(), "2020-05-04");
    }

    #[test]
    fn query_delegates_to_combination() {
        let combo = Combination::new(name("Basel"), name("Zürich"), date()).unwrap();
        let query = ConnectionQuery::new(combo, TimeOfDay::from_hm(13, 0).unwrap(), 15);
        assert_eq!(query.origin().as_str(), "Basel");
        assert_eq!(query.destination().as_str(), "Zürich");
        assert_eq!(query.date(), date());
        assert_eq!(query.time.to_string(), "13:00");
        assert_eq!(query.limit, 15);
    }
}
