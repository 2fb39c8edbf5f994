//! Journey types.
//!
//! A `Journey` is one itinerary returned by the timetable service: an
//! ordered list of sections, each of which is either a vehicle leg with
//! its stop list or a walk between stops.

use super::StopVisit;

/// A vehicle leg: the ordered stops of one train, bus or boat.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Service name as shown to passengers (e.g. "IC 1 712"), if known
    pub name: Option<String>,
    /// Stops in travel order
    pub stops: Vec<StopVisit>,
}

impl Leg {
    pub fn new(stops: Vec<StopVisit>) -> Self {
        Self { name: None, stops }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One section of a journey.
///
/// Walking sections have no leg and contribute no stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub leg: Option<Leg>,
}

impl Section {
    /// A section travelled on a vehicle.
    pub fn ride(leg: Leg) -> Self {
        Self { leg: Some(leg) }
    }

    /// A section travelled on foot.
    pub fn walk() -> Self {
        Self { leg: None }
    }

    /// Returns true if this is a walking section.
    pub fn is_walk(&self) -> bool {
        self.leg.is_none()
    }
}

/// One itinerary for a query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Journey {
    pub sections: Vec<Section>,
}

impl Journey {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Journey with a single vehicle leg.
    pub fn single_leg(stops: Vec<StopVisit>) -> Self {
        Self::new(vec![Section::ride(Leg::new(stops))])
    }

    /// Iterate over every stop of every leg, in travel order.
    ///
    /// Section and leg boundaries are not visible in the output.
    ///
    /// # Examples
    ///
    /// ```
    /// use sbb_network::domain::{Journey, Leg, Section, Station, StopVisit};
    ///
    /// let stop = |name: &str| StopVisit::new(Station::new(name, None));
    /// let journey = Journey::new(vec![
    ///     Section::ride(Leg::new(vec![stop("Basel SBB"), stop("Olten")])),
    ///     Section::walk(),
    ///     Section::ride(Leg::new(vec![stop("Olten"), stop("Bern")])),
    /// ]);
    ///
    /// let names: Vec<_> = journey.stops().map(|s| s.station_name()).collect();
    /// assert_eq!(names, ["Basel SBB", "Olten", "Olten", "Bern"]);
    /// ```
    pub fn stops(&self) -> impl Iterator<Item = &StopVisit> {
        self.sections
            .iter()
            .filter_map(|section| section.leg.as_ref())
            .flat_map(|leg| leg.stops.iter())
    }

    /// Returns the number of stops across all legs.
    pub fn stop_count(&self) -> usize {
        self.stops().count()
    }

    /// Returns the number of vehicle legs.
    pub fn leg_count(&self) -> usize {
        self.sections.iter().filter(|s| !s.is_walk()).count()
    }
}
