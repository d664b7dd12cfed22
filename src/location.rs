use std::fmt;

use derive_builder::Builder;
use lazy_static::lazy_static;
use regex::Regex;

use crate::extract::to_meters;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum LocationType {
    #[default]
    Point,
    LineString,
    Polygon,
    Circle,
}

impl From<LocationType> for &'static str {
    fn from(x: LocationType) -> Self {
        match x {
            LocationType::Point => "Point",
            LocationType::LineString => "LineString",
            LocationType::Polygon => "Polygon",
            LocationType::Circle => "Circle",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).into())
    }
}

impl LocationType {
    /// The geometry a line announces, if it names one. First match wins:
    /// `AREA BOUND`, `AREA WITHIN`, `TRACKLINE`, `POSITION`.
    pub fn from_keywords(line: &str) -> Option<LocationType> {
        lazy_static! {
            static ref AREA_BOUND: Regex = Regex::new(r"AREAS? BOUND").unwrap();
            static ref AREA_WITHIN: Regex = Regex::new(r"AREAS? WITHIN").unwrap();
        }

        if AREA_BOUND.is_match(line) {
            Some(LocationType::Polygon)
        } else if AREA_WITHIN.is_match(line) {
            Some(LocationType::Circle)
        } else if line.contains("TRACKLINE") {
            Some(LocationType::LineString)
        } else if line.contains("POSITION") {
            Some(LocationType::Point)
        } else {
            None
        }
    }
}

/// Updates `current` from the keywords in `line` and returns it. A line with
/// no keyword leaves `current` as it was.
pub fn classify_location_type(line: &str, current: &mut LocationType) -> LocationType {
    if let Some(location_type) = LocationType::from_keywords(line) {
        *current = location_type;
    }
    *current
}

/// One geographic feature found in a bulletin. `points` hold the coordinate
/// pairs exactly as written, in text order.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationWithType {
    pub points: Vec<String>,
    pub location_type: LocationType,
    pub location_description: Option<String>,
    pub distance_from_location: Option<String>,
}

impl LocationWithType {
    pub fn new(
        points: Vec<String>,
        location_type: LocationType,
        location_description: Option<String>,
        distance_from_location: Option<String>,
    ) -> Self {
        LocationWithType {
            points,
            location_type,
            location_description,
            distance_from_location,
        }
    }

    /// Radius in meters, read from the distance phrase.
    pub fn distance_in_meters(&self) -> Option<f64> {
        self.distance_from_location.as_deref().and_then(to_meters)
    }
}

/// Everything parsed out of one bulletin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappedLocation {
    pub location_name: Option<String>,
    pub specific_area: Option<String>,
    pub subject: Option<String>,
    /// Never set by the parser; filled in by callers from the warning record.
    pub cancel_time: Option<String>,
    pub locations: Vec<LocationWithType>,
    pub extra: String,
    pub dnc: Option<String>,
    pub chart: Option<String>,
}

/// Fields to replace on an existing [`MappedLocation`]. Unset fields are left
/// alone; `locations` are appended.
#[derive(Builder, Clone, Debug, Default, PartialEq)]
#[builder(default, setter(into, strip_option))]
pub struct MappedLocationOverrides {
    pub location_name: Option<String>,
    pub specific_area: Option<String>,
    pub subject: Option<String>,
    pub cancel_time: Option<String>,
    pub locations: Option<Vec<LocationWithType>>,
    pub extra: Option<String>,
    pub dnc: Option<String>,
    pub chart: Option<String>,
}

impl MappedLocation {
    pub fn with_overrides(&self, overrides: MappedLocationOverrides) -> MappedLocation {
        let mut locations = self.locations.clone();
        if let Some(more) = overrides.locations {
            locations.extend(more);
        }

        MappedLocation {
            location_name: overrides.location_name.or_else(|| self.location_name.clone()),
            specific_area: overrides.specific_area.or_else(|| self.specific_area.clone()),
            subject: overrides.subject.or_else(|| self.subject.clone()),
            cancel_time: overrides.cancel_time.or_else(|| self.cancel_time.clone()),
            locations,
            extra: overrides.extra.unwrap_or_else(|| self.extra.clone()),
            dnc: overrides.dnc.or_else(|| self.dnc.clone()),
            chart: overrides.chart.or_else(|| self.chart.clone()),
        }
    }
}
