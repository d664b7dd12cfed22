#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Location and metadata extraction for NAVTEX navigational warnings.
//!
//! A warning bulletin is free text: a heading naming the area and subject,
//! usually followed by numbered (`1.`, `2.`) or lettered (`A.`, `B.`)
//! sections carrying coordinates. [`parse`] turns one bulletin into a
//! [`MappedLocation`] holding the heading fields and every point, track, area
//! or circle found in the text.
//!
//! ```
//! let warning = "NAVAREA IV.\nGULF OF MEXICO.\nDERELICT IN POSITION 25-30N 080-10W.";
//! let mapped = navtex_parser::parse(warning);
//!
//! assert_eq!(mapped.location_name.as_deref(), Some("NAVAREA IV."));
//! assert_eq!(mapped.locations[0].points, vec!["25-30N 080-10W"]);
//! ```
//!
//! Parsing never fails. Text the parser can't make sense of ends up in
//! [`MappedLocation::extra`] or is dropped.

pub mod bulletin;
pub mod error;
pub mod extract;
pub mod geo;
pub mod location;
mod numwords;
pub mod parser;
pub mod segment;
mod wkt;

pub use error::{Error, Result};
pub use location::{
    LocationType, LocationWithType, MappedLocation, MappedLocationOverrides,
    MappedLocationOverridesBuilder,
};
pub use parser::NavtexParser;

/// Parses one bulletin with a fresh [`NavtexParser`].
pub fn parse(text: &str) -> MappedLocation {
    NavtexParser::new(text).parse_to_mapped_location()
}
