//! Well-Known Text for parsed locations.

use std::f64::consts::PI;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::geo::LatLon;
use crate::location::{LocationType, LocationWithType};

const METERS_PER_DEGREE: f64 = 111_320.0;
const CIRCLE_VERTICES: usize = 36;

fn point(p: LatLon) -> String {
    format!("POINT ({})", p.to_wkt())
}

fn line_string(points: &[LatLon]) -> String {
    format!("LINESTRING ({})", points.iter().map(|p| p.to_wkt()).join(", "))
}

fn polygon(ring: &[LatLon]) -> String {
    format!("POLYGON (({}))", ring.iter().map(|p| p.to_wkt()).join(", "))
}

// Flat-earth approximation, good enough for warning radii of a few miles.
fn buffer(center: LatLon, radius: f64) -> Vec<LatLon> {
    let lat_scale = radius / METERS_PER_DEGREE;
    let lon_scale = radius / (METERS_PER_DEGREE * center.lat().to_radians().cos());

    let mut ring: Vec<LatLon> = (0..CIRCLE_VERTICES)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / CIRCLE_VERTICES as f64;
            LatLon::new(
                center.lat() + lat_scale * angle.cos(),
                center.lon() + lon_scale * angle.sin(),
            )
        })
        .collect();
    ring.push(ring[0]);
    ring
}

impl LocationWithType {
    /// Decodes every point, failing on the first one that is malformed.
    pub fn lat_lons(&self) -> Result<Vec<LatLon>> {
        self.points
            .iter()
            .map(|p| {
                LatLon::from_navtex(p).ok_or_else(|| Error::InvalidCoordinate { token: p.clone() })
            })
            .collect()
    }

    /// Renders the location as WKT. Shapes without enough points degrade to
    /// the next simpler geometry, and a circle without a usable radius is
    /// just its centre.
    pub fn to_wkt(&self) -> Result<String> {
        let mut points = self.lat_lons()?;
        if points.is_empty() {
            return Ok("POINT EMPTY".to_string());
        }

        let wkt = match self.location_type {
            LocationType::Point if points.len() == 1 => point(points[0]),
            LocationType::Point => format!(
                "MULTIPOINT ({})",
                points.iter().map(|p| format!("({})", p.to_wkt())).join(", ")
            ),
            LocationType::LineString if points.len() == 1 => point(points[0]),
            LocationType::LineString => line_string(&points),
            LocationType::Polygon => {
                if points.len() > 1 && points.first() == points.last() {
                    points.pop();
                }
                match points.len() {
                    1 => point(points[0]),
                    2 => line_string(&points),
                    _ => {
                        points.push(points[0]);
                        polygon(&points)
                    }
                }
            }
            // no longitude scale at the poles
            LocationType::Circle => match self.distance_in_meters() {
                Some(radius) if radius > 0.0 && points[0].lat().abs() < 90.0 => {
                    polygon(&buffer(points[0], radius))
                }
                _ => point(points[0]),
            },
        };

        Ok(wkt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(points: &[&str], location_type: LocationType, distance: Option<&str>) -> LocationWithType {
        LocationWithType::new(
            points.iter().map(|p| p.to_string()).collect(),
            location_type,
            None,
            distance.map(str::to_string),
        )
    }

    #[test]
    fn renders_points() {
        let single = location(&["47-30N 052-15W"], LocationType::Point, None);
        assert_eq!(single.to_wkt().unwrap(), "POINT (-52.25 47.5)");

        let many = location(&["47-30N 052-15W", "10-00S 020-00E"], LocationType::Point, None);
        assert_eq!(many.to_wkt().unwrap(), "MULTIPOINT ((-52.25 47.5), (20 -10))");
    }

    #[test]
    fn renders_line_string() {
        let track = location(&["10-00N 070-00W", "11-00N 071-00W"], LocationType::LineString, None);
        assert_eq!(track.to_wkt().unwrap(), "LINESTRING (-70 10, -71 11)");
    }

    #[test]
    fn closes_polygon_ring() {
        let area = location(
            &["28-00N 090-00W", "28-00N 089-00W", "27-00N 089-00W", "27-00N 090-00W"],
            LocationType::Polygon,
            None,
        );
        assert_eq!(
            area.to_wkt().unwrap(),
            "POLYGON ((-90 28, -89 28, -89 27, -90 27, -90 28))"
        );

        let closed = location(
            &["28-00N 090-00W", "28-00N 089-00W", "27-00N 089-00W", "28-00N 090-00W"],
            LocationType::Polygon,
            None,
        );
        assert_eq!(closed.to_wkt().unwrap(), "POLYGON ((-90 28, -89 28, -89 27, -90 28))");
    }

    #[test]
    fn small_polygon_degrades() {
        let two = location(&["28-00N 090-00W", "28-00N 089-00W"], LocationType::Polygon, None);
        assert_eq!(two.to_wkt().unwrap(), "LINESTRING (-90 28, -89 28)");
    }

    #[test]
    fn circle_buffers_center() {
        let circle = location(&["00-00N 010-00E"], LocationType::Circle, Some("1 MILE"));
        let wkt = circle.to_wkt().unwrap();
        assert!(wkt.starts_with("POLYGON (("));
        assert_eq!(wkt.matches(',').count(), CIRCLE_VERTICES);

        let ring = buffer(LatLon::new(0.0, 10.0), 1852.0);
        let north = ring[0];
        assert!((north.lat() - 1852.0 / METERS_PER_DEGREE).abs() < 1e-12);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn circle_without_radius_is_center() {
        let circle = location(&["00-00N 010-00E"], LocationType::Circle, Some("WIDE BERTH"));
        assert_eq!(circle.to_wkt().unwrap(), "POINT (10 0)");
    }

    #[test]
    fn circle_at_pole_is_center() {
        let north = location(&["90-00N 000-00E"], LocationType::Circle, Some("1 MILE"));
        assert_eq!(north.to_wkt().unwrap(), "POINT (0 90)");

        let south = location(&["90-00S 045-00W"], LocationType::Circle, Some("1 MILE"));
        assert_eq!(south.to_wkt().unwrap(), "POINT (-45 -90)");
    }

    #[test]
    fn malformed_point_is_an_error() {
        let bad = location(&["95-00N 010-00E"], LocationType::Point, None);
        match bad.to_wkt() {
            Err(Error::InvalidCoordinate { token }) => assert_eq!(token, "95-00N 010-00E"),
            other => panic!("expected InvalidCoordinate, got {:?}", other),
        }
    }
}
