use lazy_static::lazy_static;
use regex::Regex;

/// Decimal degrees, latitude first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon(f64, f64);

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon(lat, lon)
    }

    pub fn lat(self) -> f64 {
        self.0
    }

    pub fn lon(self) -> f64 {
        self.1
    }

    /// Decodes a coordinate pair as matched in bulletin text.
    ///
    /// Ex: `47-30N 052-15W`, `28-00.5N 090-00.25W`, `31-53-00.51N 095-10-30W`
    ///
    /// The fraction belongs to the seconds when they are given and to the
    /// minutes otherwise. Returns `None` for anything out of range.
    pub fn from_navtex(pair: &str) -> Option<Self> {
        let mut halves = pair.split_whitespace();
        let lat = parse_half(halves.next()?, ('N', 'S'), 90.0)?;
        let lon = parse_half(halves.next()?, ('E', 'W'), 180.0)?;

        if halves.next().is_some() {
            return None;
        }

        Some(LatLon(lat, lon))
    }

    /// WKT axis order, longitude first.
    pub fn to_wkt(self) -> String {
        format!("{} {}", self.1, self.0)
    }
}

fn parse_half(half: &str, (positive, negative): (char, char), max: f64) -> Option<f64> {
    fn to_dd(d: f64, m: f64, s: f64) -> f64 {
        d + m / 60.0 + s / 3600.0
    }

    lazy_static! {
        static ref HALF_REGEX: Regex =
            Regex::new(r"^(\d{1,3})-(\d{2})(?:-(\d{2}))?(\.\d+)?([NSEW])$").unwrap();
    }

    let cap = HALF_REGEX.captures(half)?;
    let d: f64 = cap[1].parse().ok()?;
    let mut m: f64 = cap[2].parse().ok()?;
    let mut s: f64 = match cap.get(3) {
        Some(sec) => sec.as_str().parse().ok()?,
        None => 0.0,
    };

    if let Some(frac) = cap.get(4) {
        let frac: f64 = format!("0{}", frac.as_str()).parse().ok()?;
        if cap.get(3).is_some() {
            s += frac;
        } else {
            m += frac;
        }
    }

    if m >= 60.0 || s >= 60.0 {
        return None;
    }

    let dd = to_dd(d, m, s);
    if dd > max {
        return None;
    }

    let dir = cap[5].chars().next()?;
    if dir == positive {
        Some(dd)
    } else if dir == negative {
        Some(-dd)
    } else {
        None
    }
}
