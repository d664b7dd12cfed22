//! Coordinate and distance recognizers shared by every section parser.
//!
//! All functions here are total: anything they can't recognise comes back as
//! `None` or an empty list.

use lazy_static::lazy_static;
use regex::Regex;

use crate::numwords::parse_spelled_number;

pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

lazy_static! {
    static ref COORDINATE_PAIR: Regex = Regex::new(
        r"[0-9]{1,3}-[0-9]{2}(?:-[0-9]{2})?(?:\.[0-9]+)?[NS] [0-9]{1,3}-[0-9]{2}(?:-[0-9]{2})?(?:\.[0-9]+)?[EW]"
    )
    .unwrap();
    static ref BERTH: Regex = Regex::new(r".*? BERTH").unwrap();
    static ref WITHIN: Regex = Regex::new(r"WITHIN (.*?) OF").unwrap();
    static ref DISTANCE_UNIT: Regex = Regex::new(r"MILE|METER").unwrap();
    static ref DECIMAL: Regex = Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").unwrap();
}

/// Every coordinate pair in `text`, left to right, as matched.
pub fn extract_coordinate_pairs(text: &str) -> Vec<String> {
    COORDINATE_PAIR
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The distance phrase of a line. A `... BERTH` phrase always wins over
/// `WITHIN ... OF`.
pub fn extract_distance_phrase(line: &str) -> Option<String> {
    if let Some(berth) = BERTH.find(line) {
        return Some(berth.as_str().trim().to_string());
    }

    if line.contains("WITHIN") {
        return WITHIN
            .captures(line)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|phrase| !phrase.is_empty());
    }

    None
}

/// Splits `text` around its coordinate pairs into a description and the
/// pairs themselves. Text before the first pair and after the last one are
/// joined into the description; anything in between is dropped.
pub fn split_description_and_locations(text: &str) -> (Option<String>, Option<Vec<String>>) {
    let matches: Vec<_> = COORDINATE_PAIR.find_iter(text).collect();
    let (first, last) = match (matches.first(), matches.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return (Some(text.to_string()), None),
    };

    let leading = Some(text[..first.start()].trim()).filter(|s| first.start() > 0 && !s.is_empty());
    let trailing = Some(text[last.end()..].trim()).filter(|s| last.end() < text.len() && !s.is_empty());

    let description = match (leading, trailing) {
        (Some(leading), Some(trailing)) => Some(format!("{} {}", leading, trailing)),
        (leading, trailing) => leading.or(trailing).map(str::to_string),
    };

    let locations = matches.iter().map(|m| m.as_str().to_string()).collect();
    (description, Some(locations))
}

/// Converts a distance phrase into meters. `MILE` means nautical miles.
///
/// The words in front of the unit are read backwards, growing the phrase one
/// word at a time; the longest phrase that still reads as a number wins, so
/// `3 TO 5 MILE` is 5 miles and `TWENTY FIVE METER` is 25 meters.
// TODO: check the backward scan against a corpus of recorded bulletins; it can
// over- or under-read ambiguous spelled-out numbers.
pub fn to_meters(distance: &str) -> Option<f64> {
    let unit = DISTANCE_UNIT.find(distance)?;
    let tokens: Vec<&str> = distance[..unit.start()].split(' ').collect();

    let mut value = None;
    for start in (0..tokens.len()).rev() {
        let phrase = tokens[start..].join(" ");
        if let Some(number) = parse_number(phrase.trim()) {
            value = Some(number);
        }
    }

    match unit.as_str() {
        "MILE" => value.map(|nm| nm * METERS_PER_NAUTICAL_MILE),
        _ => value,
    }
}

fn parse_number(phrase: &str) -> Option<f64> {
    if phrase.is_empty() {
        return None;
    }

    if DECIMAL.is_match(phrase) {
        return phrase.parse().ok();
    }

    parse_spelled_number(phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_pairs_in_order() {
        let pairs = extract_coordinate_pairs(
            "AREA BOUND BY 28-00N 090-00W, 28-00.5N 089-00.25W AND 27-00-30N 089-00-15.5W.",
        );
        assert_eq!(
            pairs,
            vec!["28-00N 090-00W", "28-00.5N 089-00.25W", "27-00-30N 089-00-15.5W"]
        );
    }

    #[test]
    fn pairs_do_not_merge_across_bulletins() {
        let a = "POSITION 47-30N 052-15W.";
        let b = "TRACKLINE 10-00S 020-00E, 11-00S 021-00E.";
        let joined = format!("{}\n{}", a, b);

        let mut separate = extract_coordinate_pairs(a);
        separate.extend(extract_coordinate_pairs(b));
        assert_eq!(extract_coordinate_pairs(&joined), separate);
    }

    #[test]
    fn ignores_half_pairs() {
        assert!(extract_coordinate_pairs("LIGHT AT 47-30N UNLIT").is_empty());
        assert!(extract_coordinate_pairs("47-30E 052-15N").is_empty());
    }

    #[test]
    fn berth_wins_over_within() {
        assert_eq!(
            extract_distance_phrase("WITHIN 2 MILES OF VESSEL. 5 MILE BERTH REQUESTED."),
            Some("WITHIN 2 MILES OF VESSEL. 5 MILE BERTH".to_string())
        );
        assert_eq!(
            extract_distance_phrase("WIDE BERTH REQUESTED"),
            Some("WIDE BERTH".to_string())
        );
    }

    #[test]
    fn within_reads_up_to_of() {
        assert_eq!(
            extract_distance_phrase("AREA WITHIN 10 MILES OF 47-30N 052-15W."),
            Some("10 MILES".to_string())
        );
        assert_eq!(extract_distance_phrase("WITHIN THE HARBOUR"), None);
        assert_eq!(extract_distance_phrase("NO DISTANCE HERE"), None);
    }

    #[test]
    fn splits_description_around_pairs() {
        let (description, locations) =
            split_description_and_locations("WRECK IN 47-30N 052-15W, 47-31N 052-16W MARKED.");
        assert_eq!(description.as_deref(), Some("WRECK IN MARKED."));
        assert_eq!(
            locations,
            Some(vec!["47-30N 052-15W".to_string(), "47-31N 052-16W".to_string()])
        );
    }

    #[test]
    fn description_omitted_when_pairs_fill_text() {
        let (description, locations) = split_description_and_locations("47-30N 052-15W");
        assert_eq!(description, None);
        assert_eq!(locations.map(|l| l.len()), Some(1));

        let (description, _) = split_description_and_locations("47-30N 052-15W.");
        assert_eq!(description.as_deref(), Some("."));
    }

    #[test]
    fn text_without_pairs_is_all_description() {
        let (description, locations) = split_description_and_locations("CANCEL THIS MSG.");
        assert_eq!(description.as_deref(), Some("CANCEL THIS MSG."));
        assert_eq!(locations, None);
    }

    #[test]
    fn converts_units() {
        assert_eq!(to_meters("5 MILE"), Some(9260.0));
        assert_eq!(to_meters("500 METER"), Some(500.0));
        assert_eq!(to_meters("2.5 MILES"), Some(4630.0));
        assert_eq!(to_meters("no numbers here"), None);
        assert_eq!(to_meters("GIVE A WIDE BERTH"), None);
    }

    #[test]
    fn keeps_last_number_found_reading_backwards() {
        assert_eq!(to_meters("3 TO 5 MILE BERTH"), Some(5.0 * 1852.0));
        assert_eq!(to_meters("TWENTY FIVE METER BERTH"), Some(25.0));
        assert_eq!(to_meters("A ONE HUNDRED METERS"), Some(100.0));
        assert_eq!(to_meters("2 NAUTICAL MILE BERTH"), None);
    }
}
