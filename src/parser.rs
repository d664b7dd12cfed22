//! The bulletin parser proper.
//!
//! A bulletin is read in one forward pass: the heading first, then each
//! numbered or lettered section in order. The parser collects metadata and
//! locations as it goes and folds them into a [`MappedLocation`] at the end.

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::extract::{extract_coordinate_pairs, extract_distance_phrase, split_description_and_locations};
use crate::location::{classify_location_type, LocationType, LocationWithType, MappedLocation};
use crate::segment::{
    split_heading_and_sections, split_letters, split_letters_from_heading, split_numbers,
    split_sentences,
};

lazy_static! {
    static ref DNC: Regex = Regex::new(r"(DNC ){1}[0-9]*").unwrap();
    static ref CHART: Regex = Regex::new(r"(CHART ){1}[0-9]*").unwrap();
}

/// Parser state for a single bulletin.
///
/// Parsing consumes the parser, so every text gets a fresh instance.
#[derive(Debug)]
pub struct NavtexParser<'a> {
    text: &'a str,
    area_name: Option<String>,
    specific_area: Option<String>,
    subject: Option<String>,
    extras: Vec<String>,
    chart: Option<String>,
    dnc: Option<String>,
    current_location_type: LocationType,
    first_distance: Option<String>,
    number_distance: Option<String>,
    locations: Vec<LocationWithType>,
}

impl<'a> NavtexParser<'a> {
    pub fn new(text: &'a str) -> Self {
        NavtexParser {
            text,
            area_name: None,
            specific_area: None,
            subject: None,
            extras: Vec::new(),
            chart: None,
            dnc: None,
            current_location_type: LocationType::default(),
            first_distance: None,
            number_distance: None,
            locations: Vec::new(),
        }
    }

    pub fn parse_to_mapped_location(mut self) -> MappedLocation {
        let (heading, sections) = split_heading_and_sections(self.text);

        if let Some(heading) = heading {
            self.parse_heading(&split_sentences(&heading));
        }

        if let Some(sections) = sections {
            if sections.starts_with("1.") {
                let chunks = split_numbers(&sections);
                debug!("Parsing {} numbered sections", chunks.len());
                for chunk in &chunks {
                    self.parse_number_section(chunk);
                }
            } else if sections.starts_with("A.") {
                let chunks = split_letters(&sections);
                debug!("Parsing {} lettered sections", chunks.len());
                for chunk in &chunks {
                    self.parse_letter_section(chunk, None);
                }
            } else {
                debug!("Ignoring sections without a 1. or A. label");
            }
        }

        debug!("Found {} locations", self.locations.len());
        self.into_mapped_location()
    }

    fn classify(&mut self, line: &str) {
        classify_location_type(line, &mut self.current_location_type);
    }

    fn emit(&mut self, points: Vec<String>, description: Option<String>, distance: Option<String>) {
        trace!(
            "{} with {} points: {:?}",
            self.current_location_type,
            points.len(),
            description
        );
        self.locations.push(LocationWithType::new(
            points,
            self.current_location_type,
            description,
            distance,
        ));
    }

    fn parse_heading(&mut self, sentences: &[String]) {
        self.first_distance = extract_distance_phrase(&sentences.join(" "));

        let mut points = Vec::new();
        for sentence in sentences {
            self.classify(sentence);

            let mut sentence = sentence.clone();
            take_reference(&DNC, &mut sentence, &mut self.dnc);
            take_reference(&CHART, &mut sentence, &mut self.chart);
            if sentence.is_empty() {
                continue;
            }

            points.extend(extract_coordinate_pairs(&sentence));

            if self.area_name.is_none() {
                self.area_name = Some(sentence);
            } else if self.specific_area.is_none() {
                self.specific_area = Some(sentence);
            } else if self.subject.is_none() {
                self.subject = Some(sentence);
            } else {
                self.extras.push(sentence);
            }
        }

        if !points.is_empty() {
            let (subject, distance) = (self.subject.clone(), self.first_distance.clone());
            self.emit(points, subject, distance);
        }
    }

    fn parse_number_section(&mut self, section: &str) {
        let (heading, letters) = split_letters_from_heading(section);

        self.number_distance = heading.as_deref().and_then(extract_distance_phrase);

        if let Some(heading) = &heading {
            let distance = self
                .number_distance
                .clone()
                .or_else(|| self.first_distance.clone());
            self.extras.push(heading.clone());

            let (description, points) = split_description_and_locations(heading);
            if let Some(description) = &description {
                self.classify(description);
            }
            if self.subject.is_none() {
                self.subject = description.clone();
            }
            if let Some(points) = points {
                self.emit(points, description.or_else(|| Some(heading.clone())), distance);
            }
        }

        if let Some(letters) = letters {
            for chunk in split_letters(&letters) {
                self.parse_letter_section(&chunk, heading.as_deref());
            }
        }
    }

    fn parse_letter_section(&mut self, section: &str, inherited: Option<&str>) {
        let mut description: Vec<String> = inherited.map(str::to_string).into_iter().collect();
        let distance = extract_distance_phrase(section)
            .or_else(|| self.number_distance.clone())
            .or_else(|| self.first_distance.clone());

        let sentences = split_sentences(section);
        self.extras.extend(sentences.iter().cloned());

        let mut pending: Vec<String> = Vec::new();
        for sentence in &sentences {
            // a bare label such as "B." closes the locations collected so far
            if !sentence.contains(' ') && !pending.is_empty() {
                self.flush(&mut pending, &mut description, &distance);
                continue;
            }

            let (fragment, points) = split_description_and_locations(sentence);
            if let Some(fragment) = fragment {
                self.classify(&fragment);
                description.push(fragment);
            }
            if let Some(points) = points {
                pending.extend(points);
            }
        }

        if !pending.is_empty() {
            self.flush(&mut pending, &mut description, &distance);
        }
    }

    fn flush(
        &mut self,
        pending: &mut Vec<String>,
        description: &mut Vec<String>,
        distance: &Option<String>,
    ) {
        let joined = description.iter().map(|d| d.trim()).join(" ");
        let joined = Some(joined).filter(|d| !d.is_empty());
        self.emit(std::mem::take(pending), joined, distance.clone());
        description.clear();
    }

    fn into_mapped_location(self) -> MappedLocation {
        MappedLocation {
            location_name: self.area_name,
            specific_area: self.specific_area,
            subject: self.subject,
            cancel_time: None,
            locations: self.locations,
            extra: self.extras.join("\n"),
            dnc: self.dnc,
            chart: self.chart,
        }
    }
}

// Moves the first `pattern` match (and one period right after it) out of
// `sentence`. `slot` only takes the first value ever seen.
fn take_reference(pattern: &Regex, sentence: &mut String, slot: &mut Option<String>) {
    let (start, mut end, value) = match pattern.find(sentence) {
        Some(m) => (m.start(), m.end(), m.as_str().trim().to_string()),
        None => return,
    };

    if slot.is_none() {
        *slot = Some(value);
    }

    if sentence[end..].starts_with('.') {
        end += 1;
    }
    sentence.replace_range(start..end, "");
    *sentence = sentence.trim().to_string();
}
