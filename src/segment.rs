//! Splits bulletin text into its heading, its numbered or lettered sections,
//! and the sentences inside them.

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SECTION_START: Regex = Regex::new(r"(?m)^[1A]\. ").unwrap();
    static ref LETTER_START: Regex = Regex::new(r"(?m)^\bA\. ").unwrap();
    static ref LETTER_LABEL: Regex = Regex::new(r"\b[A-Z]\. ").unwrap();
    static ref NUMBER_LABEL: Regex = Regex::new(r"\b[0-9]+\. ").unwrap();
}

fn non_empty(s: &str) -> Option<String> {
    Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string)
}

fn split_at_first(text: &str, pattern: &Regex) -> (Option<String>, Option<String>) {
    match pattern.find(text) {
        Some(m) => (non_empty(&text[..m.start()]), non_empty(&text[m.start()..])),
        None => (non_empty(text), None),
    }
}

/// Heading is everything before the first line starting with `1. ` or `A. `.
pub fn split_heading_and_sections(text: &str) -> (Option<String>, Option<String>) {
    split_at_first(text, &SECTION_START)
}

/// Like [`split_heading_and_sections`], but only a line starting with `A. `
/// ends the heading.
pub fn split_letters_from_heading(text: &str) -> (Option<String>, Option<String>) {
    split_at_first(text, &LETTER_START)
}

/// Joins the lines of `text` and splits it on `". "`. Every sentence ends in a
/// period.
pub fn split_sentences(text: &str) -> Vec<String> {
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .join(" ");

    joined
        .split(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.ends_with('.') {
                s.to_string()
            } else {
                format!("{}.", s)
            }
        })
        .collect()
}

/// One chunk per letter label (`A. `, `B. `, ...).
pub fn split_letters(text: &str) -> Vec<String> {
    split_labelled(text, &LETTER_LABEL)
}

/// One chunk per number label (`1. `, `2. `, ...).
pub fn split_numbers(text: &str) -> Vec<String> {
    split_labelled(text, &NUMBER_LABEL)
}

// A label counts only at the start of the text or after whitespace. The first
// one always opens a chunk; any later one ends the chunk before it only when a
// word follows it. Text ahead of the first label is kept as its own chunk.
fn split_labelled(text: &str, label: &Regex) -> Vec<String> {
    let mut starts: Vec<usize> = Vec::new();
    for m in label.find_iter(text) {
        let after_space = m.start() == 0 || text[..m.start()].ends_with(char::is_whitespace);
        let word_follows = text[m.end()..].starts_with(|c: char| c.is_alphanumeric() || c == '_');
        if after_space && (starts.is_empty() || word_follows) {
            starts.push(m.start());
        }
    }

    let preamble_end = starts.first().copied().unwrap_or(text.len());
    let preamble = non_empty(&text[..preamble_end]);

    let chunks = starts.iter().enumerate().filter_map(|(i, &start)| {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        non_empty(&text[start..end])
    });

    preamble.into_iter().chain(chunks).collect()
}
