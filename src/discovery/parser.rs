//! Cascade parser for model output
//!
//! The model is cooperative but not always well-formed: the array may come
//! bare, wrapped in prose, or inside a markdown fence. Strategies run in fixed
//! order and the first one that yields a valid JSON array wins. Elements of
//! that array are typed one at a time; an off-schema record is dropped
//! without discarding its well-formed siblings.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::types::PlaceOfInterest;

/// One extraction attempt over raw model text
pub type Strategy = fn(&str) -> Option<Vec<PlaceOfInterest>>;

/// Strategies in priority order, tagged for logging and tests
pub const STRATEGIES: [(&str, Strategy); 3] = [
    ("whole_body", parse_whole_body),
    ("bracket_array", parse_bracket_array),
    ("fenced_block", parse_fenced_block),
];

/// Greedy: first `[` through last `]`
static ARRAY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

/// Triple-backtick block, optionally tagged `json`
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").unwrap());

fn parse_array(candidate: &str, strategy: &str) -> Option<Vec<PlaceOfInterest>> {
    let records = match serde_json::from_str::<Vec<serde_json::Value>>(candidate) {
        Ok(records) => records,
        Err(e) => {
            debug!(strategy, error = %e, "Extraction strategy found no JSON array");
            return None;
        }
    };

    let total = records.len();
    let places: Vec<PlaceOfInterest> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(place) => Some(place),
            Err(e) => {
                warn!(strategy, index, error = %e, "Dropping off-schema place record");
                None
            }
        })
        .collect();

    if places.len() < total {
        warn!(
            strategy,
            kept = places.len(),
            rejected = total - places.len(),
            "Some place records did not match the schema"
        );
    }
    Some(places)
}

/// The entire text is a JSON array
pub fn parse_whole_body(text: &str) -> Option<Vec<PlaceOfInterest>> {
    parse_array(text, "whole_body")
}

/// A bracket-delimited array somewhere in the text
pub fn parse_bracket_array(text: &str) -> Option<Vec<PlaceOfInterest>> {
    let found = ARRAY_RE.find(text)?;
    parse_array(found.as_str(), "bracket_array")
}

/// The interior of the first fenced code block
pub fn parse_fenced_block(text: &str) -> Option<Vec<PlaceOfInterest>> {
    let caps = FENCE_RE.captures(text)?;
    parse_array(caps.get(1)?.as_str(), "fenced_block")
}

/// Run `strategies` in order; return the winning tag and its places
pub fn parse_cascade(
    strategies: &[(&'static str, Strategy)],
    text: &str,
) -> Option<(&'static str, Vec<PlaceOfInterest>)> {
    for &(name, attempt) in strategies {
        if let Some(places) = attempt(text) {
            debug!(strategy = name, count = places.len(), "Parsed places from model text");
            return Some((name, places));
        }
    }

    warn!(
        strategies = strategies.len(),
        preview = %&text[..floor_char_boundary(text, 200)],
        "No extraction strategy produced a places array"
    );
    None
}

/// Parse places with the default strategy order
pub fn parse_places(text: &str) -> Option<Vec<PlaceOfInterest>> {
    parse_cascade(&STRATEGIES, text).map(|(_, places)| places)
}

fn floor_char_boundary(text: &str, max: usize) -> usize {
    if text.len() <= max {
        return text.len();
    }
    (0..=max).rev().find(|&i| text.is_char_boundary(i)).unwrap_or(0)
}
