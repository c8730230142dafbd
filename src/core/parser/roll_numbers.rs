//! Roll-number input parsing
//!
//! Turns free-text or tabular operator input into a deduplicated, ordered
//! list of candidate identifiers. No identifier-shape validation happens
//! here; [`is_valid_roll_number`] is a separate pure predicate the caller
//! may apply.

use std::collections::HashSet;
use tracing::debug;

/// Split free text into candidate roll numbers.
///
/// Splits on any run of commas, whitespace, newlines, or tabs, trims each
/// token, discards empties, and deduplicates while preserving first-seen
/// order.
pub fn parse_free_text(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for token in input.split(|c: char| c == ',' || c.is_whitespace()) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if seen.insert(token.to_string()) {
            candidates.push(token.to_string());
        }
    }

    debug!(candidates = candidates.len(), "parsed free-text input");
    candidates
}

/// Extract candidate roll numbers from comma-separated tabular content.
///
/// Optionally discards a header line, then takes the first non-empty column
/// of each remaining line (quotes stripped) as the candidate identifier.
/// Lines with no non-empty column are silently skipped. Deduplicates while
/// preserving first-seen order.
pub fn parse_tabular(content: &str, has_header: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    let skip = usize::from(has_header);
    for line in content.lines().skip(skip) {
        let Some(candidate) = line
            .split(',')
            .map(strip_cell)
            .find(|cell| !cell.is_empty())
        else {
            continue;
        };
        if seen.insert(candidate.clone()) {
            candidates.push(candidate);
        }
    }

    debug!(candidates = candidates.len(), "parsed tabular input");
    candidates
}

/// Pure shape check for a single identifier: alphanumeric, length >= 3.
pub fn is_valid_roll_number(candidate: &str) -> bool {
    candidate.len() >= 3 && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

fn strip_cell(cell: &str) -> String {
    cell.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}
