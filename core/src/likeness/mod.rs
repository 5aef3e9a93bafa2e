use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

pub use scoreboard::*;

mod scoreboard;

/// Number of positions at which both strings hold the same character.
///
/// Only the common prefix length is compared, extra characters of the longer string never match.
pub fn likeness(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).filter(|(x, y)| x == y).count()
}

/// Trims and lowercases raw input lines, dropping blanks and repeated entries.
///
/// The first occurrence of a candidate keeps its place in the list.
pub fn normalize_candidates<I, S>(raw_lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    collapse_duplicates(
        raw_lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_lowercase())
            .filter(|candidate| !candidate.is_empty()),
    )
}

pub(crate) fn collapse_duplicates<I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = BTreeSet::new();
    let mut unique = Vec::new();
    for candidate in candidates {
        if seen.insert(candidate.clone()) {
            unique.push(candidate);
        } else {
            log::debug!("Dropping duplicate candidate {candidate:?}");
        }
    }
    unique
}
