use alloc::borrow::ToOwned;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::*;
use crate::{LikenessError, LikenessResult};

/// A candidate together with its likeness against every other candidate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub value: String,
    pub total_likeness: usize,
    /// Largest likeness this candidate could have with any peer.
    pub max_likeness: usize,
    pub likeness_by_peer: BTreeMap<String, usize>,
    /// Peers grouped by their exact likeness, each group in input order.
    pub peers_by_likeness: BTreeMap<usize, Vec<String>>,
}

impl ScoredCandidate {
    fn new(value: String) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    fn record(&mut self, peer: &str, likeness: usize, max_likeness: usize) {
        self.total_likeness += likeness;
        self.max_likeness = self.max_likeness.max(max_likeness);
        self.likeness_by_peer.insert(peer.to_owned(), likeness);
        self.peers_by_likeness
            .entry(likeness)
            .or_default()
            .push(peer.to_owned());
    }

    pub fn likeness_to(&self, peer: &str) -> Option<usize> {
        self.likeness_by_peer.get(peer).copied()
    }

    pub fn peers_with_likeness(&self, likeness: usize) -> &[String] {
        self.peers_by_likeness
            .get(&likeness)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Candidates ranked by total likeness, best guess first.
///
/// Ties keep the order in which candidates were submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    ranked: Vec<ScoredCandidate>,
}

impl Scoreboard {
    /// Scores already normalized candidates. Repeated values count once.
    pub fn score<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut ranked: Vec<ScoredCandidate> = collapse_duplicates(candidates)
            .into_iter()
            .map(ScoredCandidate::new)
            .collect();
        let lengths: Vec<usize> = ranked.iter().map(|c| c.value.chars().count()).collect();

        for i in 0..ranked.len() {
            for j in (i + 1)..ranked.len() {
                let (head, tail) = ranked.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);

                let value = likeness(&a.value, &b.value);
                let max_likeness = lengths[i].min(lengths[j]);
                a.record(&b.value, value, max_likeness);
                b.record(&a.value, value, max_likeness);
                log::trace!("likeness({:?}, {:?}) = {}", a.value, b.value, value);
            }
        }

        // stable, so ties stay in input order
        ranked.sort_by(|a, b| b.total_likeness.cmp(&a.total_likeness));
        log::debug!("Scored {} candidates", ranked.len());

        Self { ranked }
    }

    /// Normalizes raw input lines and scores them.
    pub fn submit<I, S>(raw_lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::score(normalize_candidates(raw_lines))
    }

    pub fn ranked(&self) -> &[ScoredCandidate] {
        &self.ranked
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn get(&self, value: &str) -> Option<&ScoredCandidate> {
        self.ranked.iter().find(|candidate| candidate.value == value)
    }

    pub fn best_guess(&self) -> Option<&ScoredCandidate> {
        self.ranked.first()
    }

    /// Peers of `target` whose likeness to it is exactly `observed`.
    pub fn refine(&self, target: &str, observed: i32) -> LikenessResult<Vec<String>> {
        let candidate = self
            .get(target)
            .ok_or_else(|| LikenessError::NotFound(target.to_owned()))?;

        let max = candidate.max_likeness;
        let likeness = usize::try_from(observed)
            .ok()
            .filter(|&likeness| likeness <= max)
            .ok_or(LikenessError::InvalidLikeness { observed, max })?;

        Ok(candidate.peers_with_likeness(likeness).to_vec())
    }

    /// Narrows the pool with one observed likeness and scores what is left.
    pub fn report_likeness(&self, target: &str, observed: i32) -> LikenessResult<Self> {
        let pool = self.refine(target, observed)?;
        log::debug!(
            "{target:?} has likeness {observed}, {} of {} candidates remain",
            pool.len(),
            self.len()
        );
        Ok(Self::score(pool))
    }
}
