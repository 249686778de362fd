use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use super::fuzzy::token_set_ratio;
use crate::catalog::{Card, Snapshot};

/// How a query was matched to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub card: &'a Card,
    pub kind: MatchKind,
    pub score: u8,
}

/// Maps a query string to at most one card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Resolver {
    /// Minimum fuzzy score (0-100) accepted as a match.
    #[serde(default = "Resolver::default_threshold")]
    pub threshold: u8,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
        }
    }
}

impl Resolver {
    const fn default_threshold() -> u8 {
        50
    }

    #[must_use]
    pub const fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Exact title first, then the best fuzzy title at or above the threshold.
    ///
    /// Fuzzy ties go to the lexicographically smallest title, so the result
    /// does not depend on iteration order. `None` means no adequate match.
    #[must_use]
    pub fn resolve<'a>(&self, query: &str, snapshot: &'a Snapshot) -> Option<Match<'a>> {
        if let Some(card) = snapshot.card(query) {
            return Some(Match {
                card,
                kind: MatchKind::Exact,
                score: 100,
            });
        }

        let (score, card) = snapshot
            .cards()
            .par_iter()
            .map(|(title, card)| (token_set_ratio(query, title), card))
            .reduce_with(better)?;

        if score < self.threshold {
            debug!(
                "Best candidate for {query:?} was {:?} at {score}, below threshold {}",
                card.title, self.threshold
            );
            return None;
        }

        Some(Match {
            card,
            kind: MatchKind::Fuzzy,
            score,
        })
    }
}

/// Higher score wins; equal scores go to the smaller title.
fn better<'a>(a: (u8, &'a Card), b: (u8, &'a Card)) -> (u8, &'a Card) {
    match a.0.cmp(&b.0) {
        Ordering::Greater => a,
        Ordering::Less => b,
        Ordering::Equal => {
            if a.1.title <= b.1.title {
                a
            } else {
                b
            }
        }
    }
}
