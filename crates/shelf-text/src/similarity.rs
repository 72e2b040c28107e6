#![forbid(unsafe_code)]

//! Normalized similarity scores.

use crate::fold::{CaseFolding, fold};
use crate::levenshtein::levenshtein;

/// Score for strings that are equal after folding.
pub const EXACT_SCORE: f64 = 1.0;

/// Flat score for a substring hit in either direction.
pub const SUBSTRING_SCORE: f64 = 0.8;

/// Case-insensitive similarity in `[0, 1]`.
///
/// ```
/// use shelf_text::similarity;
///
/// assert_eq!(similarity("Dune", "dune"), 1.0);
/// assert_eq!(similarity("Mars Colony", "mars"), 0.8);
/// assert_eq!(similarity("abcd", "abcf"), 0.75);
/// ```
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_with(a, b, CaseFolding::Insensitive)
}

/// Similarity after applying `policy` to both inputs.
#[must_use]
pub fn similarity_with(a: &str, b: &str, policy: CaseFolding) -> f64 {
    score_folded(&fold(a, policy), &fold(b, policy))
}

/// Score two already-folded strings.
fn score_folded(a: &str, b: &str) -> f64 {
    if a == b {
        return EXACT_SCORE;
    }
    // The empty string is a substring of everything.
    if a.contains(b) || b.contains(a) {
        return SUBSTRING_SCORE;
    }
    // Neither side is empty here.
    let max_len = a.chars().count().max(b.chars().count());
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// A similarity scorer bound to one folding policy.
///
/// Lets callers fold the query once and score it against many candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scorer {
    folding: CaseFolding,
}

impl Scorer {
    /// Create a scorer with the given folding policy.
    #[must_use]
    pub fn new(folding: CaseFolding) -> Self {
        Self { folding }
    }

    /// The folding policy in effect.
    #[must_use]
    pub fn folding(&self) -> CaseFolding {
        self.folding
    }

    /// Fold `text` under this scorer's policy.
    #[must_use]
    pub fn prepare<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        fold(text, self.folding)
    }

    /// Score two raw strings.
    #[must_use]
    pub fn score(&self, a: &str, b: &str) -> f64 {
        similarity_with(a, b, self.folding)
    }

    /// Score a query already passed through [`prepare`](Self::prepare)
    /// against a raw candidate.
    #[must_use]
    pub fn score_prepared(&self, prepared_query: &str, candidate: &str) -> f64 {
        score_folded(prepared_query, &fold(candidate, self.folding))
    }
}
