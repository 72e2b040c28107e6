#![forbid(unsafe_code)]

//! String similarity for fuzzy catalog search.
//!
//! [`similarity`] maps a pair of strings to a score in `[0, 1]`:
//!
//! | Case                                   | Score                          |
//! |----------------------------------------|--------------------------------|
//! | equal                                  | `1.0`                          |
//! | one contains the other                 | `0.8`                          |
//! | otherwise                              | `1 - levenshtein / max_len`    |
//!
//! The flat `0.8` for substring hits is a ranking policy: a short query that
//! appears verbatim in a long title outranks a title that is merely a few
//! edits away, regardless of how much of the title the query covers. The
//! empty string is contained in every string, so it scores `0.8` against any
//! non-empty one.

pub mod fold;
pub mod levenshtein;
pub mod similarity;

pub use fold::{CaseFolding, fold};
pub use levenshtein::levenshtein;
pub use similarity::{EXACT_SCORE, SUBSTRING_SCORE, Scorer, similarity, similarity_with};
