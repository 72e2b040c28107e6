#![forbid(unsafe_code)]

//! Memoizing front-end for single-key ranking.
//!
//! Typing in a search box re-submits recent queries constantly (backspace,
//! retype). [`MemoRanker`] keeps the index-level results of the most recent
//! queries in an LRU cache and returns them verbatim when the same query is
//! asked again against the same corpus. Queries are keyed exactly as given,
//! since surrounding whitespace changes their scores.
//!
//! # Invariants
//!
//! 1. Output is identical to [`match_single_key`] for the same inputs.
//! 2. A cached entry is only reused while the corpus generation and length
//!    match the ones it was computed against.
//!
//! # Failure Modes
//!
//! - **Corpus mutated in place without [`MemoRanker::invalidate`]**: results
//!   may be stale if the length did not change. Callers that edit records
//!   must invalidate.

use std::num::NonZeroUsize;

use lru::LruCache;
use shelf_core::Record;

use crate::options::SearchOptions;
use crate::rank::{Matches, Ranking, is_blank, match_single_key};

/// Cache diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Queries answered from the cache.
    pub hits: u64,
    /// Queries that had to be ranked.
    pub misses: u64,
}

impl MemoStats {
    /// Fraction of non-blank queries answered from the cache.
    #[must_use]
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Single-key ranker that memoizes recent queries.
#[derive(Debug)]
pub struct MemoRanker {
    options: SearchOptions,
    cache: Option<LruCache<String, Matches>>,
    generation: u64,
    corpus_len: usize,
    stats: MemoStats,
}

impl MemoRanker {
    /// Create a ranker remembering up to `capacity` queries (`0` disables
    /// caching).
    #[must_use]
    pub fn new(options: SearchOptions, capacity: usize) -> Self {
        Self {
            options,
            cache: NonZeroUsize::new(capacity).map(LruCache::new),
            generation: 0,
            corpus_len: 0,
            stats: MemoStats::default(),
        }
    }

    /// The options results are computed with.
    #[must_use]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Replace the options and drop cached results.
    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
        self.invalidate();
    }

    /// Drop cached results (call after mutating the corpus).
    pub fn invalidate(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Current corpus generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    /// Rank `records` against `query`, reusing a cached result if possible.
    pub fn matches<R: Record>(&mut self, records: &[R], query: &str) -> Matches {
        if is_blank(query) {
            return Matches::All;
        }
        if records.len() != self.corpus_len {
            self.invalidate();
            self.corpus_len = records.len();
        }

        if let Some(found) = self.cache.as_mut().and_then(|cache| cache.get(query)) {
            self.stats.hits += 1;
            shelf_core::trace!(query, generation = self.generation, "memo hit");
            return found.clone();
        }

        self.stats.misses += 1;
        shelf_core::trace!(query, generation = self.generation, "memo miss");
        let computed = match_single_key(records, query, &self.options);
        if let Some(cache) = self.cache.as_mut() {
            cache.put(query.to_owned(), computed.clone());
        }
        computed
    }

    /// [`matches`](Self::matches) resolved against `records`.
    pub fn rank<'a, R: Record>(&'a mut self, records: &'a [R], query: &str) -> Ranking<'a, R> {
        let matches = self.matches(records, query);
        matches.resolve(records, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::Document;

    fn books() -> Vec<Document> {
        ["Dune", "Dune Messiah", "Solaris", "Hyperion"]
            .iter()
            .map(|t| Document::new().with("title", *t))
            .collect()
    }

    fn ranker(capacity: usize) -> MemoRanker {
        MemoRanker::new(SearchOptions::new(["title"]).unwrap(), capacity)
    }

    #[test]
    fn repeated_query_hits_cache() {
        let books = books();
        let mut memo = ranker(4);
        let first = memo.matches(&books, "dune");
        let second = memo.matches(&books, "dune");
        assert_eq!(first, second);
        assert_eq!(memo.stats(), MemoStats { hits: 1, misses: 1 });
        assert_eq!(memo.stats().hit_ratio(), 0.5);
    }

    #[test]
    fn padded_query_is_a_separate_entry() {
        let books = books();
        let mut memo = ranker(4);
        let exact = memo.matches(&books, "dune");
        let padded = memo.matches(&books, "dune ");
        assert_eq!(memo.stats(), MemoStats { hits: 0, misses: 2 });
        assert_ne!(exact, padded);
        assert_eq!(padded, match_single_key(&books, "dune ", memo.options()));

        let Matches::Hits(hits) = padded else {
            panic!("padded query must be ranked");
        };
        // "dune " is only a substring of "Dune".
        assert_eq!(hits[0].index, 0);
        assert_eq!(hits[0].score, 0.8);

        let _ = memo.matches(&books, "dune ");
        assert_eq!(memo.stats().hits, 1);
    }

    #[test]
    fn output_matches_uncached_ranking() {
        let books = books();
        let mut memo = ranker(4);
        for q in ["dune", "sol", "dune", "hyper", "sol"] {
            assert_eq!(
                memo.matches(&books, q),
                match_single_key(&books, q, memo.options())
            );
        }
    }

    #[test]
    fn corpus_length_change_invalidates() {
        let mut books = books();
        let mut memo = ranker(4);
        let _ = memo.matches(&books, "dune");
        let generation = memo.generation();
        books.push(Document::new().with("title", "Children of Dune"));
        let after = memo.matches(&books, "dune");
        assert!(memo.generation() > generation);
        assert_eq!(after.len(books.len()), 3);
        assert_eq!(memo.stats().misses, 2);
    }

    #[test]
    fn zero_capacity_never_caches() {
        let books = books();
        let mut memo = ranker(0);
        let _ = memo.matches(&books, "dune");
        let _ = memo.matches(&books, "dune");
        assert_eq!(memo.stats(), MemoStats { hits: 0, misses: 2 });
    }

    #[test]
    fn blank_query_skips_cache() {
        let books = books();
        let mut memo = ranker(4);
        assert_eq!(memo.matches(&books, "  "), Matches::All);
        assert_eq!(memo.stats(), MemoStats::default());
    }

    #[test]
    fn set_options_drops_cache() {
        let books = books();
        let mut memo = ranker(4);
        let _ = memo.matches(&books, "dune");
        memo.set_options(
            SearchOptions::new(["title"])
                .unwrap()
                .with_threshold(0.9)
                .unwrap(),
        );
        let strict = memo.matches(&books, "dune");
        assert_eq!(strict.len(books.len()), 1);
        assert_eq!(memo.stats().misses, 2);
    }

    #[test]
    fn rank_resolves_records() {
        let books = books();
        let mut memo = ranker(4);
        let ranking = memo.rank(&books, "solaris");
        assert_eq!(ranking.results().unwrap()[0].index, 2);
    }
}
