#![forbid(unsafe_code)]

//! Ranking a record collection against a query.
//!
//! # Invariants
//!
//! 1. Results are sorted by descending score.
//! 2. Equal scores keep their order from the input collection (stable sort).
//! 3. No single-key result scores below the configured threshold.
//! 4. No weighted result averages at or below [`WEIGHTED_FLOOR`].
//! 5. An empty or all-whitespace query bypasses ranking entirely.

use std::sync::Arc;

use shelf_core::{FieldPath, Record};
use shelf_text::Scorer;

use crate::options::{MatchMode, SearchOptions, WEIGHTED_FLOOR, WeightedFields};

/// An index-based match: which record, how well, and through which field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Position of the record in the source collection.
    pub index: usize,
    /// Best similarity over the searched fields.
    pub score: f64,
    /// Position of the winning path in [`SearchOptions::fields`].
    pub field: usize,
}

/// Owned outcome of a single-key search, independent of record lifetimes.
#[derive(Debug, Clone, PartialEq)]
pub enum Matches {
    /// The query was blank; every record passes in its original order.
    All,
    /// Ranked hits.
    Hits(Arc<[Hit]>),
}

impl Matches {
    /// Number of records selected out of a collection of `total`.
    #[must_use]
    pub fn len(&self, total: usize) -> usize {
        match self {
            Self::All => total,
            Self::Hits(hits) => hits.len(),
        }
    }

    /// Source index of the `position`-th selected record.
    #[must_use]
    pub fn source_index(&self, position: usize, total: usize) -> Option<usize> {
        match self {
            Self::All => (position < total).then_some(position),
            Self::Hits(hits) => hits.get(position).map(|hit| hit.index),
        }
    }

    /// Attach records and field paths.
    #[must_use]
    pub fn resolve<'a, R>(&self, records: &'a [R], options: &'a SearchOptions) -> Ranking<'a, R> {
        match self {
            Self::All => Ranking::Unfiltered(records),
            Self::Hits(hits) => Ranking::Scored(
                hits.iter()
                    .map(|hit| SearchResult {
                        index: hit.index,
                        record: &records[hit.index],
                        score: hit.score,
                        field: &options.fields()[hit.field],
                    })
                    .collect(),
            ),
        }
    }
}

/// A ranked record.
#[derive(Debug)]
pub struct SearchResult<'a, R> {
    /// Position of the record in the source collection.
    pub index: usize,
    pub record: &'a R,
    /// Similarity in `[threshold, 1]`.
    pub score: f64,
    /// The field path that produced `score`.
    pub field: &'a FieldPath,
}

impl<R> Clone for SearchResult<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for SearchResult<'_, R> {}

/// Result of [`rank_single_key`].
#[derive(Debug)]
pub enum Ranking<'a, R> {
    /// Blank query: the input collection, unchanged and unscored.
    Unfiltered(&'a [R]),
    /// Scored, filtered, sorted results.
    Scored(Vec<SearchResult<'a, R>>),
}

impl<'a, R> Ranking<'a, R> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Unfiltered(records) => records.len(),
            Self::Scored(results) => results.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the query bypassed ranking.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        matches!(self, Self::Unfiltered(_))
    }

    /// Scored results, or `None` for the bypass.
    #[must_use]
    pub fn results(&self) -> Option<&[SearchResult<'a, R>]> {
        match self {
            Self::Unfiltered(_) => None,
            Self::Scored(results) => Some(results),
        }
    }

    /// Iterate the selected records in rank order.
    pub fn records(&self) -> Box<dyn Iterator<Item = &'a R> + '_> {
        match *self {
            Self::Unfiltered(records) => Box::new(records.iter()),
            Self::Scored(ref results) => Box::new(results.iter().map(|r| r.record)),
        }
    }
}

pub(crate) fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Rank `records` by their best-matching field.
///
/// Each record is scored against every path in `options`; the maximum and
/// the path that produced it are kept (the earlier path wins ties). Records
/// with a best score below the threshold are discarded. A record on which
/// none of the paths resolves has no score at all and is discarded too, even
/// at a threshold of `0.0`. Results are stable-sorted by descending score and
/// truncated to the limit.
///
/// A non-blank query is scored exactly as given: surrounding whitespace is
/// part of the query, so `"dune "` is a substring hit on `"Dune"`, not an
/// exact match.
///
/// ```
/// use shelf_core::Document;
/// use shelf_search::{SearchOptions, rank_single_key};
///
/// let books = vec![
///     Document::new().with("title", "Project Hail Mary"),
///     Document::new().with("title", "Mars Colony"),
/// ];
/// let opts = SearchOptions::new(["title"]).unwrap().with_threshold(0.1).unwrap();
/// let ranking = rank_single_key(&books, "mars", &opts);
/// let results = ranking.results().unwrap();
/// assert_eq!(results[0].index, 1);
/// assert_eq!(results[0].score, 0.8);
/// ```
#[must_use]
pub fn rank_single_key<'a, R: Record>(
    records: &'a [R],
    query: &str,
    options: &'a SearchOptions,
) -> Ranking<'a, R> {
    match_single_key(records, query, options).resolve(records, options)
}

/// Index-only form of [`rank_single_key`].
#[must_use]
pub fn match_single_key<R: Record>(records: &[R], query: &str, options: &SearchOptions) -> Matches {
    if is_blank(query) {
        shelf_core::trace!(records = records.len(), "blank query bypasses ranking");
        return Matches::All;
    }
    let span = shelf_core::debug_span!(
        "rank_single_key",
        records = records.len(),
        query_len = query.len(),
        fields = options.fields().len()
    );
    let _guard = span.enter();

    let scorer = options.scorer();
    let prepared = scorer.prepare(query);

    let mut hits: Vec<Hit> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let (score, field) = best_field(record, &scorer, &prepared, options)?;
            (score >= options.threshold()).then_some(Hit {
                index,
                score,
                field,
            })
        })
        .collect();

    // `sort_by` is stable: equal scores keep collection order.
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    if let Some(limit) = options.limit() {
        hits.truncate(limit);
    }

    shelf_core::trace!(
        kept = hits.len(),
        discarded = records.len() - hits.len(),
        "single-key ranking done"
    );
    Matches::Hits(hits.into())
}

fn best_field<R: Record>(
    record: &R,
    scorer: &Scorer,
    prepared: &str,
    options: &SearchOptions,
) -> Option<(f64, usize)> {
    let mut best: Option<(f64, usize)> = None;
    for (field, path) in options.fields().iter().enumerate() {
        let Some(value) = record.field(path) else {
            continue;
        };
        let score = field_score(scorer, prepared, &value.as_text(), options.mode());
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, field));
        }
    }
    best
}

fn field_score(scorer: &Scorer, prepared: &str, value: &str, mode: MatchMode) -> f64 {
    let whole = scorer.score_prepared(prepared, value);
    match mode {
        MatchMode::WholeField => whole,
        MatchMode::Words => value
            .split_whitespace()
            .map(|word| scorer.score_prepared(prepared, word))
            .fold(whole, f64::max),
    }
}

/// Rank `records` by a weighted average of per-field similarity.
///
/// Fields a record lacks are left out of both the numerator and the
/// denominator: a missing field carries no weight rather than a zero score.
/// Records with no resolvable field, or an average at or below
/// [`WEIGHTED_FLOOR`], are discarded. Scores are not exposed. A blank query
/// returns every record in its original order.
#[must_use]
pub fn rank_weighted<'a, R: Record>(
    records: &'a [R],
    query: &str,
    fields: &WeightedFields,
) -> Vec<&'a R> {
    match_weighted(records, query, fields)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}

/// Index-only form of [`rank_weighted`].
#[must_use]
pub fn match_weighted<R: Record>(records: &[R], query: &str, fields: &WeightedFields) -> Vec<usize> {
    if is_blank(query) {
        return (0..records.len()).collect();
    }
    let span = shelf_core::debug_span!(
        "rank_weighted",
        records = records.len(),
        query_len = query.len(),
        fields = fields.fields().len()
    );
    let _guard = span.enter();

    let scorer = fields.scorer();
    let prepared = scorer.prepare(query);

    let mut scored: Vec<(usize, f64)> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let average = weighted_average(record, &scorer, &prepared, fields)?;
            (average > WEIGHTED_FLOOR).then_some((index, average))
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    shelf_core::trace!(kept = scored.len(), "weighted ranking done");
    scored.into_iter().map(|(index, _)| index).collect()
}

fn weighted_average<R: Record>(
    record: &R,
    scorer: &Scorer,
    prepared: &str,
    fields: &WeightedFields,
) -> Option<f64> {
    let mut sum = 0.0;
    let mut weight_total = 0.0;
    for (path, weight) in fields.fields() {
        if let Some(value) = record.field(path) {
            sum += weight * scorer.score_prepared(prepared, &value.as_text());
            weight_total += weight;
        }
    }
    (weight_total > 0.0).then(|| sum / weight_total)
}
