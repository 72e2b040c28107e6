#![forbid(unsafe_code)]

//! One collection, one query, one scroll window, one focus.
//!
//! Positions handed to and returned from [`Browser`] are positions in the
//! current *view* (the filtered, ranked sequence), not indices into the
//! underlying collection. [`Browser::activate`] reports both.

use shelf_core::{Direction, EngineConfig, FieldPath, Record};
use shelf_search::{Matches, MemoRanker, Ranking, SearchOptions};
use shelf_widgets::{Align, NavigationController, VirtualWindow, WindowMemo, WindowRange};

use crate::Result;

/// Search, windowing, and keyboard focus over an owned record collection.
#[derive(Debug)]
pub struct Browser<R> {
    records: Vec<R>,
    ranker: MemoRanker,
    query: String,
    matches: Matches,
    window: VirtualWindow,
    window_memo: WindowMemo,
    nav: NavigationController,
}

impl<R: Record> Browser<R> {
    /// Browse `records` with the given search options and item extent.
    pub fn new(records: Vec<R>, options: SearchOptions, item_extent: f64) -> Result<Self> {
        let config = EngineConfig::default();
        Ok(Self::assemble(
            records,
            MemoRanker::new(options, config.memo_capacity),
            VirtualWindow::from_config(item_extent, &config)?,
            &config,
        ))
    }

    /// Browse `records` searching `fields`, with every knob taken from
    /// `config`.
    pub fn from_config<I, P>(
        records: Vec<R>,
        fields: I,
        item_extent: f64,
        config: &EngineConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        let options = SearchOptions::from_config(fields, config)?;
        Ok(Self::assemble(
            records,
            MemoRanker::new(options, config.memo_capacity),
            VirtualWindow::from_config(item_extent, config)?,
            config,
        ))
    }

    fn assemble(
        records: Vec<R>,
        ranker: MemoRanker,
        window: VirtualWindow,
        config: &EngineConfig,
    ) -> Self {
        let nav = NavigationController::from_config(records.len(), config);
        Self {
            records,
            ranker,
            query: String::new(),
            matches: Matches::All,
            window,
            window_memo: WindowMemo::new(),
            nav,
        }
    }

    /// Replace the window configuration (e.g. a different overscan).
    #[must_use]
    pub fn with_window(mut self, window: VirtualWindow) -> Self {
        self.window = window;
        self.window_memo.clear();
        self
    }

    /// Set the navigation wrap policy.
    #[must_use]
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.nav = self.nav.with_wrap(wrap);
        self
    }

    /// The whole collection in its original order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn options(&self) -> &SearchOptions {
        self.ranker.options()
    }

    #[must_use]
    pub fn ranker(&self) -> &MemoRanker {
        &self.ranker
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    /// Re-rank for `query`. Focus returns to the top of the new view.
    pub fn set_query(&mut self, query: &str) {
        self.query.clear();
        self.query.push_str(query);
        self.refresh();
        self.nav.move_first();
        shelf_core::debug!(query, visible = self.len(), "query applied");
    }

    /// Swap the collection, re-applying the current query.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.ranker.invalidate();
        self.refresh();
    }

    /// Replace the search options, re-applying the current query.
    pub fn set_options(&mut self, options: SearchOptions) {
        self.ranker.set_options(options);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.matches = self.ranker.matches(&self.records, &self.query);
        self.window_memo.clear();
        self.nav.sync_len(self.len());
    }

    /// Number of records in the current view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len(self.records.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The current view with scores and matched fields.
    #[must_use]
    pub fn ranking(&self) -> Ranking<'_, R> {
        self.matches.resolve(&self.records, self.ranker.options())
    }

    /// Record at `position` in the current view.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&R> {
        self.matches
            .source_index(position, self.records.len())
            .and_then(|index| self.records.get(index))
    }

    /// Iterate the current view in rank order.
    pub fn view(&self) -> impl Iterator<Item = &R> + '_ {
        (0..self.len()).filter_map(|position| self.get(position))
    }

    /// Window over the current view for a scroll state.
    pub fn visible(&mut self, viewport_extent: f64, offset: f64) -> WindowRange {
        let len = self.len();
        self.window_memo
            .compute(&self.window, len, viewport_extent, offset)
    }

    /// `(position, record)` pairs for a computed window.
    pub fn window_records<'a>(
        &'a self,
        range: &WindowRange,
    ) -> impl Iterator<Item = (usize, &'a R)> + 'a {
        range
            .iter()
            .filter_map(move |position| self.get(position).map(|record| (position, record)))
    }

    /// Whether `position` holds the focus.
    #[must_use]
    pub fn is_current(&self, position: usize) -> bool {
        self.nav.is_current(position)
    }

    /// Focused position in the current view.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.nav.position()
    }

    /// Move focus and return the scroll offset that keeps it visible.
    ///
    /// Returns `None` when the view is empty.
    pub fn navigate(
        &mut self,
        direction: Direction,
        viewport_extent: f64,
        current_offset: f64,
    ) -> Option<f64> {
        let position = self.nav.apply(direction)?;
        Some(self.window.offset_for_index(
            position,
            self.len(),
            viewport_extent,
            current_offset,
            Align::Nearest,
        ))
    }

    /// Focus `position` directly (e.g. on pointer focus).
    pub fn focus(&mut self, position: usize) -> Result<()> {
        self.nav.set_position(position)?;
        Ok(())
    }

    /// Invoke `callback` with the focused record's source index and the
    /// record. No-op on an empty view.
    pub fn activate(&self, callback: impl FnOnce(usize, &R)) -> bool {
        let focused = self.nav.position().and_then(|position| {
            let index = self.matches.source_index(position, self.records.len())?;
            self.records.get(index).map(|record| (index, record))
        });
        match focused {
            Some((index, record)) => {
                callback(index, record);
                true
            }
            None => false,
        }
    }
}
