#![forbid(unsafe_code)]

//! Row-based virtualization for grids of fixed-extent items.
//!
//! A grid lays items out row-major, `items_per_row` to a row. Scrolling
//! happens along rows, so the window is computed over rows exactly like a
//! [`VirtualWindow`](crate::virtualized::VirtualWindow) and then expanded to
//! the item indices those rows hold. The last row may be partial.

use std::ops::Range;

use shelf_core::ConfigError;
use shelf_core::config::{DEFAULT_OVERSCAN, EngineConfig};

use crate::virtualized::{Align, linear_range, non_negative, scroll_target, validate_extent};

/// Rows and items to materialize for the current scroll state.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRange {
    /// Half-open row range.
    pub rows: Range<usize>,
    /// Half-open item range covered by `rows`, clipped to the item count.
    pub items: Range<usize>,
    /// `row_count * (item_extent + gap)`.
    pub total_extent: f64,
    /// Position of the first materialized row.
    pub leading_offset: f64,
    items_per_row: usize,
    item_count: usize,
}

impl GridRange {
    fn empty(items_per_row: usize) -> Self {
        Self {
            rows: 0..0,
            items: 0..0,
            total_extent: 0.0,
            leading_offset: 0.0,
            items_per_row,
            item_count: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Item indices held by `row`, clipped to the collection.
    #[must_use]
    pub fn row_items(&self, row: usize) -> Range<usize> {
        let start = row.saturating_mul(self.items_per_row).min(self.item_count);
        let end = start.saturating_add(self.items_per_row).min(self.item_count);
        start..end
    }

    /// Materialized rows with the item indices each one holds.
    pub fn iter_rows(&self) -> impl Iterator<Item = (usize, Range<usize>)> + '_ {
        self.rows.clone().map(|row| (row, self.row_items(row)))
    }
}

/// Grid virtualization configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridWindow {
    item_extent: f64,
    gap: f64,
    items_per_row: usize,
    overscan: usize,
}

impl GridWindow {
    /// Create a grid of rows of `item_extent` holding `items_per_row` items.
    pub fn new(item_extent: f64, items_per_row: usize) -> Result<Self, ConfigError> {
        if items_per_row == 0 {
            return Err(ConfigError::ZeroItemsPerRow);
        }
        Ok(Self {
            item_extent: validate_extent(item_extent)?,
            gap: 0.0,
            items_per_row,
            overscan: DEFAULT_OVERSCAN,
        })
    }

    /// Create a grid using the engine's overscan default.
    pub fn from_config(
        item_extent: f64,
        items_per_row: usize,
        config: &EngineConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(item_extent, items_per_row)?.with_overscan(config.overscan))
    }

    /// Spacing between rows (finite, >= 0).
    pub fn with_gap(mut self, gap: f64) -> Result<Self, ConfigError> {
        if !(gap.is_finite() && gap >= 0.0) {
            return Err(ConfigError::NegativeExtent { value: gap });
        }
        self.gap = gap;
        Ok(self)
    }

    /// Set overscan in rows.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Columns that fit across `viewport_cross` (always at least one).
    #[must_use]
    pub fn columns_for(viewport_cross: f64, item_cross: f64, gap: f64) -> usize {
        let gap = non_negative(gap);
        if !(item_cross.is_finite() && item_cross > 0.0) {
            return 1;
        }
        let fit = ((non_negative(viewport_cross) + gap) / (item_cross + gap)).floor() as usize;
        fit.max(1)
    }

    #[must_use]
    pub fn items_per_row(&self) -> usize {
        self.items_per_row
    }

    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Distance between consecutive row starts.
    #[must_use]
    pub fn row_extent(&self) -> f64 {
        self.item_extent + self.gap
    }

    #[must_use]
    pub fn row_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.items_per_row)
    }

    /// `(row, col)` of an item index.
    #[must_use]
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index / self.items_per_row, index % self.items_per_row)
    }

    /// Compute the rows and items to materialize.
    #[must_use]
    pub fn compute(&self, item_count: usize, viewport_extent: f64, offset: f64) -> GridRange {
        if item_count == 0 {
            return GridRange::empty(self.items_per_row);
        }
        let span = shelf_core::debug_span!("window_compute", layout = "grid", item_count);
        let _guard = span.enter();
        let row_count = self.row_count(item_count);
        let row_extent = self.row_extent();
        let rows = linear_range(row_count, row_extent, viewport_extent, offset, self.overscan);
        let items = rows.start * self.items_per_row
            ..(rows.end.saturating_mul(self.items_per_row)).min(item_count);
        shelf_core::trace!(
            row_count,
            rows_start = rows.start,
            rows_end = rows.end,
            "grid range computed"
        );
        GridRange {
            leading_offset: rows.start as f64 * row_extent,
            total_extent: row_count as f64 * row_extent,
            rows,
            items,
            items_per_row: self.items_per_row,
            item_count,
        }
    }

    /// Scroll offset that brings the row holding `index` into view.
    #[must_use]
    pub fn offset_for_index(
        &self,
        index: usize,
        item_count: usize,
        viewport_extent: f64,
        current_offset: f64,
        align: Align,
    ) -> f64 {
        if item_count == 0 {
            return 0.0;
        }
        let row = index.min(item_count - 1) / self.items_per_row;
        let row_extent = self.row_extent();
        scroll_target(
            row,
            row_extent,
            self.item_extent,
            self.row_count(item_count) as f64 * row_extent,
            viewport_extent,
            current_offset,
            align,
        )
    }
}
