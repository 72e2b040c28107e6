#![forbid(unsafe_code)]

//! Virtualization primitives for browsing large ordered collections.
//!
//! Only the items that intersect the viewport, plus an overscan margin on
//! each side, need to be materialized. [`VirtualWindow`] computes that index
//! range from the item count, a fixed item extent, the viewport extent, and
//! the current scroll offset.
//!
//! # Core Types
//!
//! - [`VirtualWindow`] - fixed-extent window configuration and range math
//! - [`WindowRange`] - the indices to materialize plus positioning data
//! - [`WindowMemo`] - remembers the last computation for identical inputs
//!
//! # Example
//!
//! ```
//! use shelf_widgets::virtualized::VirtualWindow;
//!
//! let window = VirtualWindow::new(50.0).unwrap().with_overscan(3);
//! let range = window.compute(100, 500.0, 1000.0);
//! assert_eq!(range.start(), 17);
//! assert_eq!(range.end_inclusive(), Some(33));
//! assert_eq!(range.total_extent, 5000.0);
//! assert_eq!(range.leading_offset, 850.0);
//! ```
//!
//! # Invariants
//!
//! For `item_count > 0`: `0 <= start <= end_inclusive < item_count`, and the
//! range covers every index whose extent intersects
//! `[offset, offset + viewport]`, widened by the overscan and clipped to the
//! collection. For `item_count == 0` the range is empty and the total extent
//! is zero.

use std::ops::Range;

use shelf_core::ConfigError;
use shelf_core::config::{DEFAULT_OVERSCAN, EngineConfig};

/// The slice of a collection to materialize for the current scroll state.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRange {
    /// Half-open index range (`start..end_inclusive + 1`).
    pub indices: Range<usize>,
    /// Extent of the whole collection along the scroll axis.
    pub total_extent: f64,
    /// Position of the first materialized item along the scroll axis.
    pub leading_offset: f64,
}

impl WindowRange {
    /// The degenerate range for an empty collection.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            indices: 0..0,
            total_extent: 0.0,
            leading_offset: 0.0,
        }
    }

    /// First index to materialize.
    #[must_use]
    pub fn start(&self) -> usize {
        self.indices.start
    }

    /// Last index to materialize, or `None` when empty.
    #[must_use]
    pub fn end_inclusive(&self) -> Option<usize> {
        (!self.indices.is_empty()).then(|| self.indices.end - 1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Iterate the indices to materialize.
    pub fn iter(&self) -> Range<usize> {
        self.indices.clone()
    }
}

/// Where an item should land when scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Item's leading edge at the viewport's leading edge.
    Start,
    /// Item centered in the viewport.
    Center,
    /// Item's trailing edge at the viewport's trailing edge.
    End,
    /// Scroll the minimum amount needed; stay put if already visible.
    #[default]
    Nearest,
}

/// Fixed-extent virtual window configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualWindow {
    item_extent: f64,
    overscan: usize,
}

impl VirtualWindow {
    /// Create a window for items of `item_extent` (finite, > 0).
    pub fn new(item_extent: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            item_extent: validate_extent(item_extent)?,
            overscan: DEFAULT_OVERSCAN,
        })
    }

    /// Create a window using the engine's overscan default.
    pub fn from_config(item_extent: f64, config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(item_extent)?.with_overscan(config.overscan))
    }

    /// Set overscan (items beyond the viewport on each side).
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    #[must_use]
    pub fn item_extent(&self) -> f64 {
        self.item_extent
    }

    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Extent of `item_count` items.
    #[must_use]
    pub fn total_extent(&self, item_count: usize) -> f64 {
        item_count as f64 * self.item_extent
    }

    /// Compute the range to materialize.
    ///
    /// Negative or NaN offsets and viewport extents are treated as zero.
    #[must_use]
    pub fn compute(&self, item_count: usize, viewport_extent: f64, offset: f64) -> WindowRange {
        if item_count == 0 {
            return WindowRange::empty();
        }
        let span = shelf_core::debug_span!("window_compute", layout = "list", item_count);
        let _guard = span.enter();
        let indices = linear_range(
            item_count,
            self.item_extent,
            viewport_extent,
            offset,
            self.overscan,
        );
        shelf_core::trace!(
            viewport_extent,
            offset,
            start = indices.start,
            end = indices.end,
            "window range computed"
        );
        WindowRange {
            leading_offset: indices.start as f64 * self.item_extent,
            total_extent: self.total_extent(item_count),
            indices,
        }
    }

    /// Index of the item under `offset`, clamped to the collection.
    #[must_use]
    pub fn index_at_offset(&self, offset: f64, item_count: usize) -> Option<usize> {
        if item_count == 0 {
            return None;
        }
        let index = (non_negative(offset) / self.item_extent).floor() as usize;
        Some(index.min(item_count - 1))
    }

    /// Scroll offset that brings `index` into view under `align`.
    ///
    /// The result is clamped to `[0, max(0, total - viewport)]`; an index
    /// past the end is treated as the last item.
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
        scroll_target(
            index.min(item_count - 1),
            self.item_extent,
            self.item_extent,
            self.total_extent(item_count),
            viewport_extent,
            current_offset,
            align,
        )
    }
}

pub(crate) fn validate_extent(extent: f64) -> Result<f64, ConfigError> {
    if extent.is_finite() && extent > 0.0 {
        Ok(extent)
    } else {
        Err(ConfigError::NonPositiveExtent { value: extent })
    }
}

pub(crate) fn non_negative(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

/// Overscanned, clipped half-open range over `count` slots of `extent`.
///
/// `count` must be non-zero.
pub(crate) fn linear_range(
    count: usize,
    extent: f64,
    viewport_extent: f64,
    offset: f64,
    overscan: usize,
) -> Range<usize> {
    let offset = non_negative(offset);
    let viewport_extent = non_negative(viewport_extent);
    let last = count - 1;

    // `as usize` saturates, so huge offsets clip instead of wrapping.
    let first_visible = (offset / extent).floor() as usize;
    let last_visible = ((offset + viewport_extent) / extent).ceil() as usize;

    let end = last_visible.saturating_add(overscan).min(last);
    // Offsets past the content pin the window to the tail.
    let start = first_visible.saturating_sub(overscan).min(end);
    start..end + 1
}

/// Scroll target for the slot starting at `slot * stride` with `extent`.
pub(crate) fn scroll_target(
    slot: usize,
    stride: f64,
    extent: f64,
    total_extent: f64,
    viewport_extent: f64,
    current_offset: f64,
    align: Align,
) -> f64 {
    let viewport_extent = non_negative(viewport_extent);
    let current_offset = non_negative(current_offset);
    let item_start = slot as f64 * stride;
    let item_end = item_start + extent;

    let target = match align {
        Align::Start => item_start,
        Align::End => item_end - viewport_extent,
        Align::Center => item_start + extent / 2.0 - viewport_extent / 2.0,
        Align::Nearest => {
            if item_start < current_offset {
                item_start
            } else if item_end > current_offset + viewport_extent {
                item_end - viewport_extent
            } else {
                current_offset
            }
        }
    };
    let max_offset = non_negative(total_extent - viewport_extent);
    target.clamp(0.0, max_offset)
}

/// Inputs of the last window computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WindowKey {
    item_count: usize,
    item_extent: u64,
    overscan: usize,
    viewport_extent: u64,
    offset: u64,
}

/// Returns the previous [`WindowRange`] when nothing changed.
///
/// Scroll notifications often repeat the same offset; this skips the
/// recomputation without changing results.
#[derive(Debug, Clone, Default)]
pub struct WindowMemo {
    last: Option<(WindowKey, WindowRange)>,
    reused: u64,
}

impl WindowMemo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same result as [`VirtualWindow::compute`].
    pub fn compute(
        &mut self,
        window: &VirtualWindow,
        item_count: usize,
        viewport_extent: f64,
        offset: f64,
    ) -> WindowRange {
        let key = WindowKey {
            item_count,
            item_extent: window.item_extent.to_bits(),
            overscan: window.overscan,
            viewport_extent: viewport_extent.to_bits(),
            offset: offset.to_bits(),
        };
        if let Some((last_key, range)) = &self.last
            && *last_key == key
        {
            self.reused += 1;
            return range.clone();
        }
        let range = window.compute(item_count, viewport_extent, offset);
        self.last = Some((key, range.clone()));
        range
    }

    /// Number of computations answered from the memo.
    #[must_use]
    pub fn reused(&self) -> u64 {
        self.reused
    }

    /// Forget the remembered computation.
    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(extent: f64, overscan: usize) -> VirtualWindow {
        VirtualWindow::new(extent).unwrap().with_overscan(overscan)
    }

    #[test]
    fn reference_scenario() {
        let range = window(50.0, 3).compute(100, 500.0, 1000.0);
        assert_eq!(range.indices, 17..34);
        assert_eq!(range.end_inclusive(), Some(33));
        assert_eq!(range.leading_offset, 17.0 * 50.0);
    }

    #[test]
    fn empty_collection_is_degenerate() {
        let range = window(50.0, 3).compute(0, 500.0, 1000.0);
        assert!(range.is_empty());
        assert_eq!(range.end_inclusive(), None);
        assert_eq!(range.total_extent, 0.0);
        assert_eq!(range, WindowRange::empty());
    }

    #[test]
    fn top_of_list_clips_overscan() {
        let range = window(20.0, 2).compute(1000, 100.0, 0.0);
        assert_eq!(range.start(), 0);
        assert_eq!(range.end_inclusive(), Some(7));
    }

    #[test]
    fn bottom_of_list_clips_to_count() {
        let range = window(10.0, 5).compute(20, 100.0, 150.0);
        assert_eq!(range.end_inclusive(), Some(19));
        assert_eq!(range.start(), 10);
    }

    #[test]
    fn offset_past_content_pins_to_tail() {
        let range = window(10.0, 2).compute(5, 30.0, 10_000.0);
        assert_eq!(range.indices, 4..5);
        assert_eq!(range.leading_offset, 40.0);
    }

    #[test]
    fn negative_and_nan_inputs_clamp_to_zero() {
        let w = window(10.0, 0);
        assert_eq!(w.compute(50, 30.0, -25.0).indices, 0..4);
        assert_eq!(w.compute(50, f64::NAN, f64::NAN).indices, 0..1);
        assert_eq!(w.compute(50, -5.0, 0.0).indices, 0..1);
    }

    #[test]
    fn fractional_offsets() {
        // offset 15 with extent 10: items 1..=4 visible for viewport 25.
        let range = window(10.0, 0).compute(100, 25.0, 15.0);
        assert_eq!(range.indices, 1..5);
        assert_eq!(range.leading_offset, 10.0);
    }

    #[test]
    fn invalid_extent_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(VirtualWindow::new(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn config_sets_overscan() {
        let config = EngineConfig {
            overscan: 7,
            ..EngineConfig::default()
        };
        assert_eq!(VirtualWindow::from_config(10.0, &config).unwrap().overscan(), 7);
        assert_eq!(VirtualWindow::new(10.0).unwrap().overscan(), DEFAULT_OVERSCAN);
    }

    #[test]
    fn index_at_offset_clamps() {
        let w = window(25.0, 0);
        assert_eq!(w.index_at_offset(0.0, 10), Some(0));
        assert_eq!(w.index_at_offset(74.9, 10), Some(2));
        assert_eq!(w.index_at_offset(1e9, 10), Some(9));
        assert_eq!(w.index_at_offset(10.0, 0), None);
    }

    #[test]
    fn offset_for_index_alignments() {
        let w = window(50.0, 0);
        // 100 items, viewport 200, currently at 1000 (items 20..=23 visible).
        assert_eq!(w.offset_for_index(30, 100, 200.0, 1000.0, Align::Start), 1500.0);
        assert_eq!(w.offset_for_index(30, 100, 200.0, 1000.0, Align::End), 1350.0);
        assert_eq!(w.offset_for_index(30, 100, 200.0, 1000.0, Align::Center), 1425.0);
        // Already visible: stay.
        assert_eq!(w.offset_for_index(21, 100, 200.0, 1000.0, Align::Nearest), 1000.0);
        // Above: align start. Below: align end.
        assert_eq!(w.offset_for_index(5, 100, 200.0, 1000.0, Align::Nearest), 250.0);
        assert_eq!(w.offset_for_index(40, 100, 200.0, 1000.0, Align::Nearest), 1850.0);
    }

    #[test]
    fn offset_for_index_clamps_to_scrollable_range() {
        let w = window(50.0, 0);
        assert_eq!(w.offset_for_index(0, 100, 200.0, 0.0, Align::Center), 0.0);
        assert_eq!(w.offset_for_index(99, 100, 200.0, 0.0, Align::Start), 4800.0);
        assert_eq!(w.offset_for_index(500, 100, 200.0, 0.0, Align::Start), 4800.0);
        // Content shorter than the viewport never scrolls.
        assert_eq!(w.offset_for_index(2, 3, 500.0, 0.0, Align::End), 0.0);
        assert_eq!(w.offset_for_index(0, 0, 500.0, 0.0, Align::End), 0.0);
    }

    #[test]
    fn memo_reuses_identical_inputs() {
        let w = window(50.0, 3);
        let mut memo = WindowMemo::new();
        let a = memo.compute(&w, 100, 500.0, 1000.0);
        let b = memo.compute(&w, 100, 500.0, 1000.0);
        assert_eq!(a, b);
        assert_eq!(memo.reused(), 1);

        let c = memo.compute(&w, 100, 500.0, 1050.0);
        assert_eq!(c, w.compute(100, 500.0, 1050.0));
        assert_eq!(memo.reused(), 1);

        memo.clear();
        let _ = memo.compute(&w, 100, 500.0, 1050.0);
        assert_eq!(memo.reused(), 1);
    }
}
