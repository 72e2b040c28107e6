#![forbid(unsafe_code)]

//! Keyboard-style focus navigation for lists and grids.
//!
//! Focus is plain data ([`ListFocus`], [`GridFocus`]) and transitions are
//! pure functions on it ([`ListNav::update`], [`GridNav::update`]). The
//! controllers wrap one focus value plus the current item count for callers
//! that prefer a stateful handle.
//!
//! # Transition policy
//!
//! - Moving past the last item wraps to the first when `wrap` is on and is a
//!   no-op otherwise. Moving before the first mirrors this.
//! - With no focus, any move other than `Last` lands on the first item.
//! - Grids: `Left`/`Right` walk the linear order across row boundaries;
//!   `Up`/`Down` move one row and keep the column. `Down` into a partial
//!   last row lacking the column lands on the last item.
//! - An empty collection has no focus.

use shelf_core::{ConfigError, Direction, EngineConfig, NavError};

/// Focus within a list: an item index, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListFocus(pub Option<usize>);

impl ListFocus {
    #[must_use]
    pub fn index(self) -> Option<usize> {
        self.0
    }
}

/// Focus within a grid: a `(row, col)` cell, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridFocus(pub Option<(usize, usize)>);

impl GridFocus {
    #[must_use]
    pub fn cell(self) -> Option<(usize, usize)> {
        self.0
    }
}

fn step_forward(index: usize, last: usize, wrap: bool) -> usize {
    if index < last {
        index + 1
    } else if wrap {
        0
    } else {
        index
    }
}

fn step_back(index: usize, last: usize, wrap: bool) -> usize {
    if index > 0 {
        index - 1
    } else if wrap {
        last
    } else {
        index
    }
}

/// Transition rules for a single-axis list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListNav {
    pub wrap: bool,
}

impl Default for ListNav {
    fn default() -> Self {
        Self { wrap: true }
    }
}

impl ListNav {
    #[must_use]
    pub fn new(wrap: bool) -> Self {
        Self { wrap }
    }

    /// Focus after moving in `direction` over `len` items.
    ///
    /// `Up`/`Left` act as `Previous`, `Down`/`Right` as `Next`. A stale
    /// focus past the end is clamped before moving.
    #[must_use]
    pub fn update(&self, focus: ListFocus, direction: Direction, len: usize) -> ListFocus {
        if len == 0 {
            return ListFocus(None);
        }
        let last = len - 1;
        let target = match (focus.0.map(|i| i.min(last)), direction.linear()) {
            (_, Direction::First) => 0,
            (_, Direction::Last) => last,
            (None, _) => 0,
            (Some(i), Direction::Next) => step_forward(i, last, self.wrap),
            (Some(i), Direction::Previous) => step_back(i, last, self.wrap),
            (Some(i), _) => i,
        };
        ListFocus(Some(target))
    }
}

/// Transition rules for a row-major grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridNav {
    columns: usize,
    pub wrap: bool,
}

impl GridNav {
    /// Grid rules for `columns` items per row (must be non-zero).
    pub fn new(columns: usize, wrap: bool) -> Result<Self, ConfigError> {
        if columns == 0 {
            return Err(ConfigError::ZeroItemsPerRow);
        }
        Ok(Self { columns, wrap })
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(row, col)` of a linear index.
    #[must_use]
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    /// Linear index of a cell, without bounds checks against the item count.
    #[must_use]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row.saturating_mul(self.columns)
            .saturating_add(col.min(self.columns - 1))
    }

    /// Focus after moving in `direction` over `len` items.
    #[must_use]
    pub fn update(&self, focus: GridFocus, direction: Direction, len: usize) -> GridFocus {
        if len == 0 {
            return GridFocus(None);
        }
        let last = len - 1;
        let current = focus.0.map(|(row, col)| self.index_of(row, col).min(last));
        let target = match (current, direction) {
            (_, Direction::First) => 0,
            (_, Direction::Last) => last,
            (None, _) => 0,
            (Some(i), Direction::Next | Direction::Right) => step_forward(i, last, self.wrap),
            (Some(i), Direction::Previous | Direction::Left) => step_back(i, last, self.wrap),
            (Some(i), Direction::Down) => self.step_down(i, len),
            (Some(i), Direction::Up) => self.step_up(i, len),
        };
        GridFocus(Some(self.cell_of(target)))
    }

    fn step_down(&self, index: usize, len: usize) -> usize {
        let below = index + self.columns;
        if below < len {
            return below;
        }
        let last_row = (len - 1) / self.columns;
        if index / self.columns < last_row {
            // Partial last row without this column.
            len - 1
        } else if self.wrap {
            index % self.columns
        } else {
            index
        }
    }

    fn step_up(&self, index: usize, len: usize) -> usize {
        if index >= self.columns {
            return index - self.columns;
        }
        if !self.wrap {
            return index;
        }
        let last_row = (len - 1) / self.columns;
        (last_row * self.columns + index).min(len - 1)
    }
}

/// Owns the focus of a linear list.
#[derive(Debug, Clone)]
pub struct NavigationController {
    nav: ListNav,
    focus: ListFocus,
    len: usize,
}

impl NavigationController {
    /// Controller over `len` items, focused on the first one (if any).
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            nav: ListNav::default(),
            focus: ListFocus((len > 0).then_some(0)),
            len,
        }
    }

    #[must_use]
    pub fn from_config(len: usize, config: &EngineConfig) -> Self {
        Self::new(len).with_wrap(config.wrap)
    }

    #[must_use]
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.nav.wrap = wrap;
        self
    }

    #[must_use]
    pub fn wrap(&self) -> bool {
        self.nav.wrap
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current item index.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.focus.0
    }

    #[must_use]
    pub fn focus(&self) -> ListFocus {
        self.focus
    }

    /// Whether `index` is the item that should receive directional input.
    #[must_use]
    pub fn is_current(&self, index: usize) -> bool {
        self.focus.0 == Some(index)
    }

    /// Move in `direction` and return the new position.
    pub fn apply(&mut self, direction: Direction) -> Option<usize> {
        let span = shelf_core::debug_span!("nav_apply", layout = "list", ?direction, len = self.len);
        let _guard = span.enter();
        let before = self.focus;
        self.focus = self.nav.update(self.focus, direction, self.len);
        if before != self.focus {
            shelf_core::debug!(from = ?before.0, to = ?self.focus.0, "focus moved");
        }
        self.focus.0
    }

    pub fn move_next(&mut self) -> Option<usize> {
        self.apply(Direction::Next)
    }

    pub fn move_previous(&mut self) -> Option<usize> {
        self.apply(Direction::Previous)
    }

    pub fn move_first(&mut self) -> Option<usize> {
        self.apply(Direction::First)
    }

    pub fn move_last(&mut self) -> Option<usize> {
        self.apply(Direction::Last)
    }

    /// Focus `index` directly, e.g. after a pointer click.
    ///
    /// Out-of-range requests are rejected and the prior focus is kept.
    pub fn set_position(&mut self, index: usize) -> Result<(), NavError> {
        if self.len == 0 {
            return Err(NavError::Empty);
        }
        if index >= self.len {
            shelf_core::warn!(requested = index, len = self.len, "rejected focus request");
            return Err(NavError::OutOfRange {
                requested: index,
                len: self.len,
            });
        }
        self.focus = ListFocus(Some(index));
        Ok(())
    }

    /// Adopt a new item count, keeping focus in bounds.
    pub fn sync_len(&mut self, len: usize) {
        self.len = len;
        self.focus = ListFocus(match (len, self.focus.0) {
            (0, _) => None,
            (_, None) => Some(0),
            (_, Some(i)) => Some(i.min(len - 1)),
        });
    }

    /// Invoke `callback` with the focused record. Returns whether it ran.
    pub fn activate<'a, T>(&self, records: &'a [T], callback: impl FnOnce(usize, &'a T)) -> bool {
        match self.focus.0.and_then(|i| records.get(i).map(|r| (i, r))) {
            Some((index, record)) => {
                callback(index, record);
                true
            }
            None => false,
        }
    }
}

/// Owns the focus of a row-major grid.
#[derive(Debug, Clone)]
pub struct GridNavigationController {
    nav: GridNav,
    focus: GridFocus,
    len: usize,
}

impl GridNavigationController {
    /// Controller over `len` items laid out `columns` to a row.
    pub fn new(len: usize, columns: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            nav: GridNav::new(columns, true)?,
            focus: GridFocus((len > 0).then_some((0, 0))),
            len,
        })
    }

    pub fn from_config(
        len: usize,
        columns: usize,
        config: &EngineConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(len, columns)?.with_wrap(config.wrap))
    }

    #[must_use]
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.nav.wrap = wrap;
        self
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.nav.columns()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current `(row, col)`.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        self.focus.0
    }

    /// Current position as a linear item index.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.focus.0.map(|(row, col)| self.nav.index_of(row, col))
    }

    #[must_use]
    pub fn is_current(&self, index: usize) -> bool {
        self.index() == Some(index)
    }

    /// Re-flow to a new column count (e.g. after a resize), keeping the
    /// focused item.
    pub fn set_columns(&mut self, columns: usize) -> Result<(), ConfigError> {
        let index = self.index();
        self.nav = GridNav::new(columns, self.nav.wrap)?;
        self.focus = GridFocus(index.map(|i| self.nav.cell_of(i)));
        Ok(())
    }

    /// Move in `direction` and return the new cell.
    pub fn apply(&mut self, direction: Direction) -> Option<(usize, usize)> {
        let span = shelf_core::debug_span!("nav_apply", layout = "grid", ?direction, len = self.len);
        let _guard = span.enter();
        let before = self.focus;
        self.focus = self.nav.update(self.focus, direction, self.len);
        if before != self.focus {
            shelf_core::debug!(from = ?before.0, to = ?self.focus.0, "focus moved");
        }
        self.focus.0
    }

    pub fn move_next(&mut self) -> Option<(usize, usize)> {
        self.apply(Direction::Next)
    }

    pub fn move_previous(&mut self) -> Option<(usize, usize)> {
        self.apply(Direction::Previous)
    }

    pub fn move_first(&mut self) -> Option<(usize, usize)> {
        self.apply(Direction::First)
    }

    pub fn move_last(&mut self) -> Option<(usize, usize)> {
        self.apply(Direction::Last)
    }

    pub fn move_up(&mut self) -> Option<(usize, usize)> {
        self.apply(Direction::Up)
    }

    pub fn move_down(&mut self) -> Option<(usize, usize)> {
        self.apply(Direction::Down)
    }

    pub fn move_left(&mut self) -> Option<(usize, usize)> {
        self.apply(Direction::Left)
    }

    pub fn move_right(&mut self) -> Option<(usize, usize)> {
        self.apply(Direction::Right)
    }

    /// Focus `(row, col)` directly. Cells outside the grid are rejected.
    pub fn set_position(&mut self, row: usize, col: usize) -> Result<(), NavError> {
        if self.len == 0 {
            return Err(NavError::Empty);
        }
        let in_bounds = col < self.nav.columns()
            && row
                .checked_mul(self.nav.columns())
                .and_then(|base| base.checked_add(col))
                .is_some_and(|index| index < self.len);
        if !in_bounds {
            shelf_core::warn!(row, col, len = self.len, "rejected focus request");
            return Err(NavError::CellOutOfRange {
                row,
                col,
                len: self.len,
            });
        }
        self.focus = GridFocus(Some((row, col)));
        Ok(())
    }

    /// Focus a linear item index directly.
    pub fn set_index(&mut self, index: usize) -> Result<(), NavError> {
        let (row, col) = self.nav.cell_of(index);
        self.set_position(row, col)
    }

    /// Adopt a new item count, keeping focus in bounds.
    pub fn sync_len(&mut self, len: usize) {
        let index = match (len, self.index()) {
            (0, _) => None,
            (_, None) => Some(0),
            (_, Some(i)) => Some(i.min(len - 1)),
        };
        self.len = len;
        self.focus = GridFocus(index.map(|i| self.nav.cell_of(i)));
    }

    /// Invoke `callback` with the focused record. Returns whether it ran.
    pub fn activate<'a, T>(&self, records: &'a [T], callback: impl FnOnce(usize, &'a T)) -> bool {
        match self.index().and_then(|i| records.get(i).map(|r| (i, r))) {
            Some((index, record)) => {
                callback(index, record);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_with_loop() {
        let mut nav = NavigationController::new(5);
        nav.set_position(4).unwrap();
        assert_eq!(nav.move_next(), Some(0));
    }

    #[test]
    fn next_stays_without_loop() {
        let mut nav = NavigationController::new(5).with_wrap(false);
        nav.set_position(4).unwrap();
        assert_eq!(nav.move_next(), Some(4));
    }

    #[test]
    fn previous_mirrors_wrap_policy() {
        let mut wrapping = NavigationController::new(5);
        assert_eq!(wrapping.move_previous(), Some(4));
        let mut clamped = NavigationController::new(5).with_wrap(false);
        assert_eq!(clamped.move_previous(), Some(0));
    }

    #[test]
    fn first_and_last() {
        let mut nav = NavigationController::new(10);
        assert_eq!(nav.move_last(), Some(9));
        assert_eq!(nav.move_first(), Some(0));
        assert_eq!(nav.apply(Direction::Down), Some(1));
        assert_eq!(nav.apply(Direction::Left), Some(0));
    }

    #[test]
    fn empty_collection_has_no_focus() {
        let mut nav = NavigationController::new(0);
        assert_eq!(nav.position(), None);
        assert_eq!(nav.move_next(), None);
        assert_eq!(nav.set_position(0), Err(NavError::Empty));
        let records: [&str; 0] = [];
        assert!(!nav.activate(&records, |_, _| panic!("must not run")));
    }

    #[test]
    fn out_of_range_set_position_keeps_prior_focus() {
        let mut nav = NavigationController::new(3);
        nav.set_position(1).unwrap();
        assert_eq!(
            nav.set_position(3),
            Err(NavError::OutOfRange {
                requested: 3,
                len: 3
            })
        );
        assert_eq!(nav.position(), Some(1));
        assert!(nav.is_current(1));
        assert!(!nav.is_current(0));
    }

    #[test]
    fn activate_passes_focused_record() {
        let records = ["a", "b", "c"];
        let mut nav = NavigationController::new(records.len());
        nav.move_last();
        let mut seen = None;
        assert!(nav.activate(&records, |i, r| seen = Some((i, *r))));
        assert_eq!(seen, Some((2, "c")));
    }

    #[test]
    fn sync_len_rules() {
        let mut nav = NavigationController::new(10);
        nav.set_position(8).unwrap();
        nav.sync_len(4);
        assert_eq!(nav.position(), Some(3));
        nav.sync_len(0);
        assert_eq!(nav.position(), None);
        nav.sync_len(6);
        assert_eq!(nav.position(), Some(0));
        nav.set_position(2).unwrap();
        nav.sync_len(20);
        assert_eq!(nav.position(), Some(2));
    }

    #[test]
    fn config_sets_wrap() {
        let config = EngineConfig {
            wrap: false,
            ..EngineConfig::default()
        };
        assert!(!NavigationController::from_config(3, &config).wrap());
    }

    #[test]
    fn pure_list_update() {
        let nav = ListNav::new(true);
        assert_eq!(nav.update(ListFocus(None), Direction::Next, 3), ListFocus(Some(0)));
        assert_eq!(nav.update(ListFocus(None), Direction::Last, 3), ListFocus(Some(2)));
        assert_eq!(nav.update(ListFocus(Some(7)), Direction::Next, 3), ListFocus(Some(0)));
        assert_eq!(nav.update(ListFocus(Some(1)), Direction::Next, 0), ListFocus(None));
    }

    // 3 columns, 8 items:
    //   0 1 2
    //   3 4 5
    //   6 7
    fn grid(wrap: bool) -> GridNavigationController {
        GridNavigationController::new(8, 3).unwrap().with_wrap(wrap)
    }

    #[test]
    fn grid_left_right_cross_rows() {
        let mut g = grid(true);
        g.set_position(0, 2).unwrap();
        assert_eq!(g.move_right(), Some((1, 0)));
        assert_eq!(g.move_left(), Some((0, 2)));
        g.set_position(2, 1).unwrap();
        assert_eq!(g.move_right(), Some((0, 0)));
    }

    #[test]
    fn grid_up_down_keep_column() {
        let mut g = grid(false);
        g.set_position(0, 1).unwrap();
        assert_eq!(g.move_down(), Some((1, 1)));
        assert_eq!(g.move_down(), Some((2, 1)));
        assert_eq!(g.move_down(), Some((2, 1)));
        assert_eq!(g.move_up(), Some((1, 1)));
    }

    #[test]
    fn grid_down_into_partial_row_lands_on_last() {
        let mut g = grid(false);
        g.set_position(1, 2).unwrap();
        assert_eq!(g.move_down(), Some((2, 1)));
        assert_eq!(g.index(), Some(7));
    }

    #[test]
    fn grid_vertical_wrap() {
        let mut g = grid(true);
        g.set_position(2, 0).unwrap();
        assert_eq!(g.move_down(), Some((0, 0)));
        // Column 2 is missing from the last row: fall back to the last item.
        g.set_position(0, 2).unwrap();
        assert_eq!(g.move_up(), Some((2, 1)));
        g.set_position(0, 1).unwrap();
        assert_eq!(g.move_up(), Some((2, 1)));
        // Without wrap the top row is a wall.
        let mut g = grid(false);
        assert_eq!(g.move_up(), Some((0, 0)));
    }

    #[test]
    fn grid_set_position_rejects_missing_cells() {
        let mut g = grid(true);
        g.set_position(1, 1).unwrap();
        assert_eq!(
            g.set_position(2, 2),
            Err(NavError::CellOutOfRange {
                row: 2,
                col: 2,
                len: 8
            })
        );
        assert!(g.set_position(0, 3).is_err());
        assert!(g.set_position(usize::MAX, 0).is_err());
        assert_eq!(g.position(), Some((1, 1)));
        assert!(g.is_current(4));
        assert!(g.set_index(7).is_ok());
        assert_eq!(g.position(), Some((2, 1)));
    }

    #[test]
    fn grid_set_columns_keeps_item() {
        let mut g = grid(true);
        g.set_index(7).unwrap();
        g.set_columns(4).unwrap();
        assert_eq!(g.position(), Some((1, 3)));
        assert_eq!(g.index(), Some(7));
        assert_eq!(g.set_columns(0), Err(ConfigError::ZeroItemsPerRow));
    }

    #[test]
    fn grid_sync_len_and_activate() {
        let records: Vec<u32> = (0..8).collect();
        let mut g = grid(true);
        g.move_last();
        g.sync_len(5);
        assert_eq!(g.position(), Some((1, 1)));
        let mut seen = None;
        assert!(g.activate(&records, |i, r| seen = Some((i, *r))));
        assert_eq!(seen, Some((4, 4)));
        g.sync_len(0);
        assert_eq!(g.position(), None);
        assert!(!g.activate(&records, |_, _| panic!("must not run")));
    }

    #[test]
    fn grid_rejects_zero_columns() {
        assert_eq!(
            GridNavigationController::new(4, 0).unwrap_err(),
            ConfigError::ZeroItemsPerRow
        );
    }
}
