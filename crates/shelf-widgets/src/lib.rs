#![forbid(unsafe_code)]

//! Windowing and focus navigation for browsing large collections.
//!
//! - [`virtualized`]: which slice of a list to materialize for a scroll state
//! - [`grid`]: the same for row-major grids, including partial last rows
//! - [`navigation`]: focus state and directional transitions

pub mod grid;
pub mod navigation;
pub mod virtualized;

pub use grid::{GridRange, GridWindow};
pub use navigation::{
    GridFocus, GridNav, GridNavigationController, ListFocus, ListNav, NavigationController,
};
pub use virtualized::{Align, VirtualWindow, WindowMemo, WindowRange};
