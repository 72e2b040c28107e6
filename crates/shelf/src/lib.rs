#![forbid(unsafe_code)]

//! Shelf public facade crate.
//!
//! Re-exports the engine's building blocks and adds [`Browser`], which wires
//! search, windowing, and navigation together over one record collection.

use std::fmt;

mod browser;

pub use browser::Browser;

// --- Core re-exports -------------------------------------------------------

pub use shelf_core::config::{DEFAULT_MEMO_CAPACITY, DEFAULT_OVERSCAN, DEFAULT_THRESHOLD};
pub use shelf_core::{
    ConfigError, Direction, Document, EngineConfig, FieldPath, FieldValue, NavError, Record,
    Value,
};

// --- Text re-exports -------------------------------------------------------

pub use shelf_text::{CaseFolding, Scorer, levenshtein, similarity, similarity_with};

// --- Search re-exports -----------------------------------------------------

pub use shelf_search::{
    MatchMode, Matches, MemoRanker, MemoStats, Ranking, SearchOptions, SearchResult,
    WEIGHTED_FLOOR, WeightedFields, rank_single_key, rank_weighted,
};

// --- Widget re-exports -----------------------------------------------------

pub use shelf_widgets::{
    Align, GridFocus, GridNav, GridNavigationController, GridRange, GridWindow, ListFocus,
    ListNav, NavigationController, VirtualWindow, WindowMemo, WindowRange,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for shelf APIs.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid search, window, or engine configuration.
    Config(ConfigError),
    /// Rejected focus request.
    Nav(NavError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Nav(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Nav(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<NavError> for Error {
    fn from(err: NavError) -> Self {
        Self::Nav(err)
    }
}

/// Standard result type for shelf APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Align, Browser, Direction, Document, EngineConfig, Error, MatchMode, NavigationController,
        Record, Result, SearchOptions, VirtualWindow, WeightedFields, rank_single_key,
        rank_weighted, similarity,
    };

    pub use crate::{core, search, text, widgets};
}

pub use shelf_core as core;
pub use shelf_search as search;
pub use shelf_text as text;
pub use shelf_widgets as widgets;
