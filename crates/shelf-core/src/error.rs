#![forbid(unsafe_code)]

//! Error types.
//!
//! Only configuration construction and explicit focus assignment can be
//! rejected. Ranking, window computation, and directional moves always map
//! their inputs to a defined output.

use std::fmt;

/// A configuration value violated its documented invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Similarity threshold outside `[0, 1]` (or NaN).
    ThresholdOutOfRange { value: f64 },
    /// A weighted field path carries a weight that is not strictly positive.
    NonPositiveWeight { path: String, weight: f64 },
    /// Weighted search needs at least one field.
    EmptyWeights,
    /// Single-key search needs at least one field path.
    EmptyFields,
    /// Item extents must be strictly positive and finite.
    NonPositiveExtent { value: f64 },
    /// Gaps must be non-negative and finite.
    NegativeExtent { value: f64 },
    /// Grids need at least one item per row.
    ZeroItemsPerRow,
    /// An environment variable could not be parsed or was out of range.
    InvalidEnv { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOutOfRange { value } => {
                write!(f, "similarity threshold {value} is outside [0, 1]")
            }
            Self::NonPositiveWeight { path, weight } => {
                write!(f, "weight {weight} for field `{path}` must be > 0")
            }
            Self::EmptyWeights => write!(f, "weighted search requires at least one field"),
            Self::EmptyFields => write!(f, "search requires at least one field path"),
            Self::NonPositiveExtent { value } => {
                write!(f, "item extent {value} must be a finite value > 0")
            }
            Self::NegativeExtent { value } => {
                write!(f, "gap {value} must be a finite value >= 0")
            }
            Self::ZeroItemsPerRow => write!(f, "items per row must be at least 1"),
            Self::InvalidEnv { key, value } => {
                write!(f, "invalid value {value:?} for environment variable {key}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// An explicit focus assignment was rejected; the previous position stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// The collection is empty, so no position is valid.
    Empty,
    /// The requested linear index is outside `[0, len)`.
    OutOfRange { requested: usize, len: usize },
    /// The requested cell does not exist in the grid.
    CellOutOfRange { row: usize, col: usize, len: usize },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "cannot focus an item in an empty collection"),
            Self::OutOfRange { requested, len } => {
                write!(f, "position {requested} is out of range for {len} items")
            }
            Self::CellOutOfRange { row, col, len } => {
                write!(f, "cell ({row}, {col}) is out of range for {len} items")
            }
        }
    }
}

impl std::error::Error for NavError {}
