#![forbid(unsafe_code)]

//! Core: record field access, navigation directions, engine configuration,
//! errors, and logging.

pub mod config;
pub mod direction;
pub mod error;
pub mod logging;
pub mod record;

pub use config::EngineConfig;
pub use direction::Direction;
pub use error::{ConfigError, NavError};
pub use record::{Document, FieldPath, FieldValue, Record, Value};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, trace_span, warn};
