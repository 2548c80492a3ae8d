//! # Core Types
//!
//! The shared data model consumed by the analytics engine: daily return series,
//! dated peak/trough events, pre-aggregated forward-return summaries and the
//! monthly rank matrix. Every type here is a plain value; nothing is mutated
//! once it has been built from an artifact.

pub mod date;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use date::{DateRange, parse_date};
pub use enums::{EventKind, Horizon};
pub use error::CoreError;
pub use structs::{
    Event, ForwardReturnSummary, HorizonStats, KindSummary, RankMatrix, ReturnSeries,
};
