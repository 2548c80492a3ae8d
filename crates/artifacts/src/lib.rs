//! # Artifacts
//!
//! Serde shapes for the JSON documents produced by the upstream data pipeline
//! (return series, global-wave event studies and the monthly ranking) and their
//! conversion into `core-types` values. Conversion is forgiving: malformed rows
//! are dropped or defaulted so the dashboard still has something to draw. Only
//! unreadable files and invalid JSON are errors.

pub mod documents;
pub mod error;
pub mod loader;

pub use documents::{
    EventStudy, EventStudyDocument, RankMatrixDocument, ReturnSeriesDocument,
};
pub use error::ArtifactError;
pub use loader::{load_event_study, load_rank_matrix, load_return_series};
