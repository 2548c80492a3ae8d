//! # Factor Analytics Engine
//!
//! Pure, deterministic transforms over daily return series and categorical
//! event data, feeding the factor dashboard.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** No I/O and no global configuration. Everything a function
//!   needs (periods per year, risk-free rate, color table) is passed in.
//! - **Total functions:** Malformed or degenerate input resolves to a well-defined
//!   default (`0`, `None`, an empty vector or the unfiltered series), never to an
//!   error, so the presentation layer always has something to render.
//!
//! ## Public API
//!
//! - `filter_by_date_range`: restricts a series to an inclusive calendar interval.
//! - `cumulative_curve` / `cumulative_points`: growth-of-1 curves.
//! - `AnalyticsEngine`: annualized return, volatility, Sharpe and max drawdown.
//! - `align_events` / `compute_forward_summary`: event overlays and forward returns.
//! - `encode_rank_heatmap` / `discrete_colorscale`: categorical heatmap encoding.

pub mod curve;
pub mod engine;
pub mod events;
pub mod filter;
pub mod forward;
pub mod heatmap;
pub mod palette;
pub mod report;

pub use curve::{CurvePoint, cumulative_curve, cumulative_points};
pub use engine::{
    AnalyticsEngine, DEFAULT_PERIODS_PER_YEAR, annualized_return, annualized_volatility,
    max_drawdown, sharpe_ratio,
};
pub use events::{AlignedMarker, EventOverlay, ReferenceLine, align_events};
pub use filter::filter_by_date_range;
pub use forward::{compute_forward_summary, forward_return};
pub use heatmap::{RankHeatmap, UNKNOWN_CATEGORY, encode_rank_heatmap, format_pct};
pub use palette::{ColorStop, ColorTable, DEFAULT_COLOR, discrete_colorscale};
pub use report::MetricsResult;
