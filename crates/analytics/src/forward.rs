//! Forward-return aggregation from raw benchmark returns.
//!
//! Summaries normally arrive pre-built with the event artifact. This module
//! recomputes them when only the benchmark series and event dates are known.
//!
//! The window for an event dated `d` and a horizon of `N` months covers every
//! observation dated strictly after `d` and on or before `d + N months` (month
//! arithmetic clamps to the end of shorter months). A window is only complete
//! once the benchmark has an observation on or after its end; incomplete windows
//! contribute no value.

use chrono::{Months, NaiveDate};
use core_types::{Event, EventKind, ForwardReturnSummary, Horizon, KindSummary, ReturnSeries};

/// Compounded benchmark return over the forward window following `event_date`.
///
/// `None` when the window is incomplete.
pub fn forward_return(
    benchmark: &ReturnSeries,
    event_date: NaiveDate,
    horizon: Horizon,
) -> Option<f64> {
    let window_end = event_date.checked_add_months(Months::new(horizon.months()))?;

    let mut last_seen: Option<NaiveDate> = None;
    let mut growth = 1.0_f64;
    for (_, date, r) in benchmark.parsed_observations() {
        if last_seen.is_none_or(|seen| date > seen) {
            last_seen = Some(date);
        }
        if event_date < date && date <= window_end {
            growth *= 1.0 + r;
        }
    }

    match last_seen {
        Some(last) if last >= window_end => Some(growth - 1.0),
        _ => None,
    }
}

/// Builds a `ForwardReturnSummary` by averaging forward returns per kind and horizon.
///
/// `event_count` counts every event of the kind; averages cover complete windows
/// only and are `None` when no window is complete.
pub fn compute_forward_summary(
    benchmark: &ReturnSeries,
    events: &[Event],
) -> ForwardReturnSummary {
    ForwardReturnSummary {
        peak: summarize_kind(benchmark, events, EventKind::Peak),
        trough: summarize_kind(benchmark, events, EventKind::Trough),
    }
}

fn summarize_kind(benchmark: &ReturnSeries, events: &[Event], kind: EventKind) -> KindSummary {
    let dates: Vec<NaiveDate> = events
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| e.date)
        .collect();

    let average = |horizon: Horizon| -> Option<f64> {
        let values: Vec<f64> = dates
            .iter()
            .filter_map(|d| forward_return(benchmark, *d, horizon))
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    };

    let summary = KindSummary {
        event_count: dates.len(),
        avg_6m: average(Horizon::SixMonths),
        avg_12m: average(Horizon::TwelveMonths),
    };
    tracing::debug!(%kind, ?summary, "Computed forward-return summary.");
    summary
}
