use crate::date::parse_date;
use crate::enums::{EventKind, Horizon};
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A labelled sequence of periodic fractional returns, one per observation date.
///
/// Dates are kept as the raw ISO strings delivered by the artifact. Parseable
/// dates must be strictly ascending (checked by `new`), but no trading-calendar
/// validation happens here; a date that fails to parse is simply ignored by
/// date-aware consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    pub label: String,
    pub dates: Vec<String>,
    pub returns: Vec<f64>,
}

impl ReturnSeries {
    pub fn new(
        label: impl Into<String>,
        dates: Vec<String>,
        returns: Vec<f64>,
    ) -> Result<Self, CoreError> {
        if dates.len() != returns.len() {
            return Err(CoreError::LengthMismatch {
                dates: dates.len(),
                returns: returns.len(),
            });
        }
        let mut previous: Option<(&str, NaiveDate)> = None;
        for raw in &dates {
            let Some(date) = parse_date(raw) else {
                continue;
            };
            if let Some((prev_raw, prev)) = previous {
                if date <= prev {
                    return Err(CoreError::UnsortedDates {
                        previous: prev_raw.to_string(),
                        next: raw.clone(),
                    });
                }
            }
            previous = Some((raw.as_str(), date));
        }
        Ok(Self {
            label: label.into(),
            dates,
            returns,
        })
    }

    /// An empty series carrying only a label.
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            dates: Vec::new(),
            returns: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Observations whose date parses, in series order.
    pub fn parsed_observations(&self) -> impl Iterator<Item = (usize, NaiveDate, f64)> + '_ {
        self.dates
            .iter()
            .zip(self.returns.iter())
            .enumerate()
            .filter_map(|(i, (raw, r))| parse_date(raw).map(|d| (i, d, *r)))
    }
}

/// A dated peak or trough identified upstream on the benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub date: NaiveDate,
    /// Forward returns the upstream pipeline attached to this event, if any.
    #[serde(default)]
    pub r6m: Option<f64>,
    #[serde(default)]
    pub r12m: Option<f64>,
}

impl Event {
    pub fn new(kind: EventKind, date: NaiveDate) -> Self {
        Self {
            kind,
            date,
            r6m: None,
            r12m: None,
        }
    }
}

/// Event count and average forward return for one kind at one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonStats {
    pub event_count: usize,
    pub average_forward_return: Option<f64>,
}

/// Forward-return averages for one event kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindSummary {
    pub event_count: usize,
    pub avg_6m: Option<f64>,
    pub avg_12m: Option<f64>,
}

impl KindSummary {
    pub fn horizon(&self, horizon: Horizon) -> HorizonStats {
        let average_forward_return = match horizon {
            Horizon::SixMonths => self.avg_6m,
            Horizon::TwelveMonths => self.avg_12m,
        };
        HorizonStats {
            event_count: self.event_count,
            average_forward_return,
        }
    }
}

/// Per-kind, per-horizon forward-return averages following peaks and troughs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForwardReturnSummary {
    pub peak: KindSummary,
    pub trough: KindSummary,
}

impl ForwardReturnSummary {
    pub fn kind(&self, kind: EventKind) -> &KindSummary {
        match kind {
            EventKind::Peak => &self.peak,
            EventKind::Trough => &self.trough,
        }
    }

    pub fn get(&self, kind: EventKind, horizon: Horizon) -> HorizonStats {
        self.kind(kind).horizon(horizon)
    }
}

/// Month-by-rank grid of category labels with their ranking values.
///
/// `ranked_labels[m][k]` is the category holding rank `k + 1` (best first) in
/// month `m`; `ranked_values[m][k]` is the value it was ranked on. An empty
/// label marks a rank with no entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankMatrix {
    pub months: Vec<String>,
    pub categories: Vec<String>,
    pub ranked_labels: Vec<Vec<String>>,
    pub ranked_values: Vec<Vec<Option<f64>>>,
}

impl RankMatrix {
    pub fn new(
        months: Vec<String>,
        categories: Vec<String>,
        ranked_labels: Vec<Vec<String>>,
        ranked_values: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, CoreError> {
        for (month, labels) in ranked_labels.iter().enumerate() {
            let values = ranked_values.get(month).map_or(0, Vec::len);
            if labels.len() != values {
                return Err(CoreError::RankRowMismatch {
                    month,
                    labels: labels.len(),
                    values,
                });
            }
        }
        Ok(Self {
            months,
            categories,
            ranked_labels,
            ranked_values,
        })
    }

    /// The deepest rank present in any month.
    pub fn rank_count(&self) -> usize {
        self.ranked_labels.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Label and value at `(month, rank)`, with ranks zero-based.
    pub fn cell(&self, month: usize, rank: usize) -> Option<(&str, Option<f64>)> {
        let label = self.ranked_labels.get(month)?.get(rank)?;
        let value = self
            .ranked_values
            .get(month)
            .and_then(|row| row.get(rank))
            .copied()
            .flatten();
        Some((label.as_str(), value))
    }
}
