use core_types::{
    Event, EventKind, ForwardReturnSummary, KindSummary, RankMatrix, ReturnSeries, parse_date,
};
use serde::Deserialize;

// Using `#[serde(rename_all = "camelCase")]` to map the pipeline's camelCase keys
// to Rust snake_case.

/// A daily return series as published by the pipeline.
///
/// The label lives under `label`; older files use `name` instead.
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnSeriesDocument {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub returns: Vec<Option<f64>>,
}

impl ReturnSeriesDocument {
    /// Converts to a `ReturnSeries`, labelled `fallback_label` if the document has no label.
    ///
    /// Surplus dates or returns beyond the shorter of the two are ignored, as are
    /// observations whose return is `null`.
    pub fn into_series(self, fallback_label: &str) -> ReturnSeries {
        let label = self
            .label
            .or(self.name)
            .unwrap_or_else(|| fallback_label.to_string());

        if self.dates.len() != self.returns.len() {
            tracing::warn!(
                %label,
                dates = self.dates.len(),
                returns = self.returns.len(),
                "Return series has mismatched lengths, truncating to the shorter."
            );
        }

        let (dates, returns): (Vec<String>, Vec<f64>) = self
            .dates
            .into_iter()
            .zip(self.returns)
            .filter_map(|(date, r)| r.map(|r| (date, r)))
            .unzip();

        ReturnSeries {
            label,
            dates,
            returns,
        }
    }
}

/// Per-kind summary block of the event document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindSummaryDocument {
    #[serde(default)]
    pub event_count: usize,
    #[serde(default)]
    pub avg6m: Option<f64>,
    #[serde(default)]
    pub avg12m: Option<f64>,
}

impl From<KindSummaryDocument> for KindSummary {
    fn from(doc: KindSummaryDocument) -> Self {
        KindSummary {
            event_count: doc.event_count,
            avg_6m: doc.avg6m,
            avg_12m: doc.avg12m,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryDocument {
    #[serde(default)]
    pub trough: KindSummaryDocument,
    #[serde(default)]
    pub peak: KindSummaryDocument,
}

/// A single event row; `kind` and `date` are validated on conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDocument {
    pub kind: String,
    pub date: String,
    #[serde(default)]
    pub r6m: Option<f64>,
    #[serde(default)]
    pub r12m: Option<f64>,
}

impl EventDocument {
    fn into_event(self) -> Option<Event> {
        let kind = match self.kind.trim().to_ascii_lowercase().as_str() {
            "peak" => EventKind::Peak,
            "trough" => EventKind::Trough,
            _ => return None,
        };
        let date = parse_date(&self.date)?;
        Some(Event {
            kind,
            date,
            r6m: self.r6m,
            r12m: self.r12m,
        })
    }
}

/// The "global wave" document: a summary plus the optional event list.
#[derive(Debug, Clone, Deserialize)]
pub struct EventStudyDocument {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub summary: SummaryDocument,
    #[serde(default)]
    pub events: Vec<EventDocument>,
}

/// The converted event document.
#[derive(Debug, Clone, PartialEq)]
pub struct EventStudy {
    pub label: String,
    pub summary: ForwardReturnSummary,
    pub events: Vec<Event>,
}

impl EventStudyDocument {
    /// Converts to an `EventStudy`, dropping events with an unknown kind or a bad date.
    pub fn into_study(self, fallback_label: &str) -> EventStudy {
        let total = self.events.len();
        let events: Vec<Event> = self
            .events
            .into_iter()
            .filter_map(EventDocument::into_event)
            .collect();
        if events.len() < total {
            tracing::warn!(
                dropped = total - events.len(),
                "Dropped events with an unknown kind or unparseable date."
            );
        }

        EventStudy {
            label: self.label.unwrap_or_else(|| fallback_label.to_string()),
            summary: ForwardReturnSummary {
                peak: self.summary.peak.into(),
                trough: self.summary.trough.into(),
            },
            events,
        }
    }
}

/// The monthly ranking document, indexed `[monthIndex][rank]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankMatrixDocument {
    #[serde(default)]
    pub months: Vec<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub ranked_labels_by_month: Vec<Vec<Option<String>>>,
    #[serde(default)]
    pub ranked_values_by_month: Vec<Vec<Option<f64>>>,
}

impl RankMatrixDocument {
    /// Converts to a `RankMatrix`.
    ///
    /// Without an explicit `categories` list, the universe is every label seen, in
    /// order of first appearance. Value rows are padded with `null` or truncated to
    /// match their label row.
    pub fn into_matrix(self) -> RankMatrix {
        let labels: Vec<Vec<String>> = self
            .ranked_labels_by_month
            .into_iter()
            .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
            .collect();

        let mut value_rows = self.ranked_values_by_month.into_iter();
        let values: Vec<Vec<Option<f64>>> = labels
            .iter()
            .map(|row| {
                let mut values = value_rows.next().unwrap_or_default();
                values.resize(row.len(), None);
                values
            })
            .collect();

        let categories = self.categories.unwrap_or_else(|| {
            let mut seen: Vec<String> = Vec::new();
            for label in labels.iter().flatten() {
                if !label.is_empty() && !seen.contains(label) {
                    seen.push(label.clone());
                }
            }
            seen
        });

        RankMatrix {
            months: self.months,
            categories,
            ranked_labels: labels,
            ranked_values: values,
        }
    }
}
