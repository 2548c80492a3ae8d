use crate::curve::cumulative_curve;
use chrono::NaiveDate;
use core_types::{Event, EventKind, ReturnSeries};
use serde::{Deserialize, Serialize};

/// An event placed on the benchmark's cumulative curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedMarker {
    pub kind: EventKind,
    /// The date the event was reported on.
    pub event_date: NaiveDate,
    /// The first observation dated on or after `event_date`.
    pub date: String,
    pub index: usize,
    /// Cumulative benchmark value at `index`.
    pub value: f64,
}

/// A vertical line drawn at an event's original date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub kind: EventKind,
    pub date: NaiveDate,
}

/// Peak and trough markers ready to overlay on the benchmark curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOverlay {
    pub peaks: Vec<AlignedMarker>,
    pub troughs: Vec<AlignedMarker>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl EventOverlay {
    pub fn markers(&self, kind: EventKind) -> &[AlignedMarker] {
        match kind {
            EventKind::Peak => &self.peaks,
            EventKind::Trough => &self.troughs,
        }
    }

    pub fn len(&self) -> usize {
        self.peaks.len() + self.troughs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Aligns each event to the first benchmark observation dated on or after it.
///
/// Events falling on a non-trading day attach to the next available observation.
/// Events dated after the last observation have no target and are dropped, along
/// with their reference lines. Observations with unparseable dates are never
/// alignment targets.
///
/// The benchmark's parseable dates must be strictly ascending, as enforced by
/// `ReturnSeries::new`; the lookup is a binary search over them.
pub fn align_events(benchmark: &ReturnSeries, events: &[Event]) -> EventOverlay {
    let curve = cumulative_curve(&benchmark.returns);
    let observations: Vec<(usize, NaiveDate)> = benchmark
        .parsed_observations()
        .map(|(i, date, _)| (i, date))
        .collect();

    let mut overlay = EventOverlay::default();
    let mut dropped = 0usize;

    for event in events {
        let pos = observations.partition_point(|(_, date)| *date < event.date);
        let Some(&(index, _)) = observations.get(pos) else {
            dropped += 1;
            continue;
        };

        let marker = AlignedMarker {
            kind: event.kind,
            event_date: event.date,
            date: benchmark.dates[index].clone(),
            index,
            value: curve[index],
        };
        match event.kind {
            EventKind::Peak => overlay.peaks.push(marker),
            EventKind::Trough => overlay.troughs.push(marker),
        }
        overlay.reference_lines.push(ReferenceLine {
            kind: event.kind,
            date: event.date,
        });
    }

    if dropped > 0 {
        tracing::warn!(
            benchmark = %benchmark.label,
            dropped,
            "Events after the last benchmark observation were dropped."
        );
    }
    tracing::debug!(
        peaks = overlay.peaks.len(),
        troughs = overlay.troughs.len(),
        "Aligned events to benchmark."
    );

    overlay
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn benchmark() -> ReturnSeries {
        ReturnSeries::new(
            "SPX",
            vec!["2020-03-13".into(), "2020-03-16".into(), "2020-03-20".into()],
            vec![0.1, -0.1, 0.2],
        )
        .unwrap()
    }

    #[test]
    fn weekend_event_aligns_to_next_observation() {
        let events = [Event::new(EventKind::Trough, date("2020-03-15"))];
        let overlay = align_events(&benchmark(), &events);
        assert_eq!(overlay.troughs.len(), 1);
        let marker = &overlay.troughs[0];
        assert_eq!(marker.date, "2020-03-16");
        assert_eq!(marker.index, 1);
        assert!((marker.value - 0.99).abs() < 1e-12);
        assert_eq!(overlay.reference_lines[0].date, date("2020-03-15"));
    }

    #[test]
    fn event_on_observation_date_aligns_to_itself() {
        let events = [Event::new(EventKind::Peak, date("2020-03-13"))];
        let overlay = align_events(&benchmark(), &events);
        assert_eq!(overlay.peaks[0].index, 0);
        assert!((overlay.peaks[0].value - 1.1).abs() < 1e-12);
    }

    #[test]
    fn event_before_first_observation_aligns_to_first() {
        let events = [Event::new(EventKind::Peak, date("2019-12-31"))];
        let overlay = align_events(&benchmark(), &events);
        assert_eq!(overlay.peaks[0].date, "2020-03-13");
    }

    #[test]
    fn events_after_last_observation_are_dropped() {
        let events = [
            Event::new(EventKind::Peak, date("2020-03-20")),
            Event::new(EventKind::Trough, date("2020-03-21")),
        ];
        let overlay = align_events(&benchmark(), &events);
        assert_eq!(overlay.peaks.len(), 1);
        assert!(overlay.troughs.is_empty());
        assert_eq!(overlay.reference_lines.len(), 1);
    }

    #[test]
    fn partitions_by_kind_in_input_order() {
        let events = [
            Event::new(EventKind::Peak, date("2020-03-12")),
            Event::new(EventKind::Trough, date("2020-03-14")),
            Event::new(EventKind::Peak, date("2020-03-17")),
        ];
        let overlay = align_events(&benchmark(), &events);
        assert_eq!(overlay.len(), 3);
        let peak_dates: Vec<&str> = overlay
            .markers(EventKind::Peak)
            .iter()
            .map(|m| m.date.as_str())
            .collect();
        assert_eq!(peak_dates, vec!["2020-03-13", "2020-03-20"]);
        assert_eq!(overlay.markers(EventKind::Trough)[0].date, "2020-03-16");
    }

    #[test]
    fn skips_unparseable_benchmark_dates() {
        let benchmark = ReturnSeries::new(
            "SPX",
            vec!["2020-03-13".into(), "??".into(), "2020-03-20".into()],
            vec![0.0, 0.5, 0.0],
        )
        .unwrap();
        let events = [Event::new(EventKind::Trough, date("2020-03-14"))];
        let overlay = align_events(&benchmark, &events);
        assert_eq!(overlay.troughs[0].index, 2);
        assert!((overlay.troughs[0].value - 1.5).abs() < 1e-12);
    }

    #[test]
    fn empty_benchmark_drops_everything() {
        let events = [Event::new(EventKind::Peak, date("2020-01-01"))];
        let overlay = align_events(&ReturnSeries::empty("SPX"), &events);
        assert!(overlay.is_empty());
        assert!(overlay.reference_lines.is_empty());
    }
}
