use core_types::{DateRange, ReturnSeries, parse_date};

/// Restricts `series` to the observations dated within `range`, inclusive on both ends.
///
/// Observations whose date does not parse are dropped. If either bound of the
/// range does not parse, the series is returned unfiltered.
pub fn filter_by_date_range(series: &ReturnSeries, range: &DateRange) -> ReturnSeries {
    let Some((start, end)) = range.bounds() else {
        tracing::debug!(
            label = %series.label,
            start = %range.start,
            end = %range.end,
            "Unparseable date range, returning series unfiltered."
        );
        return series.clone();
    };

    let mut dates = Vec::with_capacity(series.len());
    let mut returns = Vec::with_capacity(series.len());
    let mut skipped = 0usize;

    for (raw, r) in series.dates.iter().zip(series.returns.iter()) {
        match parse_date(raw) {
            Some(date) if start <= date && date <= end => {
                dates.push(raw.clone());
                returns.push(*r);
            }
            Some(_) => {}
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(
            label = %series.label,
            skipped,
            "Dropped observations with unparseable dates."
        );
    }

    ReturnSeries {
        label: series.label.clone(),
        dates,
        returns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> ReturnSeries {
        ReturnSeries::new(
            "value",
            vec![
                "2020-01-02".into(),
                "2020-01-03".into(),
                "not-a-date".into(),
                "2020-01-06".into(),
                "2020-01-07".into(),
            ],
            vec![0.01, -0.02, 0.5, 0.03, 0.04],
        )
        .unwrap()
    }

    #[test]
    fn keeps_inclusive_bounds() {
        let out = filter_by_date_range(&series(), &DateRange::new("2020-01-03", "2020-01-06"));
        assert_eq!(out.dates, vec!["2020-01-03", "2020-01-06"]);
        assert_eq!(out.returns, vec![-0.02, 0.03]);
        assert_eq!(out.label, "value");
    }

    #[test]
    fn drops_unparseable_observation_dates() {
        let out = filter_by_date_range(&series(), &DateRange::new("2000-01-01", "2100-01-01"));
        assert_eq!(out.len(), 4);
        assert!(!out.returns.contains(&0.5));
    }

    #[test]
    fn bad_bounds_return_original_series() {
        let original = series();
        let out = filter_by_date_range(&original, &DateRange::new("2020-01-03", "31/12/2020"));
        assert_eq!(out, original);
        let out = filter_by_date_range(&original, &DateRange::new("", "2020-01-06"));
        assert_eq!(out, original);
    }

    #[test]
    fn inverted_range_is_empty() {
        let out = filter_by_date_range(&series(), &DateRange::new("2020-01-07", "2020-01-02"));
        assert!(out.is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let range = DateRange::new("2020-01-03", "2020-01-07");
        let once = filter_by_date_range(&series(), &range);
        let twice = filter_by_date_range(&once, &range);
        assert_eq!(once, twice);
    }
}
