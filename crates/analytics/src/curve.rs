use core_types::ReturnSeries;
use serde::{Deserialize, Serialize};

/// Compounds periodic returns into a growth-of-1 curve.
///
/// `v[i]` is the product of `(1 + r[j])` for `j <= i`, starting from an implicit
/// value of 1. Returns at or below -100% are not clamped.
pub fn cumulative_curve(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0_f64, |nav, r| {
            *nav *= 1.0 + r;
            Some(*nav)
        })
        .collect()
}

/// One dated point on a cumulative curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub date: String,
    pub value: f64,
}

/// The cumulative curve of `series` paired with its observation dates.
pub fn cumulative_points(series: &ReturnSeries) -> Vec<CurvePoint> {
    series
        .dates
        .iter()
        .zip(cumulative_curve(&series.returns))
        .map(|(date, value)| CurvePoint {
            date: date.clone(),
            value,
        })
        .collect()
}
