use serde::{Deserialize, Serialize};

/// Risk/return summary of one return series over the selected range.
///
/// This struct is the output of the `AnalyticsEngine` and one row of the
/// dashboard's metrics table. It is recomputed, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResult {
    pub label: String,
    /// Geometric (CAGR-style) annualized return.
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub sharpe_ratio: Option<f64>, // None when the excess volatility is zero
    /// Most negative peak-to-trough decline, always `<= 0`.
    pub max_drawdown: f64,
}

impl MetricsResult {
    /// The row rendered for a series with no observations in range.
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            annualized_return: 0.0,
            annualized_volatility: 0.0,
            sharpe_ratio: None,
            max_drawdown: 0.0,
        }
    }
}
