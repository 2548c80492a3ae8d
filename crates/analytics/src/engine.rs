use crate::filter::filter_by_date_range;
use crate::report::MetricsResult;
use core_types::{DateRange, ReturnSeries};

/// Trading days per year, the default annualization factor for daily data.
pub const DEFAULT_PERIODS_PER_YEAR: u32 = 252;

/// A stateless calculator for deriving risk/return metrics from a return series.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsEngine {
    periods_per_year: u32,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PERIODS_PER_YEAR)
    }
}

impl AnalyticsEngine {
    pub fn new(periods_per_year: u32) -> Self {
        Self { periods_per_year }
    }

    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    /// The main entry point for calculating metrics.
    ///
    /// # Arguments
    ///
    /// * `series` - The (already filtered) periodic return series.
    /// * `risk_free_rate` - Annual risk-free rate, spread evenly across periods.
    ///
    /// # Returns
    ///
    /// A `MetricsResult`. An empty series yields the all-zero row with no Sharpe.
    #[tracing::instrument(
        name = "analytics_calculate",
        skip(self, series),
        fields(label = %series.label, n = series.len())
    )]
    pub fn calculate(&self, series: &ReturnSeries, risk_free_rate: f64) -> MetricsResult {
        if series.is_empty() {
            tracing::debug!("No observations in range, returning empty metrics.");
            return MetricsResult::empty(series.label.clone());
        }

        let returns = &series.returns;
        let result = MetricsResult {
            label: series.label.clone(),
            annualized_return: annualized_return(returns, self.periods_per_year),
            annualized_volatility: annualized_volatility(returns, self.periods_per_year),
            sharpe_ratio: sharpe_ratio(returns, risk_free_rate, self.periods_per_year),
            max_drawdown: max_drawdown(returns),
        };
        tracing::debug!(?result, "Calculated metrics.");
        result
    }

    /// Filters each series to `range` and calculates one metrics row per series.
    pub fn calculate_all(
        &self,
        series: &[ReturnSeries],
        range: Option<&DateRange>,
        risk_free_rate: f64,
    ) -> Vec<MetricsResult> {
        series
            .iter()
            .map(|s| match range {
                Some(range) => self.calculate(&filter_by_date_range(s, range), risk_free_rate),
                None => self.calculate(s, risk_free_rate),
            })
            .collect()
    }
}

/// Geometric annualized return: `NAV^(freq/n) - 1`, where `NAV` compounds the whole series.
pub fn annualized_return(returns: &[f64], periods_per_year: u32) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let nav = returns.iter().fold(1.0_f64, |nav, r| nav * (1.0 + r));
    nav.powf(f64::from(periods_per_year) / returns.len() as f64) - 1.0
}

/// Sample standard deviation of the returns scaled by `sqrt(freq)`.
pub fn annualized_volatility(returns: &[f64], periods_per_year: u32) -> f64 {
    sample_std(returns) * f64::from(periods_per_year).sqrt()
}

/// Annualized mean excess return over annualized excess volatility.
///
/// The annual `risk_free_rate` is converted to a per-period rate by dividing by
/// `freq`. Returns `None` when the annualized excess volatility is zero, or not
/// finite (a zero `periods_per_year` or non-finite rate), so a `Some` is always finite.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64, periods_per_year: u32) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    let freq = f64::from(periods_per_year);
    let rf_per_period = risk_free_rate / freq;
    let excess: Vec<f64> = returns.iter().map(|r| r - rf_per_period).collect();

    let excess_vol = sample_std(&excess) * freq.sqrt();
    if excess_vol == 0.0 || !excess_vol.is_finite() {
        return None;
    }
    Some(mean(&excess) * freq / excess_vol).filter(|s| s.is_finite())
}

/// Most negative `NAV / running_peak - 1` along the compounded curve.
///
/// The curve and its peak both start at 1.0, so a loss on the first
/// observation already counts as a drawdown.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut nav = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut worst = 0.0_f64;

    for r in returns {
        nav *= 1.0 + r;
        if nav > peak {
            peak = nav;
        }
        let drawdown = nav / peak - 1.0;
        if drawdown < worst {
            worst = drawdown;
        }
    }

    worst
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected standard deviation; the divisor is clamped to 1 for a single value.
fn sample_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    let divisor = values.len().saturating_sub(1).max(1) as f64;
    (sum_sq / divisor).sqrt()
}
