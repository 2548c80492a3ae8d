use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub palette: PaletteSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Config {
    /// Rejects values the engine cannot annualize with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()
    }
}

/// Parameters for the metrics calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSettings {
    /// Observations per year; 252 for daily trading data.
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
    /// Annual risk-free rate as a fraction (0.02 for 2%).
    #[serde(default)]
    pub risk_free_rate: f64,
    /// Inclusive date range bounds. Kept as strings: a malformed bound
    /// disables filtering instead of failing the load.
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

fn default_periods_per_year() -> u32 {
    252
}

impl AnalysisSettings {
    /// Checked again after CLI overrides are applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.periods_per_year == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.periods_per_year must be greater than zero".to_string(),
            ));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(ConfigError::ValidationError(
                "analysis.risk_free_rate must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            periods_per_year: default_periods_per_year(),
            risk_free_rate: 0.0,
            start_date: None,
            end_date: None,
        }
    }
}

/// One `[[palette.colors]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryColor {
    pub category: String,
    pub color: String,
}

/// Category colors for the rank heatmap.
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteSettings {
    #[serde(default = "default_color")]
    pub default_color: String,
    #[serde(default)]
    pub colors: Vec<CategoryColor>,
}

fn default_color() -> String {
    "#cccccc".to_string()
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            colors: Vec::new(),
        }
    }
}

impl PaletteSettings {
    /// The category → color map; later entries win on duplicates.
    pub fn color_map(&self) -> HashMap<String, String> {
        self.colors
            .iter()
            .map(|c| (c.category.clone(), c.color.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// When set, logs are also written to daily-rolling files here.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: None,
        }
    }
}

/// Command-line overrides for `AnalysisSettings`.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AnalysisArgs {
    /// Start of the date range (format: YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<String>,

    /// End of the date range (format: YYYY-MM-DD).
    #[arg(long)]
    pub end: Option<String>,

    /// Annual risk-free rate as a fraction (e.g., 0.02).
    #[arg(long)]
    pub rf: Option<f64>,

    /// Periods per year used for annualization.
    #[arg(long)]
    pub freq: Option<u32>,
}

#[cfg(feature = "clap")]
impl AnalysisArgs {
    /// Applies the overrides and re-validates the result.
    pub fn resolve(&self, base: &AnalysisSettings) -> Result<AnalysisSettings, ConfigError> {
        let mut settings = base.clone();
        self.apply(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply(&self, settings: &mut AnalysisSettings) {
        if let Some(start) = &self.start {
            settings.start_date = Some(start.clone());
        }
        if let Some(end) = &self.end {
            settings.end_date = Some(end.clone());
        }
        if let Some(rf) = self.rf {
            settings.risk_free_rate = rf;
        }
        if let Some(freq) = self.freq {
            settings.periods_per_year = freq;
        }
    }
}
