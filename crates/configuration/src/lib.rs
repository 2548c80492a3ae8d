use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
#[cfg(feature = "clap")]
pub use settings::AnalysisArgs;
pub use settings::{AnalysisSettings, CategoryColor, LoggingSettings, PaletteSettings};

/// Default configuration file, looked up in the working directory when
/// `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "factorlens.toml";

/// Prefix for environment overrides, e.g. `FACTORLENS__ANALYSIS__RISK_FREE_RATE`.
const ENV_PREFIX: &str = "FACTORLENS";

/// Loads the configuration from `path` layered under environment overrides.
///
/// A missing file is not an error; every section has defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
