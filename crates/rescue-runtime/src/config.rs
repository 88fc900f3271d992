//! Reporter configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location searched by [`ReporterConfig::load`], without extension
pub const DEFAULT_CONFIG_NAME: &str = "config/rescue";

/// Settings for the top-level reporter and the raiser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// First line of every uncaught-error report
    #[serde(default = "default_header")]
    pub header: String,

    /// Emit ANSI colors in backtrace lines
    #[serde(default = "default_colorize")]
    pub colorize: bool,

    /// Innermost frames dropped when a backtrace is captured at raise
    #[serde(default = "default_backtrace_offset")]
    pub backtrace_offset: usize,
}

fn default_header() -> String {
    "An exception occurred".to_string()
}

fn default_colorize() -> bool {
    true
}

fn default_backtrace_offset() -> usize {
    1
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            colorize: default_colorize(),
            backtrace_offset: default_backtrace_offset(),
        }
    }
}

impl ReporterConfig {
    /// Parse a YAML document; missing keys take their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load from `config/rescue.*`, `.env` and `RESCUE_*` environment variables
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_NAME)
    }

    /// Like [`load`](Self::load) with an explicit file name
    ///
    /// The file is optional. Environment variables such as `RESCUE_HEADER`,
    /// `RESCUE_COLORIZE` and `RESCUE_BACKTRACE_OFFSET` override it.
    pub fn load_from(name: &str) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(config::Environment::with_prefix("RESCUE").try_parsing(true))
            .build();

        match config_result {
            Ok(cfg) => Ok(cfg.try_deserialize()?),
            Err(err) => {
                tracing::info!(error = %err, "No reporter configuration found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
