//! TOML configuration for the calculator binary.
//!
//! ```toml
//! log_level = "info"
//! log_file = "calculator.log"
//! brackets = "bracket_tables.csv"
//!
//! [currency]
//! code = "LKR"
//! grouping = "indian"
//!
//! [sscl]
//! sale_tax_rate = "0.025"
//! vat_rate = "0.15"
//! ```
//!
//! Every key is optional. Relative paths are resolved against the directory
//! holding the config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tax_core::calculations::SsclConfig;
use thiserror::Error;
use tracing::info;

use crate::utils::CurrencyFormat;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    /// Bracket table CSV replacing the built-in tables.
    pub brackets: Option<PathBuf>,
    pub currency: CurrencyFormat,
    pub sscl: SsclConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
            brackets: None,
            currency: CurrencyFormat::default(),
            sscl: SsclConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&text)?;
        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn resolve_paths(
        &mut self,
        base: &Path,
    ) {
        for path in [&mut self.log_file, &mut self.brackets].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
