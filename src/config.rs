//! Global configuration parsing and validation.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::display::locale::{DateStyle, ListStyle};
use crate::{AppError, Result};

/// Locale settings applied to every rendered view.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DisplayConfig {
    /// Calendar date ordering.
    #[serde(default)]
    pub date_style: DateStyle,
    /// Separators used when joining audience names.
    #[serde(flatten)]
    pub list: ListStyle,
}

fn default_database_path() -> String {
    "communicator.db".into()
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Path to the `SQLite` database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Display locale settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            display: DisplayConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database_path.trim().is_empty() {
            return Err(AppError::Config("database_path must not be empty".into()));
        }

        if self.display.list.final_separator.is_empty() {
            return Err(AppError::Config(
                "display.final_separator must not be empty".into(),
            ));
        }

        Ok(())
    }
}
