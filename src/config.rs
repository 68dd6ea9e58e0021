//! Layered settings: built-in defaults, an optional TOML file in the user's
//! config directory, then `TODO_MANAGER_*` environment variables.

use crate::error::Result;
use chrono::format::{Item, StrftimeItems};
use config::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "todo-list-manager";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "TODO_MANAGER";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// chrono format string for completion timestamps.
    pub timestamp_format: String,
    /// Wait for a key press after listing tasks.
    pub pause_after_view: bool,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            timestamp_format: "%a %b %e %H:%M:%S %Y".to_string(),
            pause_after_view: true,
            color: true,
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path().as_deref())
    }

    /// A missing file is not an error; a malformed one is.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Rejects a `timestamp_format` chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Message(format!(
                "invalid timestamp_format '{}'",
                self.timestamp_format
            ))
            .into());
        }
        Ok(())
    }
}
