use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::config::{
    DEFAULT_GRID_SIZE, DEFAULT_TICK_INTERVAL_MS, GridSize, MAX_GRID_SIZE, MAX_TICK_INTERVAL_MS,
    MIN_GRID_SIZE, MIN_TICK_INTERVAL_MS,
};
use crate::error::ConfigError;

const APP_DIR_NAME: &str = "retro-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Runtime settings, read from JSON and overridable from the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub grid_size: u16,
    pub tick_interval_ms: u64,
    /// Fixed food seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Command-line values that replace file values when present.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SettingsOverrides {
    pub grid_size: Option<u16>,
    pub tick_interval_ms: Option<u64>,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => load_from_path(path, false),
            None => load_from_path(&default_config_path(), true),
        }
    }

    /// Applies `overrides` on top of these settings, then validates the result.
    pub fn resolve(mut self, overrides: SettingsOverrides) -> Result<Self, ConfigError> {
        if let Some(grid_size) = overrides.grid_size {
            self.grid_size = grid_size;
        }
        if let Some(tick_interval_ms) = overrides.tick_interval_ms {
            self.tick_interval_ms = tick_interval_ms;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }

        self.validate()?;
        Ok(self)
    }

    /// Rejects values outside the supported ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "grid_size",
            u64::from(self.grid_size),
            u64::from(MIN_GRID_SIZE),
            u64::from(MAX_GRID_SIZE),
        )?;
        check_range(
            "tick_interval_ms",
            self.tick_interval_ms,
            MIN_TICK_INTERVAL_MS,
            MAX_TICK_INTERVAL_MS,
        )
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize::square(self.grid_size)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn default_config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

fn load_from_path(path: &Path, missing_is_default: bool) -> Result<Settings, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if missing_is_default && e.kind() == io::ErrorKind::NotFound => {
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
