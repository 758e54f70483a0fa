use std::fs::File;
use std::path::{Path, PathBuf};

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::error::AppError;

const LOG_FILE_NAME: &str = "retro-snake.log";

/// Default log location; stdout belongs to the terminal UI.
#[must_use]
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Installs a file logger. `LevelFilter::Off` skips installation entirely.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    if level == LevelFilter::Off {
        return Ok(());
    }

    let file = File::create(path)
        .map_err(|error| AppError::Logging(format!("{}: {error}", path.display())))?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Debug)
        .build();

    WriteLogger::init(level, config, file).map_err(|error| AppError::Logging(error.to_string()))
}
