//! Run log setup.
//!
//! Everything logged through the `log` macros is appended to the file named
//! in `[log]`. `RUST_LOG` overrides the level.

use crate::config::LogConfig;
use crate::error::{NarratorError, Result};
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;

/// Install the global logger writing to the configured file.
pub fn init(config: &LogConfig, debug: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| NarratorError::io(&config.file, e))?;

    let default_level = if debug { "debug" } else { "info" };

    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .try_init()
        .map_err(|e| NarratorError::Logging(e.to_string()))
}
