//! Error taxonomy for a narration run.
//!
//! Watermark mismatches and missing subtitle files are not errors; they are
//! reported per chunk through `ConversionOutcome`.

use std::path::PathBuf;
use thiserror::Error;
use tts_client::TtsError;

#[derive(Error, Debug)]
pub enum NarratorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read book: {0}")]
    Source(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(#[from] TtsError),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl NarratorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, NarratorError>;
