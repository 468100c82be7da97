//! Run configuration, read once from a TOML file at startup.

use crate::error::{NarratorError, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tts_client::TtsConfig;

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Default chunk budget in characters, watermark included.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 10_000;

/// What a run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Extract chapters and log their numbers only (`mode = 1`)
    ListChapters,
    /// Chunk, synthesize and verify the selected chapters (any other value)
    Convert,
}

impl Mode {
    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            Mode::ListChapters
        } else {
            Mode::Convert
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NarratorConfig {
    /// Raw mode selector, see [`Mode`]
    pub mode: i64,

    pub epub: EpubConfig,

    /// Output settings; required in convert mode only
    #[serde(default)]
    pub out: Option<OutputConfig>,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub tts: TtsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpubConfig {
    /// Path to the source book
    pub file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory for `<chapter>-<chunk>.mp3` / `.srt` pairs
    pub path: PathBuf,

    /// Inclusive, 1-based chapter bounds
    pub chapter: ChapterRange,

    /// Voice identifier passed to the synthesizer
    pub voice: String,

    /// Marker appended to every chunk and checked in the subtitles
    pub watermark: String,

    /// Character budget per chunk, watermark included
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChapterRange {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// File receiving the run log (appended)
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}

fn default_max_chunk_size() -> usize {
    DEFAULT_MAX_CHUNK_SIZE
}

fn default_log_file() -> PathBuf {
    PathBuf::from("logfile.log")
}

impl NarratorConfig {
    /// Load and validate config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => NarratorError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )),
            _ => NarratorError::Config(format!("failed to read {}: {}", path.display(), e)),
        })?;

        Self::parse(&content)
            .map_err(|e| NarratorError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse and validate config from TOML text
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let config: NarratorConfig = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn mode(&self) -> Mode {
        Mode::from_code(self.mode)
    }

    /// Output settings, which convert mode cannot run without
    pub fn output(&self) -> Result<&OutputConfig> {
        self.out
            .as_ref()
            .ok_or_else(|| NarratorError::Config("missing [out] table".to_string()))
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.mode() == Mode::ListChapters {
            return Ok(());
        }

        let out = self.out.as_ref().ok_or("missing [out] table")?;

        if out.chapter.start == 0 {
            return Err("out.chapter.start is 1-based and must be at least 1".to_string());
        }

        let watermark_len = out.watermark.chars().count();
        if out.max_chunk_size <= watermark_len {
            return Err(format!(
                "out.max_chunk_size ({}) must exceed the watermark length ({})",
                out.max_chunk_size, watermark_len
            ));
        }

        Ok(())
    }
}
