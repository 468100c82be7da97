use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtsError {
    #[error("Synthesizer not available: {0}")]
    Unavailable(String),

    #[error("edge-tts failed{}: {stderr}", .status.map(|c| format!(" (exit code {})", c)).unwrap_or_default())]
    CommandFailed { status: Option<i32>, stderr: String },

    #[error("Synthesis produced no audio for voice {voice}")]
    EmptyAudio { voice: String },

    #[error("Invalid subtitle track: {0}")]
    InvalidSubtitles(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Mock synthesis failure: {0}")]
    Mock(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TtsError>;
