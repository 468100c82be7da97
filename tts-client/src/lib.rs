//! Speech synthesis client for the epub-narrator workspace
//!
//! Provides a single interface over text-to-speech engines that return both
//! audio and a time-aligned subtitle track:
//! - edge-tts (subprocess)
//! - Mock (deterministic, in-memory; for tests)

pub mod config;
pub mod error;
pub mod providers;
pub mod subtitle;
pub mod synthesizer;

pub use config::TtsConfig;
pub use error::{Result, TtsError};
pub use providers::{EdgeTtsCli, MockSynthesizer, ProviderKind, get_synthesizer};
pub use subtitle::{SubtitleCue, SubtitleTrack};
pub use synthesizer::{SpeechSynthesizer, Synthesis, SynthesisRequest};
