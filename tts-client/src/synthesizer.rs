use async_trait::async_trait;

use crate::error::Result;
use crate::subtitle::SubtitleTrack;

/// Request to send to a speech synthesizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
        }
    }
}

/// Completed synthesis: the whole audio stream plus its subtitle track
#[derive(Debug, Clone)]
pub struct Synthesis {
    /// Encoded audio (mp3 for edge-tts)
    pub audio: Vec<u8>,
    /// Word- or phrase-aligned subtitles for the audio
    pub subtitles: SubtitleTrack,
}

/// Trait for speech synthesis engines
///
/// Implementations await the engine to completion; there is no retry here.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Convert text into audio and a subtitle track using the given voice
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Synthesis>;

    /// Get the synthesizer name for display
    fn name(&self) -> &'static str;

    /// Check if the synthesizer can run (binary installed, etc.)
    fn is_available(&self) -> Result<()>;
}
