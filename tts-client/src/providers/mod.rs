//! Speech synthesizer implementations

mod edge_tts;
pub mod mock;

pub use edge_tts::EdgeTtsCli;
pub use mock::MockSynthesizer;

use crate::config::TtsConfig;
use crate::error::{Result, TtsError};
use crate::synthesizer::SpeechSynthesizer;

/// Supported synthesizer types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    EdgeTts,
    Mock,
}

impl ProviderKind {
    /// Parse provider kind from string
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "edge-tts" | "edge_tts" | "edgetts" | "edge" => Ok(Self::EdgeTts),
            "mock" => Ok(Self::Mock),
            _ => Err(TtsError::Config(format!("Unknown provider: {}", s))),
        }
    }
}

/// Create a synthesizer instance from config
pub fn get_synthesizer(config: &TtsConfig) -> Result<Box<dyn SpeechSynthesizer>> {
    let synthesizer: Box<dyn SpeechSynthesizer> = match ProviderKind::from_str(&config.provider)? {
        ProviderKind::EdgeTts => Box::new(EdgeTtsCli::new(config)?),
        ProviderKind::Mock => Box::new(MockSynthesizer::always_succeeds()),
    };
    synthesizer.is_available()?;
    Ok(synthesizer)
}
