use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Synthesizer selection and engine options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// Provider identifier (edge-tts, mock)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Path to the edge-tts binary (looked up in PATH when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli_path: Option<PathBuf>,

    /// Speaking rate adjustment, e.g. "+10%"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,

    /// Volume adjustment, e.g. "-5%"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,

    /// Pitch adjustment, e.g. "+2Hz"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
}

fn default_provider() -> String {
    "edge-tts".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            cli_path: None,
            rate: None,
            volume: None,
            pitch: None,
        }
    }
}
