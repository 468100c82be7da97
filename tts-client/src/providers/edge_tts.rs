//! edge-tts provider
//!
//! Runs the `edge-tts` command line tool as a subprocess. Input text goes
//! through a temporary file so chapter-sized chunks don't hit argv limits.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::process::Command;

use crate::config::TtsConfig;
use crate::error::{Result, TtsError};
use crate::subtitle::SubtitleTrack;
use crate::synthesizer::{SpeechSynthesizer, Synthesis, SynthesisRequest};

/// Synthesizer backed by the edge-tts CLI
#[derive(Debug)]
pub struct EdgeTtsCli {
    cli_path: PathBuf,
    rate: Option<String>,
    volume: Option<String>,
    pitch: Option<String>,
}

impl EdgeTtsCli {
    /// Create a new edge-tts synthesizer
    ///
    /// Returns an error if the edge-tts binary is not found.
    pub fn new(config: &TtsConfig) -> Result<Self> {
        let cli_path = match &config.cli_path {
            Some(path) => {
                if !path.exists() {
                    return Err(TtsError::Unavailable(format!(
                        "edge-tts not found at specified path: {}",
                        path.display()
                    )));
                }
                path.clone()
            }
            None => which::which("edge-tts").map_err(|_| {
                TtsError::Unavailable(
                    "edge-tts not found in PATH. Install with `pip install edge-tts`".into(),
                )
            })?,
        };

        Ok(Self {
            cli_path,
            rate: config.rate.clone(),
            volume: config.volume.clone(),
            pitch: config.pitch.clone(),
        })
    }

    /// Prosody flags; `=` keeps values like "-10%" from parsing as options.
    fn prosody_args(&self) -> Vec<String> {
        [
            ("rate", &self.rate),
            ("volume", &self.volume),
            ("pitch", &self.pitch),
        ]
        .into_iter()
        .filter_map(|(flag, value)| value.as_ref().map(|v| format!("--{}={}", flag, v)))
        .collect()
    }
}

#[async_trait]
impl SpeechSynthesizer for EdgeTtsCli {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Synthesis> {
        let workdir = tempfile::TempDir::new()?;
        let text_path = workdir.path().join("input.txt");
        let media_path = workdir.path().join("speech.mp3");
        let subtitle_path = workdir.path().join("speech.srt");

        tokio::fs::write(&text_path, &request.text).await?;

        let output = Command::new(&self.cli_path)
            .arg("--file")
            .arg(&text_path)
            .args(["--voice", &request.voice])
            .args(self.prosody_args())
            .arg("--write-media")
            .arg(&media_path)
            .arg("--write-subtitles")
            .arg(&subtitle_path)
            .output()
            .await
            .map_err(|e| {
                TtsError::Unavailable(format!(
                    "Failed to execute {}: {}",
                    self.cli_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(TtsError::CommandFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let audio = tokio::fs::read(&media_path).await?;
        if audio.is_empty() {
            return Err(TtsError::EmptyAudio {
                voice: request.voice.clone(),
            });
        }

        // A missing or malformed track is left for the caller's verification to flag
        let subtitles = match tokio::fs::read_to_string(&subtitle_path).await {
            Ok(content) => SubtitleTrack::parse(&content).unwrap_or_else(|e| {
                log::warn!("edge-tts wrote unusable subtitles for voice {}: {}", request.voice, e);
                SubtitleTrack::default()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("edge-tts wrote no subtitles for voice {}", request.voice);
                SubtitleTrack::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Synthesis { audio, subtitles })
    }

    fn name(&self) -> &'static str {
        "edge-tts"
    }

    fn is_available(&self) -> Result<()> {
        // Availability was checked in constructor
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_path() {
        let config = TtsConfig {
            cli_path: Some(PathBuf::from("/nonexistent/bin/edge-tts")),
            ..TtsConfig::default()
        };
        let err = EdgeTtsCli::new(&config).unwrap_err();
        assert!(matches!(err, TtsError::Unavailable(_)));
        assert!(err.to_string().contains("/nonexistent/bin/edge-tts"));
    }

    #[test]
    fn test_prosody_args() {
        let synth = EdgeTtsCli {
            cli_path: PathBuf::from("edge-tts"),
            rate: Some("-10%".to_string()),
            volume: None,
            pitch: Some("+5Hz".to_string()),
        };
        assert_eq!(synth.prosody_args(), vec!["--rate=-10%", "--pitch=+5Hz"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_command_reports_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("edge-tts");
        std::fs::write(&script, "#!/bin/sh\necho 'voice not found' >&2\nexit 3\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let config = TtsConfig {
            cli_path: Some(script),
            ..TtsConfig::default()
        };
        let synth = EdgeTtsCli::new(&config).unwrap();
        let err = synth
            .synthesize(&SynthesisRequest::new("Hello", "xx-XX-Nobody"))
            .await
            .unwrap_err();

        match err {
            TtsError::CommandFailed { status, stderr } => {
                assert_eq!(status, Some(3));
                assert_eq!(stderr, "voice not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reads_media_and_subtitles() {
        use std::os::unix::fs::PermissionsExt;

        // Fake edge-tts: args are --file F --voice V --write-media M --write-subtitles S
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("edge-tts");
        std::fs::write(
            &script,
            "#!/bin/sh\n\
             printf 'ID3fake' > \"$6\"\n\
             printf '1\\n00:00:00,000 --> 00:00:00,500\\nHello\\n\\n2\\n00:00:00,500 --> 00:00:01,000\\n[END]\\n' > \"$8\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let config = TtsConfig {
            cli_path: Some(script),
            ..TtsConfig::default()
        };
        let synth = EdgeTtsCli::new(&config).unwrap();
        let result = synth
            .synthesize(&SynthesisRequest::new("Hello\n[END]", "en-US-AriaNeural"))
            .await
            .unwrap();

        assert_eq!(result.audio, b"ID3fake");
        assert_eq!(result.subtitles.cues.len(), 2);
        assert_eq!(result.subtitles.text(), "Hello [END]");
    }

    #[cfg(unix)]
    fn fake_cli(dir: &std::path::Path, body: &str) -> EdgeTtsCli {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("edge-tts");
        std::fs::write(&script, format!("#!/bin/sh\n{}", body)).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let config = TtsConfig {
            cli_path: Some(script),
            ..TtsConfig::default()
        };
        EdgeTtsCli::new(&config).unwrap()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_malformed_subtitles_give_empty_track() {
        let dir = tempfile::TempDir::new().unwrap();
        let synth = fake_cli(
            dir.path(),
            "printf 'ID3fake' > \"$6\"\nprintf '1\\nHello\\n' > \"$8\"\n",
        );

        let result = synth
            .synthesize(&SynthesisRequest::new("Hello[END]", "en-US-AriaNeural"))
            .await
            .unwrap();

        assert_eq!(result.audio, b"ID3fake");
        assert!(result.subtitles.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_subtitles_give_empty_track() {
        let dir = tempfile::TempDir::new().unwrap();
        let synth = fake_cli(dir.path(), "printf 'ID3fake' > \"$6\"\n");

        let result = synth
            .synthesize(&SynthesisRequest::new("Hello[END]", "en-US-AriaNeural"))
            .await
            .unwrap();

        assert_eq!(result.audio, b"ID3fake");
        assert!(result.subtitles.is_empty());
    }
}
