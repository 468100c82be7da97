//! Chunk conversion: synthesize, persist, then verify the watermark.
//!
//! Each chunk becomes `<out>/<chapter>-<chunk>.mp3` and `.srt`. The subtitle
//! file is read back from disk and its spoken text must end with the
//! watermark; anything else is reported as incomplete. Files are kept either
//! way.

use crate::error::{NarratorError, Result};
use crate::subtitle;
use crate::text::Chunk;
use std::path::{Path, PathBuf};
use tts_client::{SpeechSynthesizer, SynthesisRequest};

/// Result of converting one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub chapter: usize,
    pub chunk: usize,
    pub audio_path: PathBuf,
    pub subtitle_path: PathBuf,
    /// Tail of the extracted subtitle text, as long as the watermark
    pub observed_suffix: String,
    /// Whether `observed_suffix` equals the watermark
    pub verified: bool,
}

impl ConversionOutcome {
    /// `"{chapter}-{chunk}: done"` or `"...: incomplete; actual: {suffix}"`.
    pub fn status_line(&self) -> String {
        if self.verified {
            format!("{}-{}: done", self.chapter, self.chunk)
        } else {
            format!(
                "{}-{}: incomplete; actual: {}",
                self.chapter, self.chunk, self.observed_suffix
            )
        }
    }
}

/// Output file paths for a chunk.
pub fn output_paths(output_dir: &Path, chapter: usize, chunk: usize) -> (PathBuf, PathBuf) {
    (
        output_dir.join(format!("{}-{}.mp3", chapter, chunk)),
        output_dir.join(format!("{}-{}.srt", chapter, chunk)),
    )
}

/// Converts chunks one at a time with a fixed voice and watermark.
pub struct ChunkConverter<'a> {
    synthesizer: &'a dyn SpeechSynthesizer,
    voice: &'a str,
    watermark: &'a str,
    output_dir: &'a Path,
}

impl<'a> ChunkConverter<'a> {
    pub fn new(
        synthesizer: &'a dyn SpeechSynthesizer,
        voice: &'a str,
        watermark: &'a str,
        output_dir: &'a Path,
    ) -> Self {
        Self {
            synthesizer,
            voice,
            watermark,
            output_dir,
        }
    }

    /// Synthesize a chunk, write its audio and subtitles, and verify them.
    ///
    /// Synthesis and write failures are returned as errors and end the run;
    /// a missing or unreadable subtitle file only fails verification.
    pub async fn convert(&self, chunk: &Chunk) -> Result<ConversionOutcome> {
        let (audio_path, subtitle_path) = output_paths(self.output_dir, chunk.chapter, chunk.number);

        log::info!(
            "Chapter {} chunk {} length: {} characters",
            chunk.chapter,
            chunk.number,
            chunk.char_len()
        );

        let request = SynthesisRequest::new(format!("{}{}", chunk.text, self.watermark), self.voice);
        let synthesis = self.synthesizer.synthesize(&request).await?;

        tokio::fs::write(&audio_path, &synthesis.audio)
            .await
            .map_err(|e| NarratorError::io(&audio_path, e))?;
        tokio::fs::write(&subtitle_path, synthesis.subtitles.to_srt())
            .await
            .map_err(|e| NarratorError::io(&subtitle_path, e))?;

        let spoken = self.read_back(&subtitle_path);
        let observed_suffix =
            subtitle::watermark_suffix(&spoken, self.watermark.chars().count()).to_string();
        let verified = observed_suffix == self.watermark;

        if !verified {
            log::warn!(
                "Chapter {} chunk {} watermark missing; subtitles end with {:?}",
                chunk.chapter,
                chunk.number,
                observed_suffix
            );
        }

        Ok(ConversionOutcome {
            chapter: chunk.chapter,
            chunk: chunk.number,
            audio_path,
            subtitle_path,
            observed_suffix,
            verified,
        })
    }

    /// Spoken text of a written subtitle file; empty when it can't be read.
    fn read_back(&self, subtitle_path: &Path) -> String {
        match subtitle::extract_file(subtitle_path) {
            Ok(Some(text)) => text,
            Ok(None) => {
                eprintln!("Error: SRT file not found at '{}'", subtitle_path.display());
                log::error!("SRT file not found at {}", subtitle_path.display());
                String::new()
            }
            Err(e) => {
                eprintln!(
                    "Error: failed to read SRT file '{}': {}",
                    subtitle_path.display(),
                    e
                );
                log::error!("Failed to read {}: {}", subtitle_path.display(), e);
                String::new()
            }
        }
    }
}
