//! Mock synthesizer for testing
//!
//! Produces deterministic audio bytes and one subtitle cue per word. It can
//! be told to lose the tail of the text (as a cut-off synthesis would) or to
//! fail after a number of calls.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::{Result, TtsError};
use crate::subtitle::{SubtitleCue, SubtitleTrack};
use crate::synthesizer::{SpeechSynthesizer, Synthesis, SynthesisRequest};

/// Time given to each word in the generated track.
const WORD_DURATION: Duration = Duration::from_millis(300);

/// A mock synthesizer for pipeline tests
pub struct MockSynthesizer {
    /// Number of calls that succeed before failing (usize::MAX = never fail)
    succeed_count: usize,
    /// Current call count
    call_count: AtomicUsize,
    /// Message for the failure error
    fail_with: String,
    /// Characters cut from the end of the spoken text
    drop_trailing: usize,
    /// Every request received, in order
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl MockSynthesizer {
    fn build(succeed_count: usize, fail_with: &str, drop_trailing: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
            fail_with: fail_with.to_string(),
            drop_trailing,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a synthesizer that speaks every request in full
    pub fn always_succeeds() -> Self {
        Self::build(usize::MAX, "", 0)
    }

    /// Create a synthesizer that always fails with the given message
    pub fn always_fails(message: &str) -> Self {
        Self::build(0, message, 0)
    }

    /// Create a synthesizer that succeeds `n` times, then fails
    pub fn succeeds_then_fails(n: usize, message: &str) -> Self {
        Self::build(n, message, 0)
    }

    /// Create a synthesizer whose subtitles lose the last `n` characters
    pub fn truncating(n: usize) -> Self {
        Self::build(usize::MAX, "", n)
    }

    /// Get the number of times synthesize() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get a copy of every request received so far
    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn spoken_text<'a>(&self, text: &'a str) -> &'a str {
        let keep = text.chars().count().saturating_sub(self.drop_trailing);
        match text.char_indices().nth(keep) {
            Some((byte_idx, _)) => &text[..byte_idx],
            None => text,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Synthesis> {
        let call_num = self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if call_num >= self.succeed_count {
            return Err(TtsError::Mock(self.fail_with.clone()));
        }

        let spoken = self.spoken_text(&request.text);

        let cues = spoken
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| {
                let start = WORD_DURATION * i as u32;
                SubtitleCue::new(start, start + WORD_DURATION, word)
            })
            .collect();

        Ok(Synthesis {
            audio: format!("MOCK-AUDIO[{}]{}", request.voice, spoken).into_bytes(),
            subtitles: SubtitleTrack::new(cues),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_available(&self) -> Result<()> {
        Ok(())
    }
}
