//! Subtitle track model and SRT reading/writing.
//!
//! Synthesizers hand back their word timings as a [`SubtitleTrack`]; the
//! track is written to disk in SRT block format:
//!
//! ```text
//! 1
//! 00:00:00,100 --> 00:00:00,450
//! Hello
//!
//! ```

use std::time::Duration;

use crate::error::{Result, TtsError};

/// A single timed piece of spoken text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCue {
    pub start: Duration,
    pub end: Duration,
    pub text: String,
}

impl SubtitleCue {
    pub fn new(start: Duration, end: Duration, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Ordered cues for one synthesized audio clip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleTrack {
    pub cues: Vec<SubtitleCue>,
}

impl SubtitleTrack {
    pub fn new(cues: Vec<SubtitleCue>) -> Self {
        Self { cues }
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Spoken text of every cue, joined by single spaces.
    pub fn text(&self) -> String {
        self.cues
            .iter()
            .flat_map(|cue| cue.text.lines())
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render the track as an SRT document.
    pub fn to_srt(&self) -> String {
        let mut out = String::new();
        for (i, cue) in self.cues.iter().enumerate() {
            out.push_str(&format!(
                "{}\n{} --> {}\n{}\n\n",
                i + 1,
                format_time(cue.start),
                format_time(cue.end),
                cue.text.trim()
            ));
        }
        out
    }

    /// Parse an SRT document into cues.
    ///
    /// Also accepts the WebVTT flavour some edge-tts releases write
    /// (`WEBVTT` header, `.` before milliseconds, hours omitted).
    pub fn parse(input: &str) -> Result<Self> {
        let mut cues = Vec::new();
        let mut lines = input.lines().map(|l| l.trim_start_matches('\u{feff}'));

        loop {
            // Collect one block of non-blank lines
            let mut block: Vec<&str> = Vec::new();
            for line in lines.by_ref() {
                if line.trim().is_empty() {
                    if block.is_empty() {
                        continue;
                    }
                    break;
                }
                block.push(line);
            }

            if block.is_empty() {
                break;
            }

            let first = block[0].trim();
            if first.starts_with("WEBVTT") || first.starts_with("NOTE") {
                continue;
            }

            let timing_at = block
                .iter()
                .position(|l| l.contains("-->"))
                .ok_or_else(|| {
                    TtsError::InvalidSubtitles(format!("block without timing line: {}", first))
                })?;

            let (start, end) = parse_times(block[timing_at])?;
            let text = block[timing_at + 1..]
                .iter()
                .map(|l| l.trim())
                .collect::<Vec<_>>()
                .join("\n");

            cues.push(SubtitleCue { start, end, text });
        }

        Ok(Self { cues })
    }
}

/// Parse a timing line like `00:00:01,000 --> 00:00:02,000`.
fn parse_times(line: &str) -> Result<(Duration, Duration)> {
    let mut parts = line.split("-->");
    let start = parts
        .next()
        .ok_or_else(|| TtsError::InvalidSubtitles(format!("no start time: {}", line)))?;
    let end = parts
        .next()
        .ok_or_else(|| TtsError::InvalidSubtitles(format!("no end time: {}", line)))?;
    // WebVTT may append cue settings after the end time
    let end = end.split_whitespace().next().unwrap_or_default();
    Ok((parse_time(start.trim())?, parse_time(end)?))
}

/// Parse `HH:MM:SS,mmm`, `HH:MM:SS.mmm` or `MM:SS.mmm`.
fn parse_time(t: &str) -> Result<Duration> {
    let invalid = || TtsError::InvalidSubtitles(format!("bad timestamp: {:?}", t));

    let fields: Vec<&str> = t.split(':').collect();
    let (h, m, rest) = match fields.as_slice() {
        [h, m, rest] => (*h, *m, *rest),
        [m, rest] => ("0", *m, *rest),
        _ => return Err(invalid()),
    };
    let (s, ms) = rest.split_once([',', '.']).ok_or_else(invalid)?;

    let h: u64 = h.parse().map_err(|_| invalid())?;
    let m: u64 = m.parse().map_err(|_| invalid())?;
    let s: u64 = s.parse().map_err(|_| invalid())?;
    let ms: u64 = ms.parse().map_err(|_| invalid())?;

    Ok(Duration::from_millis(((h * 60 + m) * 60 + s) * 1000 + ms))
}

/// Format a duration as `HH:MM:SS,mmm`.
fn format_time(d: Duration) -> String {
    let total = d.as_millis() as u64;
    let h = total / 3_600_000;
    let m = (total % 3_600_000) / 60_000;
    let s = (total % 60_000) / 1000;
    let ms = total % 1000;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(ms(0)), "00:00:00,000");
        assert_eq!(format_time(ms(65_123)), "00:01:05,123");
        assert_eq!(format_time(ms(3_661_500)), "01:01:01,500");
    }

    #[test]
    fn test_to_srt() {
        let track = SubtitleTrack::new(vec![
            SubtitleCue::new(ms(100), ms(500), "Hello"),
            SubtitleCue::new(ms(500), ms(900), "world"),
        ]);
        assert_eq!(
            track.to_srt(),
            "1\n00:00:00,100 --> 00:00:00,500\nHello\n\n\
             2\n00:00:00,500 --> 00:00:00,900\nworld\n\n"
        );
    }

    #[test]
    fn test_parse_srt() {
        let input = "1\n00:00:00,100 --> 00:00:00,500\nHello there\n\n2\n00:00:01,000 --> 00:00:02,250\nGeneral\nKenobi\n";
        let track = SubtitleTrack::parse(input).unwrap();
        assert_eq!(track.cues.len(), 2);
        assert_eq!(track.cues[0].start, ms(100));
        assert_eq!(track.cues[0].text, "Hello there");
        assert_eq!(track.cues[1].end, ms(2_250));
        assert_eq!(track.cues[1].text, "General\nKenobi");
        assert_eq!(track.text(), "Hello there General Kenobi");
    }

    #[test]
    fn test_parse_webvtt() {
        let input = "WEBVTT\n\n00:00.100 --> 00:00.500 align:start\nHello\n\n00:00:00.600 --> 00:00:01.000\nworld\n";
        let track = SubtitleTrack::parse(input).unwrap();
        assert_eq!(track.cues.len(), 2);
        assert_eq!(track.cues[0].start, ms(100));
        assert_eq!(track.cues[0].end, ms(500));
        assert_eq!(track.text(), "Hello world");
    }

    #[test]
    fn test_parse_crlf_and_extra_blank_lines() {
        let input = "\r\n\r\n1\r\n00:00:00,000 --> 00:00:01,000\r\nHi\r\n\r\n\r\n";
        let track = SubtitleTrack::parse(input).unwrap();
        assert_eq!(track.cues.len(), 1);
        assert_eq!(track.cues[0].text, "Hi");
    }

    #[test]
    fn test_parse_rejects_block_without_timing() {
        let err = SubtitleTrack::parse("1\nno timing here\n").unwrap_err();
        assert!(matches!(err, TtsError::InvalidSubtitles(_)));
    }

    #[test]
    fn test_parse_rejects_bad_timestamp() {
        let err = SubtitleTrack::parse("1\n00:xx:00,000 --> 00:00:01,000\nHi\n").unwrap_err();
        assert!(matches!(err, TtsError::InvalidSubtitles(_)));
    }

    #[test]
    fn test_srt_output_parses_back() {
        let track = SubtitleTrack::new(vec![
            SubtitleCue::new(ms(0), ms(420), "The"),
            SubtitleCue::new(ms(420), ms(1_337), "[END]"),
        ]);
        assert_eq!(SubtitleTrack::parse(&track.to_srt()).unwrap(), track);
    }

    #[test]
    fn test_empty_track() {
        let track = SubtitleTrack::parse("").unwrap();
        assert!(track.is_empty());
        assert_eq!(track.text(), "");
        assert_eq!(track.to_srt(), "");
    }
}
