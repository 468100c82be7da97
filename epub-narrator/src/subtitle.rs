//! Spoken-text extraction from SRT subtitle files.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

/// How a single (trimmed) SRT line is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    Index,
    Timing,
    Text,
}

/// Where the extractor is within a subtitle block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractState {
    Idle,
    InText,
}

fn classify(line: &str) -> LineKind {
    if line.is_empty() {
        LineKind::Blank
    } else if line.chars().all(char::is_numeric) {
        LineKind::Index
    } else if line.contains("-->") {
        LineKind::Timing
    } else {
        LineKind::Text
    }
}

/// Join the spoken lines of an SRT document with single spaces.
///
/// Index lines (numerals only, in any script) and timing lines (containing
/// `-->`) are dropped wherever they appear.
pub fn extract_text(srt: &str) -> String {
    let mut spoken: Vec<&str> = Vec::new();
    let mut state = ExtractState::Idle;
    let mut blocks = 0usize;

    for line in srt.lines().map(str::trim) {
        state = match (classify(line), state) {
            (LineKind::Text, ExtractState::Idle) => {
                blocks += 1;
                spoken.push(line);
                ExtractState::InText
            }
            (LineKind::Text, ExtractState::InText) => {
                spoken.push(line);
                ExtractState::InText
            }
            (LineKind::Blank | LineKind::Index | LineKind::Timing, _) => ExtractState::Idle,
        };
    }

    log::debug!("extracted {} subtitle text blocks", blocks);
    spoken.join(" ")
}

/// Read an SRT file and extract its spoken text.
///
/// Returns `Ok(None)` when the file does not exist; other I/O failures,
/// including invalid UTF-8, are returned as errors.
pub fn extract_file(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(extract_text(&content))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// The last `len` characters of `text`, or all of it when shorter.
pub fn watermark_suffix(text: &str, len: usize) -> &str {
    let total = text.chars().count();
    if len >= total {
        return text;
    }
    match text.char_indices().nth(total - len) {
        Some((byte_idx, _)) => &text[byte_idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "1\n00:00:00,100 --> 00:00:00,500\nHello world\n\n2\n00:00:00,500 --> 00:00:01,000\nThis is\na test\n\n3\n00:00:01,000 --> 00:00:01,400\n[END]\n";

    #[test]
    fn test_classify() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("42"), LineKind::Index);
        assert_eq!(classify("00:00:00,000 --> 00:00:01,000"), LineKind::Timing);
        assert_eq!(classify("Hello"), LineKind::Text);
        assert_eq!(classify("42 apples"), LineKind::Text);
    }

    #[test]
    fn test_non_ascii_index_lines_dropped() {
        assert_eq!(classify("٣٤"), LineKind::Index);
        assert_eq!(classify("１２"), LineKind::Index);
        let srt = "١\n00:00:00,000 --> 00:00:01,000\nمرحبا\n\n２\n00:00:01,000 --> 00:00:02,000\n[END]\n";
        assert_eq!(extract_text(srt), "مرحبا [END]");
    }

    #[test]
    fn test_extract_text() {
        assert_eq!(extract_text(SAMPLE), "Hello world This is a test [END]");
    }

    #[test]
    fn test_numeric_and_arrow_lines_dropped_anywhere() {
        let srt = "Intro\n7\nmiddle --> line\n\n  123  \nOutro\n";
        assert_eq!(extract_text(srt), "Intro Outro");
    }

    #[test]
    fn test_extract_crlf() {
        let srt = "1\r\n00:00:00,000 --> 00:00:01,000\r\n  Hi there  \r\n\r\n";
        assert_eq!(extract_text(srt), "Hi there");
    }

    #[test]
    fn test_extract_empty() {
        assert_eq!(extract_text(""), "");
        assert_eq!(extract_text("1\n00:00:00,000 --> 00:00:01,000\n\n"), "");
    }

    #[test]
    fn test_extract_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("1-1.srt");
        fs::write(&path, SAMPLE).unwrap();
        assert_eq!(
            extract_file(&path).unwrap().as_deref(),
            Some("Hello world This is a test [END]")
        );
    }

    #[test]
    fn test_extract_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(extract_file(&dir.path().join("missing.srt")).unwrap(), None);
    }

    #[test]
    fn test_extract_invalid_utf8_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.srt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();
        assert!(extract_file(&path).is_err());
    }

    #[test]
    fn test_watermark_suffix() {
        assert_eq!(watermark_suffix("a test [END]", 5), "[END]");
        assert_eq!(watermark_suffix("END]", 5), "END]");
        assert_eq!(watermark_suffix("", 5), "");
        assert_eq!(watermark_suffix("abc", 0), "");
        assert_eq!(watermark_suffix("fin ✓✓", 2), "✓✓");
    }

    #[test]
    fn test_watermark_round_trip() {
        let watermark = "[END]";
        let text = extract_text(SAMPLE);
        assert_eq!(watermark_suffix(&text, watermark.chars().count()), watermark);
    }
}
