//! EPUB chapter extraction.

use crate::error::{NarratorError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Render width; wide enough that paragraphs are not re-wrapped.
const TEXT_WIDTH: usize = 10_000;

/// Chapter number (1-based, reading order) to plain text.
pub type Chapters = BTreeMap<usize, String>;

/// Parsed EPUB book
#[derive(Debug)]
pub struct Book {
    /// Book title
    pub title: String,
    /// Book author(s)
    pub author: Option<String>,
    /// Every spine document, numbered in reading order
    pub chapters: Chapters,
}

impl Book {
    /// Chapter numbers in ascending order
    pub fn chapter_numbers(&self) -> Vec<usize> {
        self.chapters.keys().copied().collect()
    }

    /// Chapters with `start <= number <= end`, in ascending order
    ///
    /// An inverted range selects nothing.
    pub fn select(&self, start: usize, end: usize) -> impl Iterator<Item = (usize, &str)> {
        (start <= end)
            .then(|| self.chapters.range(start..=end))
            .into_iter()
            .flatten()
            .map(|(number, text)| (*number, text.as_str()))
    }
}

/// Parse an EPUB file and extract the text of each spine document
///
/// Documents with no text still get a number so numbering stays aligned
/// with the book's reading order.
pub fn extract_chapters(path: &Path) -> Result<Book> {
    let mut doc = epub::doc::EpubDoc::new(path).map_err(|e| {
        NarratorError::Source(format!("failed to open {}: {}", path.display(), e))
    })?;

    let title = doc
        .mdata("title")
        .map(|m| m.value.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    let author = doc.mdata("creator").map(|m| m.value.clone());

    let mut chapters = Chapters::new();
    let spine = doc.spine.clone();

    for (i, spine_item) in spine.iter().enumerate() {
        let (content_bytes, _mime) = doc.get_resource(&spine_item.idref).ok_or_else(|| {
            NarratorError::Source(format!(
                "spine item {} ({}) has no readable resource",
                i + 1,
                spine_item.idref
            ))
        })?;

        let html = String::from_utf8_lossy(&content_bytes);
        chapters.insert(i + 1, html_to_text(&html));
    }

    Ok(Book {
        title,
        author,
        chapters,
    })
}

/// Convert HTML to plain text, one output line per rendered line
fn html_to_text(html: &str) -> String {
    let text = html2text::from_read(html.as_bytes(), TEXT_WIDTH);
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
