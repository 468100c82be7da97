//! Line-based chunking with a watermark budget.
//!
//! A chunk is built from whole lines until the next line would no longer
//! leave room for the watermark that gets appended before synthesis. Lines
//! are never split: a single line longer than the budget becomes a chunk on
//! its own and is sent over budget. When that line opens the chapter, the
//! empty accumulator before it is still emitted as the chapter's first chunk,
//! so output numbering stays fixed for a given text and budget.

use super::Chunk;

/// Split chapter text into chunks of whole lines.
///
/// A line is appended while
/// `len(chunk) + len(line) + len(watermark) < max_chunk_size`, counting
/// characters. The newline added after the line is not part of that check,
/// so a chunk plus watermark is at most `max_chunk_size` characters.
///
/// # Arguments
/// * `text` - The chapter text
/// * `watermark` - Marker that will follow each chunk
/// * `max_chunk_size` - Character budget per chunk, watermark included
///
/// # Returns
/// Chunks in line order, each ending in a newline except a leading empty
/// chunk. Empty text gives none.
pub fn chunk_text(text: &str, watermark: &str, max_chunk_size: usize) -> Vec<String> {
    let watermark_len = watermark.chars().count();

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_terminator('\n') {
        let line_len = line.chars().count();

        if current_len + line_len + watermark_len >= max_chunk_size {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        current.push_str(line);
        current.push('\n');
        current_len += line_len + 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Process a chapter's text into numbered chunks.
///
/// # Returns
/// List of `Chunk` objects numbered from 1.
pub fn process_chapter(
    chapter: usize,
    text: &str,
    watermark: &str,
    max_chunk_size: usize,
) -> Vec<Chunk> {
    chunk_text(text, watermark, max_chunk_size)
        .into_iter()
        .enumerate()
        .map(|(i, text)| Chunk::new(chapter, i + 1, text))
        .collect()
}
