//! Chapter text segmentation for synthesis.

pub mod chunker;

pub use chunker::process_chapter;

/// A slice of one chapter's text, sized for a single synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chapter this chunk belongs to (1-based)
    pub chapter: usize,
    /// Position within the chapter (1-based, contiguous)
    pub number: usize,
    /// Whole lines, each terminated by a newline; empty only for a chapter's
    /// first chunk when its opening line is over budget
    pub text: String,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(chapter: usize, number: usize, text: String) -> Self {
        Self {
            chapter,
            number,
            text,
        }
    }

    /// Length in characters, as counted against the chunk budget.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// `<chapter>-<number>`, the stem of the chunk's output files.
    pub fn label(&self) -> String {
        format!("{}-{}", self.chapter, self.number)
    }
}
