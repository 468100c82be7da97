//! Run orchestration: chapter selection, chunking and sequential conversion.

use crate::config::OutputConfig;
use crate::epub::Book;
use crate::error::{NarratorError, Result};
use crate::pipeline::{ChunkConverter, ConversionOutcome};
use crate::text::{self, Chunk};
use indicatif::ProgressBar;
use tts_client::SpeechSynthesizer;

/// Per-run tally of conversion outcomes.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<ConversionOutcome>,
}

impl RunSummary {
    pub fn done(&self) -> usize {
        self.outcomes.iter().filter(|o| o.verified).count()
    }

    pub fn incomplete(&self) -> usize {
        self.outcomes.len() - self.done()
    }
}

/// Log the chapter numbers found in the book.
pub fn list_chapters(book: &Book) -> Vec<usize> {
    let numbers = book.chapter_numbers();
    log::info!("Extracted chapters: {:?}", numbers);
    numbers
}

/// Chunk every chapter in the configured range, in chapter order.
pub fn plan_chunks(book: &Book, out: &OutputConfig) -> Vec<Chunk> {
    book.select(out.chapter.start, out.chapter.end)
        .flat_map(|(number, content)| {
            text::process_chapter(number, content, &out.watermark, out.max_chunk_size)
        })
        .collect()
}

/// Convert the selected chapters chunk by chunk.
///
/// The output directory is created first if needed. Each chunk is fully
/// written before the next one starts; a synthesis error stops the run and
/// leaves already written files in place.
pub async fn run(
    out: &OutputConfig,
    book: &Book,
    synthesizer: &dyn SpeechSynthesizer,
    progress: &ProgressBar,
) -> Result<RunSummary> {
    std::fs::create_dir_all(&out.path).map_err(|e| NarratorError::io(&out.path, e))?;

    let chunks = plan_chunks(book, out);
    log::info!(
        "Converting chapters {}..={} of \"{}\": {} chunks, voice {}",
        out.chapter.start,
        out.chapter.end,
        book.title,
        chunks.len(),
        out.voice
    );
    progress.set_length(chunks.len() as u64);

    let converter = ChunkConverter::new(synthesizer, &out.voice, &out.watermark, &out.path);
    let mut summary = RunSummary::default();

    for chunk in &chunks {
        progress.set_message(chunk.label());

        let outcome = converter.convert(chunk).await?;
        log::debug!(
            "Wrote {} and {}",
            outcome.audio_path.display(),
            outcome.subtitle_path.display()
        );

        let status = outcome.status_line();
        progress.suspend(|| println!("{}", status));
        progress.inc(1);

        summary.outcomes.push(outcome);
    }

    Ok(summary)
}
