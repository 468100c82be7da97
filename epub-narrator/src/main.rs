//! narrate - Convert EPUB chapters into watermarked audio clips with subtitles

mod config;
mod epub;
mod error;
mod logging;
mod narrator;
mod pipeline;
mod subtitle;
mod text;

use anyhow::{Context, Result};
use clap::Parser;
use config::{DEFAULT_CONFIG_FILE, Mode, NarratorConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "narrate")]
#[command(about = "Convert EPUB chapters to audio and subtitles with a verified watermark", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Only list chapter numbers to the log (same as mode = 1)
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = NarratorConfig::load(&args.config).context("Failed to load configuration")?;
    logging::init(&config.log, args.debug).context("Failed to set up logging")?;

    let mode = if args.list {
        Mode::ListChapters
    } else {
        config.mode()
    };

    if args.debug {
        eprintln!("Config: {}", args.config.display());
        eprintln!("EPUB: {}", config.epub.file.display());
        eprintln!("Mode: {:?}", mode);
        eprintln!("Log: {}", config.log.file.display());
    }

    let book = epub::extract_chapters(&config.epub.file).context("Failed to parse EPUB")?;
    log::info!(
        "Loaded \"{}\" by {} ({} chapters)",
        book.title,
        book.author.as_deref().unwrap_or("Unknown"),
        book.chapters.len()
    );

    if mode == Mode::ListChapters {
        let numbers = narrator::list_chapters(&book);
        eprintln!(
            "Listed {} chapters to {}",
            numbers.len(),
            config.log.file.display()
        );
        return Ok(());
    }

    let out = config.output()?;
    let synthesizer =
        tts_client::get_synthesizer(&config.tts).context("Failed to set up speech synthesis")?;

    if args.debug {
        eprintln!("Synthesizer: {}", synthesizer.name());
        eprintln!("Output: {}", out.path.display());
        eprintln!("Chapters: {}-{}", out.chapter.start, out.chapter.end);
        eprintln!("Voice: {}", out.voice);
        eprintln!("Max chunk size: {}", out.max_chunk_size);
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let summary = narrator::run(out, &book, synthesizer.as_ref(), &pb)
        .await
        .context("Conversion aborted")?;

    pb.finish_and_clear();

    eprintln!(
        "Completed: {}, Incomplete: {}",
        summary.done(),
        summary.incomplete()
    );
    log::info!(
        "Run finished: {} done, {} incomplete",
        summary.done(),
        summary.incomplete()
    );

    Ok(())
}
