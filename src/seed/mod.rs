//! Loads the Tanzil text, QUL word data and page layout into the store.

pub mod pages;
pub mod questions;
pub mod tanzil;
pub mod uthmani;

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::store::SqliteStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPaths {
    pub quran_text: PathBuf,
    pub translation: PathBuf,
    pub uthmani: PathBuf,
    pub pages_json: PathBuf,
    pub pages_csv: PathBuf,
    pub questions: PathBuf,
}

impl SeedPaths {
    /// The file names the data directory is expected to hold
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            quran_text: dir.join("quran-simple.txt"),
            translation: dir.join("en.sahih.txt"),
            uthmani: dir.join("uthmani.json"),
            pages_json: dir.join("mushaf-pages.json"),
            pages_csv: dir.join("pages.csv"),
            questions: dir.join("questions.json"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub verses: usize,
    pub words: usize,
    pub verse_pages: usize,
    pub questions: usize,
}

/// Clears the store and reloads it from `paths`
pub fn run(store: &SqliteStore, paths: &SeedPaths) -> Result<SeedReport> {
    log::info!("Clearing old data...");
    store.clear()?;

    let verse_ids = seed_verses(store, paths)?;
    let (words, verse_pages) = seed_words(store, paths, &verse_ids)?;
    let questions = seed_questions(store, paths, &verse_ids)?;

    Ok(SeedReport {
        verses: verse_ids.len(),
        words,
        verse_pages,
        questions,
    })
}

fn seed_verses(store: &SqliteStore, paths: &SeedPaths) -> Result<HashMap<(u32, u32), i64>> {
    log::info!("Phase 1: seeding verses");

    let arabic = fs::read_to_string(&paths.quran_text)
        .with_context(|| format!("failed to read {}", paths.quran_text.display()))?;
    let translation = fs::read_to_string(&paths.translation)
        .with_context(|| format!("failed to read {}", paths.translation.display()))?;

    let verses = tanzil::parse_verses(&arabic, &translation);
    if verses.is_empty() {
        bail!("no verses found in {}", paths.quran_text.display());
    }

    log::info!("Inserting {} verses...", verses.len());
    let verse_ids = store.insert_verses(&verses)?;
    log::info!("Verses inserted");
    Ok(verse_ids)
}

fn seed_words(
    store: &SqliteStore,
    paths: &SeedPaths,
    verse_ids: &HashMap<(u32, u32), i64>,
) -> Result<(usize, usize)> {
    log::info!("Phase 2: seeding word data");

    let layout = load_page_layout(paths)?;
    let word_pages = pages::word_pages(&layout);
    log::info!("Page map built with {} word entries", word_pages.len());

    let file = File::open(&paths.uthmani)
        .with_context(|| format!("failed to open {}", paths.uthmani.display()))?;
    let words = uthmani::read_words(BufReader::new(file))?;
    log::info!("Processing {} words...", words.len());

    let rows = uthmani::build_rows(&words, verse_ids, &word_pages);
    if rows.skipped > 0 {
        log::info!("Skipped {} words with no verse, page or position", rows.skipped);
    }

    let inserted = store.insert_words(&rows.words)?;
    log::info!("Inserted {} words", inserted);

    let updated = store.update_verse_pages(&rows.verse_pages)?;
    log::info!("Updated page numbers of {} verses", updated);

    Ok((inserted, updated))
}

fn seed_questions(
    store: &SqliteStore,
    paths: &SeedPaths,
    verse_ids: &HashMap<(u32, u32), i64>,
) -> Result<usize> {
    if !paths.questions.exists() {
        log::info!("No {} found, skipping authored questions", paths.questions.display());
        return Ok(0);
    }
    log::info!("Phase 3: seeding authored questions");

    let file = File::open(&paths.questions)
        .with_context(|| format!("failed to open {}", paths.questions.display()))?;
    let authored = questions::read_questions(BufReader::new(file))?;
    let rows = questions::build_rows(authored, verse_ids);

    let inserted = store.insert_questions(&rows)?;
    log::info!("Inserted {} authored questions", inserted);
    Ok(inserted)
}

/// The converted JSON layout when present, otherwise the source CSV
pub fn load_page_layout(paths: &SeedPaths) -> Result<Vec<pages::PageLine>> {
    if paths.pages_json.exists() {
        let file = File::open(&paths.pages_json)
            .with_context(|| format!("failed to open {}", paths.pages_json.display()))?;
        return pages::read_json(BufReader::new(file));
    }

    let file = File::open(&paths.pages_csv).with_context(|| {
        format!(
            "neither {} nor {} could be opened",
            paths.pages_json.display(),
            paths.pages_csv.display()
        )
    })?;
    pages::read_csv(BufReader::new(file))
}
