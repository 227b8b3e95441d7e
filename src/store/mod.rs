//! SQLite persistence for verses, words and authored questions.

mod connection;
mod questions;
mod verses;
mod words;

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;

use crate::models::{ManualQuestion, PageVerse, Verse};
use crate::quiz::QuizType;

pub use questions::QuestionInsert;
pub use verses::VerseInsert;
pub use words::WordInsert;

/// Rows written per transaction
pub const BATCH_SIZE: usize = 500;

/// Where the assembler gets its pools from
pub trait QuizSource {
    /// All verses of a surah, ascending by ayah number
    fn verses_in_surah(&self, surah_number: u32) -> Result<Vec<Verse>>;

    /// Up to `limit` authored CONCEPT_TO_AYAH questions
    fn manual_questions(&self, limit: usize) -> Result<Vec<ManualQuestion>>;

    fn page_verses(&self, page_number: u32) -> Result<Vec<PageVerse>>;
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = connection::open(path)?;
        log::info!("Opened database at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Mutex::new(connection::open_in_memory()?),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("database connection lock poisoned"))
    }

    /// Drop every seeded row. Words and questions go first so the foreign keys hold.
    pub fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "DELETE FROM quran_words;
             DELETE FROM questions;
             DELETE FROM verses;",
        )
        .context("failed to clear seeded data")?;
        Ok(())
    }

    pub fn insert_verses(&self, verses: &[VerseInsert]) -> Result<HashMap<(u32, u32), i64>> {
        verses::insert_verses(&mut *self.lock()?, verses)
    }

    pub fn update_verse_pages(&self, pages: &[(i64, u32)]) -> Result<usize> {
        verses::update_pages(&mut *self.lock()?, pages)
    }

    pub fn insert_words(&self, words: &[WordInsert]) -> Result<usize> {
        words::insert_words(&mut *self.lock()?, words)
    }

    pub fn insert_questions(&self, questions: &[QuestionInsert]) -> Result<usize> {
        questions::insert_questions(&mut *self.lock()?, questions)
    }
}

impl QuizSource for SqliteStore {
    fn verses_in_surah(&self, surah_number: u32) -> Result<Vec<Verse>> {
        verses::fetch_surah(&*self.lock()?, surah_number)
    }

    fn manual_questions(&self, limit: usize) -> Result<Vec<ManualQuestion>> {
        questions::fetch_questions(&*self.lock()?, QuizType::ConceptToAyah, limit)
    }

    fn page_verses(&self, page_number: u32) -> Result<Vec<PageVerse>> {
        verses::fetch_page(&*self.lock()?, page_number)
    }
}
