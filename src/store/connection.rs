use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Open (creating if needed) the database at `path` and make sure the schema exists.
pub fn open(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create database directory")?;
        }
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open SQLite database at {}", path.display()))?;
    ensure_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Lazy migrations. Foreign keys are switched on per connection so the cascade
/// from verses to their words and questions holds.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign keys")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS verses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            surah_number INTEGER NOT NULL,
            ayah_number INTEGER NOT NULL,
            arabic_text TEXT NOT NULL,
            english_translation TEXT NOT NULL,
            page_number INTEGER,
            UNIQUE (surah_number, ayah_number)
        )",
        [],
    )
    .context("failed to create verses table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS quran_words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            verse_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            arabic_text TEXT NOT NULL,
            page_number INTEGER NOT NULL,
            qul_word_id INTEGER NOT NULL,
            FOREIGN KEY(verse_id) REFERENCES verses(id) ON DELETE CASCADE
        )",
        [],
    )
    .context("failed to create quran_words table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            question_type TEXT NOT NULL,
            question_text TEXT NOT NULL,
            correct_answer TEXT NOT NULL,
            distractors TEXT NOT NULL,
            verse_id INTEGER NOT NULL,
            FOREIGN KEY(verse_id) REFERENCES verses(id) ON DELETE CASCADE
        )",
        [],
    )
    .context("failed to create questions table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_verses_page ON verses (page_number)",
        [],
    )
    .context("failed to create verse page index")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_words_verse ON quran_words (verse_id, position)",
        [],
    )
    .context("failed to create word index")?;

    Ok(())
}
