use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::BATCH_SIZE;
use crate::models::{PageVerse, PageWord, Verse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseInsert {
    pub surah_number: u32,
    pub ayah_number: u32,
    pub arabic_text: String,
    pub english_translation: String,
}

/// Every verse of a surah, ascending by ayah number
pub fn fetch_surah(conn: &Connection, surah_number: u32) -> Result<Vec<Verse>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, surah_number, ayah_number, arabic_text, english_translation
             FROM verses WHERE surah_number = ?1 ORDER BY ayah_number",
        )
        .context("failed to prepare surah query")?;

    let verses = stmt
        .query_map(params![surah_number], |row| {
            Ok(Verse {
                id: row.get(0)?,
                surah_number: row.get(1)?,
                ayah_number: row.get(2)?,
                arabic_text: row.get(3)?,
                english_translation: row.get(4)?,
            })
        })
        .context("failed to load verses")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect verses")?;

    Ok(verses)
}

/// Verses starting on `page_number` with all of their words, in reading order
pub fn fetch_page(conn: &Connection, page_number: u32) -> Result<Vec<PageVerse>> {
    let mut stmt = conn
        .prepare(
            "SELECT v.id, v.surah_number, v.ayah_number, w.id, w.position, w.arabic_text
             FROM verses v
             LEFT JOIN quran_words w ON w.verse_id = v.id
             WHERE v.page_number = ?1
             ORDER BY v.surah_number, v.ayah_number, w.position",
        )
        .context("failed to prepare page query")?;

    let rows = stmt
        .query_map(params![page_number], |row| {
            let verse = (row.get::<_, i64>(0)?, row.get::<_, u32>(1)?, row.get::<_, u32>(2)?);
            let word = match row.get::<_, Option<i64>>(3)? {
                Some(id) => Some(PageWord {
                    id,
                    position: row.get(4)?,
                    arabic_text: row.get(5)?,
                }),
                None => None,
            };
            Ok((verse, word))
        })
        .context("failed to load page")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect page rows")?;

    // rows arrive grouped by verse
    let mut verses: Vec<PageVerse> = Vec::new();
    for ((id, surah_number, ayah_number), word) in rows {
        let is_new_verse = verses.last().map_or(true, |v| v.id != id);
        if is_new_verse {
            verses.push(PageVerse {
                id,
                surah_number,
                ayah_number,
                quran_words: Vec::new(),
            });
        }
        if let (Some(word), Some(verse)) = (word, verses.last_mut()) {
            verse.quran_words.push(word);
        }
    }

    Ok(verses)
}

/// Insert verses in batches, returning their ids keyed by (surah, ayah)
pub fn insert_verses(
    conn: &mut Connection,
    verses: &[VerseInsert],
) -> Result<HashMap<(u32, u32), i64>> {
    let mut ids = HashMap::with_capacity(verses.len());

    for batch in verses.chunks(BATCH_SIZE) {
        let tx = conn.transaction().context("failed to start verse batch")?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO verses (surah_number, ayah_number, arabic_text, english_translation)
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .context("failed to prepare verse insert")?;

            for verse in batch {
                stmt.execute(params![
                    verse.surah_number,
                    verse.ayah_number,
                    verse.arabic_text,
                    verse.english_translation
                ])
                .with_context(|| {
                    format!(
                        "failed to insert verse {}:{}",
                        verse.surah_number, verse.ayah_number
                    )
                })?;
                ids.insert((verse.surah_number, verse.ayah_number), tx.last_insert_rowid());
            }
        }
        tx.commit().context("failed to commit verse batch")?;
    }

    Ok(ids)
}

/// Set the page of each (verse id, page) pair. Returns how many verses changed.
pub fn update_pages(conn: &mut Connection, pages: &[(i64, u32)]) -> Result<usize> {
    let mut updated = 0;

    for batch in pages.chunks(BATCH_SIZE) {
        let tx = conn.transaction().context("failed to start page batch")?;
        {
            let mut stmt = tx
                .prepare("UPDATE verses SET page_number = ?1 WHERE id = ?2")
                .context("failed to prepare page update")?;
            for (verse_id, page_number) in batch {
                updated += stmt
                    .execute(params![page_number, verse_id])
                    .with_context(|| format!("failed to update page of verse {verse_id}"))?;
            }
        }
        tx.commit().context("failed to commit page batch")?;
    }

    Ok(updated)
}
