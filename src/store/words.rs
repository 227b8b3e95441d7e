use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::BATCH_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordInsert {
    pub verse_id: i64,
    pub position: u32,
    pub arabic_text: String,
    pub page_number: u32,
    pub qul_word_id: i64,
}

pub fn insert_words(conn: &mut Connection, words: &[WordInsert]) -> Result<usize> {
    let mut inserted = 0;

    for batch in words.chunks(BATCH_SIZE) {
        let tx = conn.transaction().context("failed to start word batch")?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO quran_words
                         (verse_id, position, arabic_text, page_number, qul_word_id)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .context("failed to prepare word insert")?;

            for word in batch {
                inserted += stmt
                    .execute(params![
                        word.verse_id,
                        word.position,
                        word.arabic_text,
                        word.page_number,
                        word.qul_word_id
                    ])
                    .with_context(|| format!("failed to insert word {}", word.qul_word_id))?;
            }
        }
        tx.commit().context("failed to commit word batch")?;
    }

    Ok(inserted)
}
