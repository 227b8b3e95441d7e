use std::collections::HashMap;
use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::store::WordInsert;

/// One entry of the QUL `uthmani.json` word list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UthmaniWord {
    pub id: i64,
    pub surah: String,
    pub ayah: String,
    // position within the verse
    pub word: String,
    pub location: String,
    pub text: String,
}

/// Reads the word list, ordered by word id
pub fn read_words<R: Read>(reader: R) -> Result<Vec<UthmaniWord>> {
    let by_key: HashMap<String, UthmaniWord> =
        serde_json::from_reader(reader).context("malformed uthmani word JSON")?;
    let mut words: Vec<UthmaniWord> = by_key.into_values().collect();
    words.sort_by_key(|w| w.id);
    Ok(words)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WordRows {
    pub words: Vec<WordInsert>,
    // (verse id, page of its first word)
    pub verse_pages: Vec<(i64, u32)>,
    pub skipped: usize,
}

/// Links QUL words to seeded verses and pages.
///
/// Words without a known verse, without a page, or whose position isn't a number
/// (verse-end markers) are skipped. A verse takes the page of its first word.
pub fn build_rows(
    words: &[UthmaniWord],
    verse_ids: &HashMap<(u32, u32), i64>,
    word_pages: &HashMap<i64, u32>,
) -> WordRows {
    let mut rows = WordRows::default();
    let mut verse_pages: HashMap<i64, u32> = HashMap::new();

    for word in words {
        let verse_id = verse_key(word).and_then(|key| verse_ids.get(&key));
        let page_number = word_pages.get(&word.id);
        let position = word.word.trim().parse::<u32>().ok();

        let (Some(&verse_id), Some(&page_number), Some(position)) =
            (verse_id, page_number, position)
        else {
            rows.skipped += 1;
            continue;
        };

        rows.words.push(WordInsert {
            verse_id,
            position,
            arabic_text: word.text.clone(),
            page_number,
            qul_word_id: word.id,
        });

        if position == 1 {
            verse_pages.entry(verse_id).or_insert(page_number);
        }
    }

    rows.verse_pages = verse_pages.into_iter().collect();
    rows.verse_pages.sort();
    rows
}

fn verse_key(word: &UthmaniWord) -> Option<(u32, u32)> {
    let surah = word.surah.trim().parse().ok()?;
    let ayah = word.ayah.trim().parse().ok()?;
    Some((surah, ayah))
}
