use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub id: i64,
    pub surah_number: u32,
    pub ayah_number: u32,
    pub arabic_text: String,
    pub english_translation: String,
}

impl Verse {
    /// The `surah:ayah` reference, e.g. `1:7`
    pub fn reference(&self) -> String {
        format!("{}:{}", self.surah_number, self.ayah_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualQuestion {
    pub id: i64,
    pub question_text: String,
    pub correct_answer: String,
    pub distractors: Vec<String>,
    pub verse_id: i64,
    /// Looked up through `verse_id`
    pub surah_number: u32,
    pub ayah_number: u32,
}

/// A verse as laid out on a Mushaf page, with its words in reading order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageVerse {
    pub id: i64,
    pub surah_number: u32,
    pub ayah_number: u32,
    pub quran_words: Vec<PageWord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWord {
    pub id: i64,
    pub position: u32,
    pub arabic_text: String,
}
