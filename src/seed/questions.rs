use std::collections::HashMap;
use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::quiz::QuizType;
use crate::store::QuestionInsert;

/// A concept question as written by hand in `questions.json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthoredQuestion {
    pub question_text: String,
    pub correct_answer: String,
    pub distractors: Vec<String>,
    pub surah_number: u32,
    pub ayah_number: u32,
}

pub fn read_questions<R: Read>(reader: R) -> Result<Vec<AuthoredQuestion>> {
    serde_json::from_reader(reader).context("malformed authored questions JSON")
}

pub fn build_rows(
    authored: Vec<AuthoredQuestion>,
    verse_ids: &HashMap<(u32, u32), i64>,
) -> Vec<QuestionInsert> {
    authored
        .into_iter()
        .filter_map(|q| {
            let Some(&verse_id) = verse_ids.get(&(q.surah_number, q.ayah_number)) else {
                log::warn!(
                    "Skipping question {:?}: verse {}:{} was not seeded",
                    q.question_text,
                    q.surah_number,
                    q.ayah_number
                );
                return None;
            };
            Some(QuestionInsert {
                question_type: QuizType::ConceptToAyah,
                question_text: q.question_text,
                correct_answer: q.correct_answer,
                distractors: q.distractors,
                verse_id,
            })
        })
        .collect()
}
