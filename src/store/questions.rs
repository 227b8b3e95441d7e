use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::BATCH_SIZE;
use crate::models::ManualQuestion;
use crate::quiz::QuizType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionInsert {
    pub question_type: QuizType,
    pub question_text: String,
    pub correct_answer: String,
    pub distractors: Vec<String>,
    pub verse_id: i64,
}

pub fn insert_questions(conn: &mut Connection, questions: &[QuestionInsert]) -> Result<usize> {
    let mut inserted = 0;

    for batch in questions.chunks(BATCH_SIZE) {
        let tx = conn.transaction().context("failed to start question batch")?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO questions
                         (question_type, question_text, correct_answer, distractors, verse_id)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .context("failed to prepare question insert")?;

            for question in batch {
                let distractors = serde_json::to_string(&question.distractors)
                    .context("failed to encode distractors")?;
                inserted += stmt
                    .execute(params![
                        question.question_type.as_str(),
                        question.question_text,
                        question.correct_answer,
                        distractors,
                        question.verse_id
                    ])
                    .with_context(|| {
                        format!("failed to insert question {:?}", question.question_text)
                    })?;
            }
        }
        tx.commit().context("failed to commit question batch")?;
    }

    Ok(inserted)
}

/// Up to `limit` authored questions of the given type, oldest first, with the
/// surah and ayah of the verse each one points at
pub fn fetch_questions(
    conn: &Connection,
    question_type: QuizType,
    limit: usize,
) -> Result<Vec<ManualQuestion>> {
    let mut stmt = conn
        .prepare(
            "SELECT q.id, q.question_text, q.correct_answer, q.distractors, q.verse_id,
                    v.surah_number, v.ayah_number
             FROM questions q
             JOIN verses v ON v.id = q.verse_id
             WHERE q.question_type = ?1
             ORDER BY q.id
             LIMIT ?2",
        )
        .context("failed to prepare question query")?;

    let rows = stmt
        .query_map(params![question_type.as_str(), limit as i64], |row| {
            let distractors: String = row.get(3)?;
            let question = ManualQuestion {
                id: row.get(0)?,
                question_text: row.get(1)?,
                correct_answer: row.get(2)?,
                distractors: Vec::new(),
                verse_id: row.get(4)?,
                surah_number: row.get(5)?,
                ayah_number: row.get(6)?,
            };
            Ok((question, distractors))
        })
        .context("failed to load questions")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect questions")?;

    rows.into_iter()
        .map(|(question, distractors)| -> Result<ManualQuestion> {
            let distractors: Vec<String> = serde_json::from_str(&distractors)
                .with_context(|| format!("question {} has malformed distractors", question.id))?;
            Ok(ManualQuestion {
                distractors,
                ..question
            })
        })
        .collect()
}
