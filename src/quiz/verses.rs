use rand::Rng;

use super::shuffle::shuffle;
use super::{build_options, QuizError, QuizQuestion, DISTRACTOR_COUNT, MIN_VERSE_POOL};
use crate::models::Verse;

pub fn ayah_to_meaning<R: Rng + ?Sized>(
    verses: &[Verse],
    count: usize,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    ask_about_random_verses(verses, count, rng, |v| v.english_translation.clone())
}

pub fn ayah_to_number<R: Rng + ?Sized>(
    verses: &[Verse],
    count: usize,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    ask_about_random_verses(verses, count, rng, Verse::reference)
}

/// Shows a verse and asks for the one that follows it.
/// `verses` must be in reading order: the answer is looked up by index + 1.
pub fn next_ayah<R: Rng + ?Sized>(
    verses: &[Verse],
    count: usize,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    let needed = MIN_VERSE_POOL.max(count.saturating_add(1));
    if verses.len() < needed {
        return Err(QuizError::InsufficientData {
            needed,
            found: verses.len(),
        });
    }

    // The last verse has no successor
    let valid_indices: Vec<usize> = (0..verses.len() - 1).collect();
    let selected = shuffle(&valid_indices, rng);

    let questions = selected
        .into_iter()
        .take(count)
        .map(|index| {
            let current = &verses[index];
            let next = &verses[index + 1];
            let correct_answer = next.arabic_text.clone();
            let distractors = pick_distractors(
                verses,
                &[current.id, next.id],
                &correct_answer,
                |v| v.arabic_text.clone(),
                rng,
            );

            QuizQuestion {
                ayah_id: current.id,
                surah_number: current.surah_number,
                ayah_number: current.ayah_number,
                question_text: current.arabic_text.clone(),
                options: build_options(&correct_answer, distractors, rng),
                correct_answer,
            }
        })
        .collect();

    Ok(questions)
}

fn ask_about_random_verses<R, F>(
    verses: &[Verse],
    count: usize,
    rng: &mut R,
    answer_of: F,
) -> Result<Vec<QuizQuestion>, QuizError>
where
    R: Rng + ?Sized,
    F: Fn(&Verse) -> String,
{
    if verses.len() < MIN_VERSE_POOL {
        return Err(QuizError::InsufficientData {
            needed: MIN_VERSE_POOL,
            found: verses.len(),
        });
    }

    let pool: Vec<&Verse> = verses.iter().collect();
    let selected = shuffle(&pool, rng);

    let questions = selected
        .into_iter()
        .take(count)
        .map(|verse| {
            let correct_answer = answer_of(verse);
            let distractors =
                pick_distractors(verses, &[verse.id], &correct_answer, &answer_of, rng);

            QuizQuestion {
                ayah_id: verse.id,
                surah_number: verse.surah_number,
                ayah_number: verse.ayah_number,
                question_text: verse.arabic_text.clone(),
                options: build_options(&correct_answer, distractors, rng),
                correct_answer,
            }
        })
        .collect();

    Ok(questions)
}

/// Up to DISTRACTOR_COUNT answers taken from other verses in random order.
/// Texts equal to the correct answer, or already picked, are skipped.
fn pick_distractors<R, F>(
    verses: &[Verse],
    excluded_ids: &[i64],
    correct_answer: &str,
    answer_of: F,
    rng: &mut R,
) -> Vec<String>
where
    R: Rng + ?Sized,
    F: Fn(&Verse) -> String,
{
    let pool: Vec<&Verse> = verses
        .iter()
        .filter(|v| !excluded_ids.contains(&v.id))
        .collect();

    let mut picked: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
    for candidate in shuffle(&pool, rng) {
        if picked.len() == DISTRACTOR_COUNT {
            break;
        }
        let text = answer_of(candidate);
        if text == correct_answer || picked.contains(&text) {
            continue;
        }
        picked.push(text);
    }
    picked
}
