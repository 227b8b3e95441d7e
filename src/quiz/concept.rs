use rand::Rng;

use super::{build_options, QuizError, QuizQuestion};
use crate::models::ManualQuestion;

/// Turns authored questions into quiz questions. Only the option order is randomised.
pub fn concept_to_ayah<R: Rng + ?Sized>(
    manual: &[ManualQuestion],
    count: usize,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    if manual.is_empty() {
        return Err(QuizError::InsufficientData { needed: 1, found: 0 });
    }

    let questions = manual
        .iter()
        .take(count)
        .map(|q| QuizQuestion {
            ayah_id: q.verse_id,
            surah_number: q.surah_number,
            ayah_number: q.ayah_number,
            question_text: q.question_text.clone(),
            options: build_options(&q.correct_answer, q.distractors.clone(), rng),
            correct_answer: q.correct_answer.clone(),
        })
        .collect();

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn authored(id: i64, correct: &str, distractors: &[&str], ayah: u32) -> ManualQuestion {
        ManualQuestion {
            id,
            question_text: format!("question {id}"),
            correct_answer: correct.to_string(),
            distractors: distractors.iter().map(|d| d.to_string()).collect(),
            verse_id: 100 + ayah as i64,
            surah_number: 1,
            ayah_number: ayah,
        }
    }

    #[test]
    fn options_are_the_authored_answers() {
        let manual = vec![authored(1, "A", &["B", "C", "D"], 4)];

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = concept_to_ayah(&manual, 5, &mut rng).unwrap();
            assert_eq!(questions.len(), 1);

            let question = &questions[0];
            assert_eq!(question.correct_answer, "A");
            assert_eq!(question.ayah_id, 104);
            assert_eq!((question.surah_number, question.ayah_number), (1, 4));

            let mut options = question.options.clone();
            options.sort();
            assert_eq!(options, vec!["A", "B", "C", "D"]);
        }
    }

    #[test]
    fn takes_at_most_count_in_pool_order() {
        let manual = vec![
            authored(1, "A", &["B"], 1),
            authored(2, "C", &["D"], 2),
            authored(3, "E", &["F"], 3),
        ];
        let mut rng = StdRng::seed_from_u64(0);

        let questions = concept_to_ayah(&manual, 2, &mut rng).unwrap();
        let texts: Vec<&str> = questions.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, vec!["question 1", "question 2"]);
    }

    #[test]
    fn empty_pool_is_insufficient_data() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            concept_to_ayah(&[], 3, &mut rng),
            Err(QuizError::InsufficientData { needed: 1, found: 0 })
        ));
    }
}
