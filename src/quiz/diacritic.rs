use rand::Rng;

use super::shuffle::shuffle;
use super::{QuizError, QuizQuestion};
use crate::models::Verse;

pub const FATHA: char = '\u{064E}';
pub const DAMMA: char = '\u{064F}';
pub const KASRA: char = '\u{0650}';
pub const SUKUN: char = '\u{0652}';
// Short vowel marks a verse ending may carry
pub const DIACRITICS: [char; 4] = [FATHA, DAMMA, KASRA, SUKUN];

pub fn is_diacritic(c: char) -> bool {
    DIACRITICS.contains(&c)
}

/// Scans the verses in random order and keeps the first `count` that make a valid question.
/// Returns fewer than `count` questions when the pool runs out.
pub fn diacritic_quiz<R: Rng + ?Sized>(
    verses: &[Verse],
    count: usize,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    if verses.is_empty() {
        return Err(QuizError::InsufficientData { needed: 1, found: 0 });
    }

    let candidates: Vec<&Verse> = verses.iter().collect();
    let mut questions = Vec::with_capacity(count.min(verses.len()));

    for verse in shuffle(&candidates, rng) {
        if questions.len() >= count {
            break;
        }
        match question_for_verse(verse, rng) {
            Some(question) => questions.push(question),
            None => log::trace!("Skipping {}: no supported diacritic ending", verse.reference()),
        }
    }

    if questions.len() < count {
        log::debug!(
            "Diacritic quiz produced {} of {} questions from {} verses",
            questions.len(),
            count,
            verses.len()
        );
    }
    Ok(questions)
}

/// Asks for the vowel mark on the last word of the verse.
/// `None` when the verse has a single word or its last letter carries no supported mark.
pub fn question_for_verse<R: Rng + ?Sized>(verse: &Verse, rng: &mut R) -> Option<QuizQuestion> {
    let words: Vec<&str> = verse.arabic_text.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }

    let (last_word, leading) = words.split_last()?;
    let (base_word, ending) = split_ending(last_word)?;

    let options: Vec<String> = DIACRITICS
        .iter()
        .map(|d| format!("{base_word}{d}"))
        .collect();

    Some(QuizQuestion {
        ayah_id: verse.id,
        surah_number: verse.surah_number,
        ayah_number: verse.ayah_number,
        question_text: leading.join(" "),
        options: shuffle(&options, rng),
        correct_answer: format!("{base_word}{ending}"),
    })
}

/// Splits a trailing diacritic off `word`
fn split_ending(word: &str) -> Option<(&str, char)> {
    let ending = word.chars().last()?;
    if !is_diacritic(ending) {
        return None;
    }
    let base = &word[..word.len() - ending.len_utf8()];
    Some((base, ending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::test_support::{fatiha, verse};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn basmala_offers_every_mark_on_the_same_base() {
        let basmala = verse(1, 1, "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ", "");
        let mut rng = StdRng::seed_from_u64(3);

        let question = question_for_verse(&basmala, &mut rng).unwrap();

        assert_eq!(question.question_text, "بِسْمِ اللَّهِ الرَّحْمَٰنِ");
        assert_eq!(question.correct_answer, "الرَّحِيمِ");
        assert_eq!(question.options.len(), 4);

        let hits = question
            .options
            .iter()
            .filter(|o| *o == &question.correct_answer)
            .count();
        assert_eq!(hits, 1);

        let base = "الرَّحِيم";
        let mut endings: Vec<char> = question
            .options
            .iter()
            .map(|o| {
                assert!(o.starts_with(base));
                let rest: Vec<char> = o[base.len()..].chars().collect();
                assert_eq!(rest.len(), 1);
                rest[0]
            })
            .collect();
        endings.sort();
        let mut expected = DIACRITICS.to_vec();
        expected.sort();
        assert_eq!(endings, expected);
    }

    #[test]
    fn single_word_verse_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(question_for_verse(&verse(1, 1, "اللَّهُ", ""), &mut rng).is_none());

        let questions = diacritic_quiz(&[verse(1, 1, "اللَّهُ", "")], 3, &mut rng).unwrap();
        assert!(questions.is_empty());
    }

    #[test]
    fn verse_without_a_mark_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        // ends with a shadda, not one of the four vowel marks
        let text = "\u{0642}\u{064F}\u{0644}\u{0652} \u{0631}\u{064E}\u{0628}\u{0650}\u{0651}";
        let shadda = verse(1, 1, text, "");
        // plain letters
        let bare = verse(2, 2, "الم ذلك الكتاب", "");

        assert!(question_for_verse(&shadda, &mut rng).is_none());
        assert!(question_for_verse(&bare, &mut rng).is_none());
    }

    #[test]
    fn extra_whitespace_is_ignored() {
        let mut rng = StdRng::seed_from_u64(0);
        let spaced = verse(1, 1, "  مَالِكِ   يَوْمِ  الدِّينِ ", "");

        let question = question_for_verse(&spaced, &mut rng).unwrap();
        assert_eq!(question.question_text, "مَالِكِ يَوْمِ");
        assert_eq!(question.correct_answer, "الدِّينِ");
    }

    #[test]
    fn stops_at_the_requested_count() {
        let mut rng = StdRng::seed_from_u64(8);
        let questions = diacritic_quiz(&fatiha(), 2, &mut rng).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn returns_a_partial_set_when_candidates_run_out() {
        let verses = vec![
            verse(1, 1, "اللَّهُ", ""),
            verse(2, 2, "مَالِكِ يَوْمِ الدِّينِ", ""),
            verse(3, 3, "الم ذلك", ""),
        ];
        let mut rng = StdRng::seed_from_u64(8);

        let questions = diacritic_quiz(&verses, 5, &mut rng).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].ayah_id, 2);
    }

    #[test]
    fn empty_pool_is_insufficient_data() {
        let mut rng = StdRng::seed_from_u64(8);
        assert!(matches!(
            diacritic_quiz(&[], 5, &mut rng),
            Err(QuizError::InsufficientData { .. })
        ));
    }
}
