pub mod concept;
pub mod diacritic;
pub mod shuffle;
pub mod verses;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{ManualQuestion, Verse};
use crate::store::QuizSource;

// Distractor modes need the correct answer plus this many others
pub const MIN_VERSE_POOL: usize = 4;
pub const DISTRACTOR_COUNT: usize = 3;
pub const MAX_QUESTION_COUNT: usize = 50;
pub const SURAH_COUNT: u32 = 114;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizType {
    AyahToMeaning,
    AyahToNumber,
    NextAyah,
    ConceptToAyah,
    DiacriticQuiz,
}

impl QuizType {
    pub const ALL: [QuizType; 5] = [
        QuizType::AyahToMeaning,
        QuizType::AyahToNumber,
        QuizType::NextAyah,
        QuizType::ConceptToAyah,
        QuizType::DiacriticQuiz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuizType::AyahToMeaning => "AYAH_TO_MEANING",
            QuizType::AyahToNumber => "AYAH_TO_NUMBER",
            QuizType::NextAyah => "NEXT_AYAH",
            QuizType::ConceptToAyah => "CONCEPT_TO_AYAH",
            QuizType::DiacriticQuiz => "DIACRITIC_QUIZ",
        }
    }

    /// Whether the question pool comes from the verses of a surah
    pub fn uses_verse_pool(&self) -> bool {
        !matches!(self, QuizType::ConceptToAyah)
    }
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    Surah(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub quiz_type: QuizType,
    pub scope: Scope,
    pub question_count: usize,
}

impl QuizRequest {
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.question_count == 0 {
            return Err(QuizError::InvalidRequest(
                "questionCount must be at least 1".to_string(),
            ));
        }
        if self.question_count > MAX_QUESTION_COUNT {
            return Err(QuizError::InvalidRequest(format!(
                "questionCount must be at most {MAX_QUESTION_COUNT}"
            )));
        }
        match self.scope {
            Scope::Surah(surah) if surah == 0 || surah > SURAH_COUNT => {
                Err(QuizError::InvalidRequest(format!(
                    "surah {surah} is out of range 1..={SURAH_COUNT}"
                )))
            }
            Scope::Surah(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub ayah_id: i64,
    pub surah_number: u32,
    pub ayah_number: u32,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o == &self.correct_answer)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("not enough data: need at least {needed}, found {found}")]
    InsufficientData { needed: usize, found: usize },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("only {produced} of {requested} questions could be generated")]
    PartialResult { produced: usize, requested: usize },
    #[error("no valid questions could be generated")]
    NoQuestions,
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

/// Builds up to `count` questions of the given type.
///
/// `verses` must be in their natural order (ascending ayah) for `NextAyah`;
/// `manual` is only read for `ConceptToAyah`. All randomness is drawn from `rng`.
pub fn assemble<R: Rng + ?Sized>(
    quiz_type: QuizType,
    verses: &[Verse],
    manual: &[ManualQuestion],
    count: usize,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    if count == 0 {
        return Err(QuizError::InvalidRequest(
            "questionCount must be at least 1".to_string(),
        ));
    }

    match quiz_type {
        QuizType::AyahToMeaning => verses::ayah_to_meaning(verses, count, rng),
        QuizType::AyahToNumber => verses::ayah_to_number(verses, count, rng),
        QuizType::NextAyah => verses::next_ayah(verses, count, rng),
        QuizType::ConceptToAyah => concept::concept_to_ayah(manual, count, rng),
        QuizType::DiacriticQuiz => diacritic::diacritic_quiz(verses, count, rng),
    }
}

/// Validates the request, pulls the pool it needs from `source` and assembles the quiz
pub fn generate<S: QuizSource + ?Sized, R: Rng + ?Sized>(
    source: &S,
    request: &QuizRequest,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    request.validate()?;
    let Scope::Surah(surah) = request.scope;

    let (verses, manual) = if request.quiz_type.uses_verse_pool() {
        (source.verses_in_surah(surah)?, Vec::new())
    } else {
        (Vec::new(), source.manual_questions(request.question_count)?)
    };
    log::debug!(
        "Assembling {} x{} from {} verses / {} authored questions",
        request.quiz_type,
        request.question_count,
        verses.len(),
        manual.len()
    );

    assemble(request.quiz_type, &verses, &manual, request.question_count, rng)
}

/// Treats an empty result as an error, for callers that accept partial quizzes
pub fn ensure_non_empty(questions: Vec<QuizQuestion>) -> Result<Vec<QuizQuestion>, QuizError> {
    if questions.is_empty() {
        return Err(QuizError::NoQuestions);
    }
    Ok(questions)
}

/// Treats any result shorter than `requested` as an error
pub fn ensure_complete(
    questions: Vec<QuizQuestion>,
    requested: usize,
) -> Result<Vec<QuizQuestion>, QuizError> {
    if questions.len() < requested {
        return Err(QuizError::PartialResult {
            produced: questions.len(),
            requested,
        });
    }
    Ok(questions)
}

/// Shuffles the correct answer in among the distractors
fn build_options<R: Rng + ?Sized>(
    correct_answer: &str,
    distractors: Vec<String>,
    rng: &mut R,
) -> Vec<String> {
    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct_answer.to_string());
    options.extend(distractors);
    shuffle::shuffle(&options, rng)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::Verse;

    pub fn verse(id: i64, ayah: u32, arabic: &str, english: &str) -> Verse {
        Verse {
            id,
            surah_number: 1,
            ayah_number: ayah,
            arabic_text: arabic.to_string(),
            english_translation: english.to_string(),
        }
    }

    /// Al-Fatiha, in order
    pub fn fatiha() -> Vec<Verse> {
        vec![
            verse(
                1,
                1,
                "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ",
                "In the name of Allah, the Entirely Merciful, the Especially Merciful.",
            ),
            verse(
                2,
                2,
                "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ",
                "[All] praise is [due] to Allah, Lord of the worlds -",
            ),
            verse(
                3,
                3,
                "الرَّحْمَٰنِ الرَّحِيمِ",
                "The Entirely Merciful, the Especially Merciful,",
            ),
            verse(
                4,
                4,
                "مَالِكِ يَوْمِ الدِّينِ",
                "Sovereign of the Day of Recompense.",
            ),
            verse(
                5,
                5,
                "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ",
                "It is You we worship and You we ask for help.",
            ),
            verse(
                6,
                6,
                "اهْدِنَا الصِّرَاطَ الْمُسْتَقِيمَ",
                "Guide us to the straight path -",
            ),
            verse(
                7,
                7,
                "صِرَاطَ الَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ الْمَغْضُوبِ عَلَيْهِمْ وَلَا الضَّالِّينَ",
                "The path of those upon whom You have bestowed favor, not of those who have evoked [Your] anger or of those who are astray.",
            ),
        ]
    }
}
