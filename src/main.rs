use std::sync::Arc;

use al_asas::config::Config;
use al_asas::quiz::{self, QuizQuestion, QuizRequest, QuizType, Scope, SURAH_COUNT};
use al_asas::store::SqliteStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup},
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveQuizType,
    ReceiveSurah {
        quiz_type: QuizType,
    },
    ReceiveAmountOfQuestions {
        quiz_type: QuizType,
        surah: u32,
    },
    Playing {
        quiz_type: QuizType,
        questions: Vec<QuizQuestion>,
        question_number: usize,
        score: usize,
    },
}

type UserInfoStorage = std::sync::Arc<ErasedStorage<State>>;

// Menu labels, in the order they are shown
const QUIZ_CHOICES: [(&str, QuizType); 5] = [
    ("Ayah → meaning", QuizType::AyahToMeaning),
    ("Ayah → number", QuizType::AyahToNumber),
    ("Next ayah", QuizType::NextAyah),
    ("Concept → ayah", QuizType::ConceptToAyah),
    ("Last diacritic", QuizType::DiacriticQuiz),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let config = Config::from_env();
    log::info!("Starting quiz bot...");

    let bot = Bot::from_env();

    log::info!("Opening dialogue storage at {}", config.dialogue_db_path.display());
    let storage: UserInfoStorage =
        SqliteStorage::open(&config.dialogue_db_path.to_string_lossy(), Json)
            .await?
            .erase();

    let store = Arc::new(SqliteStore::open(&config.database_path)?);

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveQuizType].endpoint(receive_quiz_type))
            .branch(dptree::case![State::ReceiveSurah { quiz_type }].endpoint(receive_surah))
            .branch(
                dptree::case![State::ReceiveAmountOfQuestions { quiz_type, surah }]
                    .endpoint(receive_amount_of_questions),
            )
            .branch(
                dptree::case![State::Playing {
                    quiz_type,
                    questions,
                    question_number,
                    score
                }]
                .endpoint(play),
            ),
    )
    .dependencies(dptree::deps![storage, store])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

const GREETING_TEXT: &str = "Assalamu alaikum! I will quiz you on the ayahs you are memorizing. \
                             Which quiz would you like?";
async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT)
        .reply_markup(quiz_menu())
        .await?;

    dialogue.update(State::ReceiveQuizType).await?;
    Ok(())
}

async fn receive_quiz_type(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    let chosen = msg
        .text()
        .and_then(|text| QUIZ_CHOICES.iter().find(|(label, _)| *label == text))
        .map(|(_, quiz_type)| *quiz_type);

    let Some(quiz_type) = chosen else {
        bot.send_message(msg.chat.id, "Please pick one of the quizzes")
            .reply_markup(quiz_menu())
            .await?;
        return Ok(());
    };

    // Authored questions aren't tied to a surah
    if !quiz_type.uses_verse_pool() {
        ask_amount_of_questions(&bot, &msg).await?;
        dialogue
            .update(State::ReceiveAmountOfQuestions { quiz_type, surah: 1 })
            .await?;
        return Ok(());
    }

    bot.send_message(
        msg.chat.id,
        format!("Which surah? Send a number from 1 to {SURAH_COUNT}"),
    )
    .await?;
    dialogue.update(State::ReceiveSurah { quiz_type }).await?;
    Ok(())
}

async fn receive_surah(
    bot: Bot,
    dialogue: QuizDialogue,
    quiz_type: QuizType,
    msg: Message,
) -> HandlerResult {
    let surah = msg.text().and_then(|t| t.trim().parse::<u32>().ok());
    let surah = match surah {
        Some(s) if (1..=SURAH_COUNT).contains(&s) => s,
        _ => {
            bot.send_message(
                msg.chat.id,
                format!("Please send a surah number from 1 to {SURAH_COUNT}"),
            )
            .await?;
            return Ok(());
        }
    };

    ask_amount_of_questions(&bot, &msg).await?;
    dialogue
        .update(State::ReceiveAmountOfQuestions { quiz_type, surah })
        .await?;
    Ok(())
}

async fn ask_amount_of_questions(bot: &Bot, msg: &Message) -> HandlerResult {
    let keyboard = KeyboardMarkup::new(vec![
        vec![KeyboardButton::new("5")],
        vec![KeyboardButton::new("10")],
        vec![KeyboardButton::new("15")],
    ]);
    bot.send_message(msg.chat.id, "How many questions?")
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

async fn receive_amount_of_questions(
    store: Arc<SqliteStore>,
    bot: Bot,
    dialogue: QuizDialogue,
    (quiz_type, surah): (QuizType, u32),
    msg: Message,
) -> HandlerResult {
    let Some(amount) = msg.text().and_then(|t| t.trim().parse::<usize>().ok()) else {
        bot.send_message(msg.chat.id, "Please send a number").await?;
        return Ok(());
    };
    if amount == 0 {
        bot.send_message(msg.chat.id, "The number of questions can't be 0")
            .await?;
        return Ok(());
    }

    let request = QuizRequest {
        quiz_type,
        scope: Scope::Surah(surah),
        question_count: amount,
    };
    // rusqlite blocks, keep it off the dispatcher's workers
    let questions = tokio::task::spawn_blocking(move || {
        let mut rng = StdRng::from_entropy();
        quiz::generate(store.as_ref(), &request, &mut rng).and_then(quiz::ensure_non_empty)
    })
    .await?;

    let questions = match questions {
        Ok(questions) => questions,
        Err(e) => {
            log::warn!("Could not build {} quiz for surah {}: {}", quiz_type, surah, e);
            bot.send_message(
                msg.chat.id,
                format!("I couldn't build that quiz ({e}). Try another one?"),
            )
            .reply_markup(quiz_menu())
            .await?;
            dialogue.update(State::ReceiveQuizType).await?;
            return Ok(());
        }
    };

    let intro = if questions.len() < amount {
        format!("I could only make {} questions. Let's begin!", questions.len())
    } else {
        "Great! Let's begin!".to_string()
    };
    bot.send_message(msg.chat.id, intro)
        .reply_markup(KeyboardMarkup::new(vec![vec![KeyboardButton::new("Go!")]]))
        .await?;

    dialogue
        .update(State::Playing {
            quiz_type,
            questions,
            question_number: 0,
            score: 0,
        })
        .await?;
    Ok(())
}

async fn play(
    bot: Bot,
    dialogue: QuizDialogue,
    (quiz_type, questions, question_number, score): (QuizType, Vec<QuizQuestion>, usize, usize),
    msg: Message,
) -> HandlerResult {
    let mut current_score = score;

    // question_number points at the next question; the previous one is being answered
    if question_number != 0 {
        let question = &questions[question_number - 1];
        if is_correct(question, msg.text().unwrap_or_default()) {
            bot.send_message(msg.chat.id, "Correct!").await?;
            current_score += 1;
        } else {
            bot.send_message(
                msg.chat.id,
                format!("Not quite. The answer was:\n{}", question.correct_answer),
            )
            .await?;
        }
    }

    if question_number >= questions.len() {
        let quiz_score = format!(
            "Quiz finished! You answered {} of {} correctly.\nWhat would you like to do next?",
            current_score,
            questions.len()
        );
        bot.send_message(msg.chat.id, quiz_score)
            .reply_markup(quiz_menu())
            .await?;

        dialogue.update(State::ReceiveQuizType).await?;
        return Ok(());
    }

    let question = &questions[question_number];
    bot.send_message(
        msg.chat.id,
        question_text(quiz_type, question_number + 1, question),
    )
    .reply_markup(answer_keyboard(question))
    .await?;

    dialogue
        .update(State::Playing {
            quiz_type,
            questions,
            question_number: question_number + 1,
            score: current_score,
        })
        .await?;
    Ok(())
}

fn quiz_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(
        QUIZ_CHOICES
            .iter()
            .map(|(label, _)| vec![KeyboardButton::new(*label)])
            .collect::<Vec<_>>(),
    )
}

fn answer_keyboard(question: &QuizQuestion) -> KeyboardMarkup {
    let buttons = (1..=question.options.len())
        .map(|n| KeyboardButton::new(n.to_string()))
        .collect::<Vec<_>>();
    KeyboardMarkup::new(vec![buttons])
}

fn question_text(quiz_type: QuizType, number: usize, question: &QuizQuestion) -> String {
    let text = &question.question_text;
    let prompt = match quiz_type {
        QuizType::AyahToMeaning => format!("What does this ayah mean?\n\n{}", text),
        QuizType::AyahToNumber => format!("Which ayah is this?\n\n{}", text),
        QuizType::NextAyah => format!("Which ayah comes next?\n\n{}", text),
        QuizType::ConceptToAyah => text.clone(),
        QuizType::DiacriticQuiz => format!("How does this ayah end?\n\n{} …", text),
    };

    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("{}) {}", i + 1, option))
        .collect::<Vec<_>>()
        .join("\n");

    format!("Question #{}:\n{}\n\n{}", number, prompt, options)
}

/// Accepts either the option number or the option text itself
fn is_correct(question: &QuizQuestion, answer: &str) -> bool {
    let answer = answer.trim();
    match answer.parse::<usize>() {
        Ok(n) => question.correct_index() == n.checked_sub(1),
        Err(_) => answer == question.correct_answer,
    }
}
