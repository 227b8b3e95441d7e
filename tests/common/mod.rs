use std::net::TcpListener;
use std::sync::Arc;

use al_asas::http::run;
use al_asas::quiz::QuizType;
use al_asas::store::{QuestionInsert, SqliteStore, VerseInsert, WordInsert};

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

pub const FATIHA: [(&str, &str); 7] = [
    (
        "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ",
        "In the name of Allah, the Entirely Merciful, the Especially Merciful.",
    ),
    (
        "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ",
        "[All] praise is [due] to Allah, Lord of the worlds -",
    ),
    (
        "الرَّحْمَٰنِ الرَّحِيمِ",
        "The Entirely Merciful, the Especially Merciful,",
    ),
    (
        "مَالِكِ يَوْمِ الدِّينِ",
        "Sovereign of the Day of Recompense.",
    ),
    (
        "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ",
        "It is You we worship and You we ask for help.",
    ),
    (
        "اهْدِنَا الصِّرَاطَ الْمُسْتَقِيمَ",
        "Guide us to the straight path -",
    ),
    (
        "صِرَاطَ الَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ الْمَغْضُوبِ عَلَيْهِمْ وَلَا الضَّالِّينَ",
        "The path of those upon whom You have bestowed favor, not of those who have evoked [Your] anger or of those who are astray.",
    ),
];

/// Al-Fatiha on page 1, the words of its first two ayahs and one authored question
fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().expect("Failed to open in-memory store");

    let verses: Vec<VerseInsert> = FATIHA
        .iter()
        .enumerate()
        .map(|(i, (arabic, english))| VerseInsert {
            surah_number: 1,
            ayah_number: i as u32 + 1,
            arabic_text: arabic.to_string(),
            english_translation: english.to_string(),
        })
        .collect();
    let ids = store.insert_verses(&verses).expect("Failed to insert verses");

    let pages: Vec<(i64, u32)> = ids.values().map(|id| (*id, 1)).collect();
    store.update_verse_pages(&pages).expect("Failed to set pages");

    let mut words = Vec::new();
    let mut qul_word_id = 1;
    for ayah in [1u32, 2] {
        let verse_id = ids[&(1, ayah)];
        for (position, text) in FATIHA[ayah as usize - 1].0.split_whitespace().enumerate() {
            words.push(WordInsert {
                verse_id,
                position: position as u32 + 1,
                arabic_text: text.to_string(),
                page_number: 1,
                qul_word_id,
            });
            qul_word_id += 1;
        }
    }
    store.insert_words(&words).expect("Failed to insert words");

    store
        .insert_questions(&[QuestionInsert {
            question_type: QuizType::ConceptToAyah,
            question_text: "Which ayah praises Allah as Lord of the worlds?".to_string(),
            correct_answer: "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ".to_string(),
            distractors: vec![
                "مَالِكِ يَوْمِ الدِّينِ".to_string(),
                "اهْدِنَا الصِّرَاطَ الْمُسْتَقِيمَ".to_string(),
                "الرَّحْمَٰنِ الرَّحِيمِ".to_string(),
            ],
            verse_id: ids[&(1, 2)],
        }])
        .expect("Failed to insert questions");

    store
}

pub async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = run(listener, Arc::new(seeded_store())).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        api_client: reqwest::Client::new(),
    }
}

#[allow(dead_code)]
impl TestApp {
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
