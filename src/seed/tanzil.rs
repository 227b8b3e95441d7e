use crate::store::VerseInsert;

/// Pairs up the Arabic and translation files line by line.
///
/// Both files use the Tanzil `surah|ayah|text` layout. Lines that are blank, missing
/// on either side or not in that layout (the trailing copyright block, for one) are
/// skipped.
pub fn parse_verses(arabic: &str, translation: &str) -> Vec<VerseInsert> {
    let mut verses = Vec::new();
    let mut skipped = 0;

    for (arabic_line, translation_line) in arabic.lines().zip(translation.lines()) {
        let parsed = parse_line(arabic_line).zip(parse_line(translation_line));
        match parsed {
            Some(((surah_number, ayah_number, arabic_text), (_, _, english_translation))) => {
                verses.push(VerseInsert {
                    surah_number,
                    ayah_number,
                    arabic_text: arabic_text.to_string(),
                    english_translation: english_translation.to_string(),
                });
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {} lines that are not verses", skipped);
    }
    verses
}

fn parse_line(line: &str) -> Option<(u32, u32, &str)> {
    let line = line.trim_end_matches('\r');
    let mut parts = line.splitn(3, '|');
    let surah = parts.next()?.trim().parse().ok()?;
    let ayah = parts.next()?.trim().parse().ok()?;
    let text = parts.next()?.trim();
    if text.is_empty() {
        return None;
    }
    Some((surah, ayah, text))
}
