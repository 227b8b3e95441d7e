use std::collections::HashMap;
use std::io::{Read, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One line of the Mushaf page layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLine {
    pub page_number: u32,
    pub line_number: u32,
    pub line_type: String,
    pub is_centered: u8,
    // empty for surah headers and basmala lines
    pub first_word_id: Option<i64>,
    pub last_word_id: Option<i64>,
    pub surah_number: Option<u32>,
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<PageLine>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut lines = Vec::new();
    for (index, record) in csv_reader.deserialize().enumerate() {
        let line: PageLine =
            record.with_context(|| format!("malformed page layout row {}", index + 1))?;
        lines.push(line);
    }
    Ok(lines)
}

pub fn read_json<R: Read>(reader: R) -> Result<Vec<PageLine>> {
    serde_json::from_reader(reader).context("malformed page layout JSON")
}

pub fn write_json<W: Write>(lines: &[PageLine], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, lines).context("failed to write page layout JSON")
}

/// Maps every QUL word id to the page it is printed on
pub fn word_pages(lines: &[PageLine]) -> HashMap<i64, u32> {
    let mut pages = HashMap::new();
    for line in lines {
        if let (Some(first), Some(last)) = (line.first_word_id, line.last_word_id) {
            for word_id in first..=last {
                pages.insert(word_id, line.page_number);
            }
        }
    }
    pages
}
