//! Turning one chapter entry into chapter records.

use super::{ChapterRecord, SELECTORS, extract_texts, flatten_lines};
use crate::error::{Column, EntryParseError};
use scraper::{ElementRef, Selector};

/// Records of one chapter entry, plus the first problem met while reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecords {
    pub records: Vec<ChapterRecord>,
    pub error: Option<EntryParseError>,
}

/// Extracts the chapter records of one `.chapter-entry`.
///
/// One web serial chapter is sometimes released as several audiobook or ebook
/// parts, so each column may hold several lines. The first web serial line is
/// the anchor and is repeated on every record; the other columns are aligned
/// line by line. Slots where all three columns are empty are dropped.
///
/// A column with a nested `<br>` is still split, in document order, and the
/// [`EntryParseError::NestedBreak`] is returned next to the records.
pub fn extract_entry(entry: ElementRef<'_>, volume: usize, book: usize) -> EntryRecords {
    let mut error = None;
    let mut read = |selector: &Selector, column: Column| {
        let cell = entry.select(selector).next();
        match extract_texts(cell, column) {
            Ok(texts) => texts,
            Err(e) => {
                error.get_or_insert(e);
                cell.map_or_else(|| vec![None], flatten_lines)
            }
        }
    };

    let web_serial = read(&SELECTORS.web_serial, Column::WebSerial);
    let audiobook = read(&SELECTORS.audiobook, Column::Audiobook);
    let ebook = read(&SELECTORS.ebook, Column::Ebook);

    EntryRecords {
        records: align_columns(&web_serial, &audiobook, &ebook, volume, book),
        error,
    }
}

fn align_columns(
    web_serial: &[Option<String>],
    audiobook: &[Option<String>],
    ebook: &[Option<String>],
    volume: usize,
    book: usize,
) -> Vec<ChapterRecord> {
    let anchor = web_serial.first().cloned().flatten();
    let slots = web_serial.len().max(audiobook.len()).max(ebook.len());

    (0..slots)
        .filter_map(|i| {
            ChapterRecord::new(
                volume,
                book,
                anchor.clone(),
                audiobook.get(i).cloned().flatten(),
                ebook.get(i).cloned().flatten(),
            )
        })
        .collect()
}
