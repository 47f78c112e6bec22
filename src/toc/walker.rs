//! Collecting the chapters of one book or volume container.

use super::{
    ChapterRecord, Diagnostic, EntryRecords, SELECTORS, WEB_SERIAL_HEADER, element_text,
    extract_entry,
};
use scraper::ElementRef;

/// Chapters found in one container, plus the entries that were skipped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Walk {
    pub chapters: Vec<ChapterRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Extracts every chapter inside `container`, tagged with the given indices.
///
/// `.chapter-entry` units are preferred. Without any, table rows with at least
/// three cells are read as web serial / audiobook / ebook. An entry that needed
/// a lenient read still contributes its records and is noted as a
/// [`Diagnostic`].
pub fn walk_container(container: Option<ElementRef<'_>>, volume: usize, book: usize) -> Walk {
    let Some(container) = container else {
        return Walk::default();
    };

    let entries: Vec<ElementRef<'_>> = container.select(&SELECTORS.chapter_entry).collect();
    if entries.is_empty() {
        return walk_rows(container, volume, book);
    }

    let mut walk = Walk::default();
    for (position, entry) in entries.into_iter().enumerate() {
        let EntryRecords { records, error } = extract_entry(entry, volume, book);
        walk.chapters.extend(records);
        if let Some(error) = error {
            walk.diagnostics.push(Diagnostic {
                volume,
                book,
                entry: position,
                error,
            });
        }
    }
    walk
}

fn walk_rows(container: ElementRef<'_>, volume: usize, book: usize) -> Walk {
    let chapters = container
        .select(&SELECTORS.row)
        .filter_map(row_cells)
        .filter(|[web_serial, _, _]| !WEB_SERIAL_HEADER.is_match(web_serial))
        .filter_map(|cells| ChapterRecord::from_cells(volume, book, cells))
        .collect();

    Walk {
        chapters,
        diagnostics: Vec::new(),
    }
}

/// Trimmed text of the first three data cells, if the row has that many.
pub(super) fn row_cells(row: ElementRef<'_>) -> Option<[String; 3]> {
    let cells: Vec<String> = row
        .select(&SELECTORS.data_cell)
        .take(3)
        .map(element_text)
        .collect();
    cells.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Column, EntryParseError};
    use scraper::{Html, Selector};

    fn walk_html(inner: &str) -> Walk {
        let html = Html::parse_fragment(&format!(r#"<div class="book-body">{inner}</div>"#));
        let selector = Selector::parse(".book-body").unwrap();
        walk_container(html.select(&selector).next(), 1, 3)
    }

    #[test]
    fn test_absent_container_is_noop() {
        assert_eq!(walk_container(None, 0, 0), Walk::default());
    }

    #[test]
    fn test_entries_in_document_order() {
        let walk = walk_html(
            r#"<div class="chapter-entry"><div class="body-web">1.00</div></div>
               <div class="chapter-entry"><div class="body-web">1.01</div><div class="body-audiobook">A<br>B</div></div>
               <div class="chapter-entry"><div class="body-web">1.02</div></div>"#,
        );
        let titles: Vec<&str> = walk
            .chapters
            .iter()
            .filter_map(|c| c.web_serial.as_deref())
            .collect();
        assert_eq!(titles, vec!["1.00", "1.01", "1.01", "1.02"]);
        assert!(walk.chapters.iter().all(|c| c.volume == 1 && c.book == 3));
    }

    #[test]
    fn test_nested_break_is_recorded_and_entry_kept() {
        let walk = walk_html(
            r#"<div class="chapter-entry"><div class="body-web">1.00</div></div>
               <div class="chapter-entry"><div class="body-web">1.01</div><div class="body-audiobook"><i>A<br>B</i></div></div>
               <div class="chapter-entry"><div class="body-web">1.02</div></div>"#,
        );
        let audiobook: Vec<Option<&str>> =
            walk.chapters.iter().map(|c| c.audiobook.as_deref()).collect();
        assert_eq!(audiobook, vec![None, Some("A"), Some("B"), None]);
        assert_eq!(
            walk.diagnostics,
            vec![Diagnostic {
                volume: 1,
                book: 3,
                entry: 1,
                error: EntryParseError::NestedBreak {
                    column: Column::Audiobook
                },
            }]
        );
    }

    #[test]
    fn test_row_fallback() {
        let walk = walk_html(
            r#"<table>
                <tr><td>Web Serial</td><td>Audiobook</td><td>E-book</td></tr>
                <tr><td> 1.00 </td><td>Chapter 1</td><td></td></tr>
                <tr><td></td><td></td><td></td></tr>
                <tr><td>too</td><td>short</td></tr>
                <tr><td>1.01</td><td></td><td>Chapter 2</td><td>extra</td></tr>
            </table>"#,
        );
        assert_eq!(walk.chapters.len(), 2);
        assert_eq!(walk.chapters[0].web_serial.as_deref(), Some("1.00"));
        assert_eq!(walk.chapters[0].audiobook.as_deref(), Some("Chapter 1"));
        assert_eq!(walk.chapters[0].ebook, None);
        assert_eq!(walk.chapters[1].audiobook, None);
        assert_eq!(walk.chapters[1].ebook.as_deref(), Some("Chapter 2"));
    }

    #[test]
    fn test_row_fallback_does_not_split_lines() {
        let walk = walk_html("<table><tr><td>1.00</td><td>A<br>B</td><td></td></tr></table>");
        assert_eq!(walk.chapters.len(), 1);
        assert_eq!(walk.chapters[0].audiobook.as_deref(), Some("AB"));
    }

    #[test]
    fn test_nothing_to_walk() {
        assert_eq!(walk_html("<p>No chapters yet</p>"), Walk::default());
    }
}
