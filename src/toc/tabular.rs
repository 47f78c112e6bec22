//! Flat table layout, used when the page has no volume wrappers.

use super::walker::row_cells;
use super::{
    AUDIOBOOK_HEADER, BOOK_HEADING, ChapterRecord, DEFAULT_BOOK, DEFAULT_VOLUME, SELECTORS,
    TocBuilder, VOLUME_HEADING, WEB_SERIAL_HEADER, element_text,
};
use crate::error::ParseError;
use scraper::ElementRef;

/// Reads the first table in `container` row by row.
///
/// `Volume N` and `Book N` header rows switch the current volume and book;
/// rows with three or more data cells are chapters.
pub(super) fn parse(container: ElementRef<'_>) -> Result<TocBuilder, ParseError> {
    let table = container
        .select(&SELECTORS.table)
        .next()
        .ok_or(ParseError::NoTable)?;

    let mut toc = TocBuilder::default();
    let mut volume: Option<usize> = None;
    let mut book: Option<usize> = None;

    for row in table.select(&SELECTORS.row) {
        if let Some(header) = row.select(&SELECTORS.header_cell).next() {
            let heading = element_text(header);
            if VOLUME_HEADING.is_match(&heading) {
                volume = Some(toc.volumes.register(&heading));
                continue;
            }
            if BOOK_HEADING.is_match(&heading) {
                book = Some(toc.books.register(&heading));
                continue;
            }
        }

        let Some(cells) = row_cells(row) else {
            continue;
        };

        let v = *volume.get_or_insert_with(|| toc.volumes.register(DEFAULT_VOLUME));
        let b = *book.get_or_insert_with(|| toc.books.register(DEFAULT_BOOK));

        // Column header rows.
        let [web_serial, _, _] = &cells;
        if WEB_SERIAL_HEADER.is_match(web_serial) || AUDIOBOOK_HEADER.is_match(web_serial) {
            continue;
        }

        if let Some(record) = ChapterRecord::from_cells(v, b, cells) {
            toc.chapters.push(record);
        }
    }

    Ok(toc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn parse_body(body: &str) -> Result<TocBuilder, ParseError> {
        let html = Html::parse_document(&format!("<html><body>{body}</body></html>"));
        parse(html.root_element())
    }

    #[test]
    fn test_missing_table() {
        assert!(matches!(parse_body("<p>no table</p>"), Err(ParseError::NoTable)));
    }

    #[test]
    fn test_headers_switch_volume_and_book() {
        let toc = parse_body(
            "<table>
                <tr><th>Volume 1</th></tr>
                <tr><th>Book 1</th></tr>
                <tr><td>1.00</td><td>Ch 1</td><td>Ch 1</td></tr>
                <tr><th>Book 2</th></tr>
                <tr><td>1.01</td><td>Ch 2</td><td></td></tr>
                <tr><th>Volume 2</th></tr>
                <tr><td>2.00</td><td></td><td></td></tr>
                <tr><th>volume 1</th></tr>
                <tr><th>Book 2</th></tr>
                <tr><td>1.02</td><td></td><td></td></tr>
            </table>",
        )
        .unwrap();

        assert_eq!(toc.volumes.names(), &["Volume 1", "Volume 2", "volume 1"]);
        assert_eq!(toc.books.names(), &["Book 1", "Book 2"]);
        let positions: Vec<(usize, usize)> =
            toc.chapters.iter().map(|c| (c.volume, c.book)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_defaults_before_first_header() {
        let toc = parse_body(
            "<table>
                <tr><td>Web Serial</td><td>Audiobook</td><td>Ebook</td></tr>
                <tr><td>1.00</td><td></td><td></td></tr>
                <tr><th>Volume 1</th></tr>
                <tr><td>1.01</td><td></td><td></td></tr>
            </table>",
        )
        .unwrap();

        assert_eq!(toc.volumes.names(), &["Volume 1"]);
        assert_eq!(toc.books.names(), &["Book 1"]);
        assert_eq!(toc.chapters.len(), 2);
        assert!(toc.chapters.iter().all(|c| c.volume == 0 && c.book == 0));
    }

    #[test]
    fn test_header_guard_and_empty_rows() {
        let toc = parse_body(
            "<table>
                <tr><td>Audiobook</td><td>x</td><td>y</td></tr>
                <tr><td>WebSerial</td><td>x</td><td>y</td></tr>
                <tr><td> </td><td></td><td> </td></tr>
                <tr><th>Notes</th><td>1.00</td><td>A</td><td>E</td></tr>
            </table>",
        )
        .unwrap();

        assert_eq!(toc.chapters.len(), 1);
        assert_eq!(toc.chapters[0].web_serial.as_deref(), Some("1.00"));
        assert_eq!(toc.chapters[0].ebook.as_deref(), Some("E"));
    }
}
