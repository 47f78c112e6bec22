//! Nested volume / book layout.

use super::{DEFAULT_BOOK, Diagnostic, SELECTORS, TocBuilder, element_text, walk_container};
use crate::error::EntryParseError;
use scraper::{ElementRef, Selector};
use tracing::debug;

/// Walks every volume wrapper, and every book wrapper inside it.
pub(super) fn parse(volumes: &[ElementRef<'_>]) -> TocBuilder {
    let mut toc = TocBuilder::default();

    for (position, wrapper) in volumes.iter().enumerate() {
        let name = volume_name(*wrapper, position);
        let volume = toc.volumes.register(&name);

        let books: Vec<ElementRef<'_>> = wrapper.select(&SELECTORS.book_wrapper).collect();
        if books.is_empty() {
            // The whole volume is one implicit book.
            if toc.books.is_empty() {
                toc.books.register(DEFAULT_BOOK);
            }
            toc.merge(walk_container(Some(*wrapper), volume, 0));
        } else {
            for (book_position, book_wrapper) in books.into_iter().enumerate() {
                parse_book(&mut toc, book_wrapper, volume, book_position);
            }
        }

        debug!(
            volume = %name,
            position = position + 1,
            total = volumes.len(),
            "processed volume"
        );
    }

    toc
}

fn parse_book(toc: &mut TocBuilder, wrapper: ElementRef<'_>, volume: usize, position: usize) {
    let name = book_name(wrapper).unwrap_or_else(|| format!("Book {}", toc.books.len() + 1));
    let book = toc.books.register(&name);

    match wrapper.select(&SELECTORS.book_body).next() {
        Some(body) => toc.merge(walk_container(Some(body), volume, book)),
        None => toc.diagnostics.push(Diagnostic {
            volume,
            book,
            entry: position,
            error: EntryParseError::MissingBookBody { book: name },
        }),
    }
}

fn volume_name(wrapper: ElementRef<'_>, position: usize) -> String {
    wrapper
        .select(&SELECTORS.volume_heading)
        .next()
        .map(element_text)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("Volume {}", position + 1))
}

/// `"<number> -<title>"` when both parts are present, else whichever is.
fn book_name(wrapper: ElementRef<'_>) -> Option<String> {
    let title = wrapper.select(&SELECTORS.book_title).next()?;
    let part = |selector: &Selector| {
        title
            .select(selector)
            .next()
            .map(element_text)
            .unwrap_or_default()
    };
    let number = part(&SELECTORS.book_number);
    let text = part(&SELECTORS.book_title_text);

    match (number.is_empty(), text.is_empty()) {
        (false, false) => Some(format!("{number} -{text}")),
        (false, true) => Some(number),
        (true, false) => Some(text),
        (true, true) => None,
    }
}
