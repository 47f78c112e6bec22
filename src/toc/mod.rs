//! Table-of-contents parsing.
//!
//! The published table of contents comes in two layouts: nested volume and
//! book wrappers whose chapter entries carry one column per format, or a flat
//! table with `Volume N` / `Book N` header rows. [`parse_table_of_contents`]
//! detects which one is present and produces a [`TocResult`].

mod entry;
mod hierarchical;
mod names;
mod tabular;
mod text;
mod walker;

pub use entry::{EntryRecords, extract_entry};
pub use names::NameIndex;
pub use text::{extract_texts, flatten_lines};
pub use walker::{Walk, walk_container};

use crate::error::{EntryParseError, ParseError};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Name given to the volume when the page never names one.
pub const DEFAULT_VOLUME: &str = "Volume 1";

/// Name given to the book when the page never names one.
pub const DEFAULT_BOOK: &str = "Book 1";

/// Matches the header row of the web serial column.
static WEB_SERIAL_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)web\s*serial").expect("Invalid WEB_SERIAL_HEADER"));

/// Matches the header row of the audiobook column.
static AUDIOBOOK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)audiobook").expect("Invalid AUDIOBOOK_HEADER"));

/// Matches a `Volume N` header cell in the table layout.
static VOLUME_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Volume\s+\d+").expect("Invalid VOLUME_HEADING"));

/// Matches a `Book N` header cell in the table layout.
static BOOK_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Book\s+\d+").expect("Invalid BOOK_HEADING"));

/// CSS selectors used for parsing.
struct Selectors {
    /// Outermost table-of-contents container.
    container: Selector,
    /// Volume wrapper (hierarchical layout).
    volume_wrapper: Selector,
    /// Heading that names a volume.
    volume_heading: Selector,
    /// Book wrapper inside a volume.
    book_wrapper: Selector,
    /// Element holding the book number and title.
    book_title: Selector,
    /// Book number inside the title element.
    book_number: Selector,
    /// Book title text inside the title element.
    book_title_text: Selector,
    /// Container of a book's chapter entries.
    book_body: Selector,
    /// One chapter entry.
    chapter_entry: Selector,
    /// Web serial column of an entry.
    web_serial: Selector,
    /// Audiobook column of an entry.
    audiobook: Selector,
    /// Ebook column of an entry.
    ebook: Selector,
    /// Line break inside a column.
    line_break: Selector,
    /// Table for the flat layout.
    table: Selector,
    /// Table row.
    row: Selector,
    /// Header cell.
    header_cell: Selector,
    /// Data cell.
    data_cell: Selector,
}

impl Selectors {
    fn new() -> Self {
        let parse = |css: &str| Selector::parse(css).expect("Invalid selector");
        Self {
            container: parse("#table-of-contents, .table-of-contents, main, body"),
            volume_wrapper: parse(r#"[id^="vol-"], .volume-wrapper, .volume"#),
            volume_heading: parse(r#"h2, h3, .volume-title, [class*="volume-name"]"#),
            book_wrapper: parse(".book-wrapper"),
            book_title: parse(".head-book-title, .book-title"),
            book_number: parse(".book-title-num, a"),
            book_title_text: parse(".book-title-text"),
            book_body: parse(".book-body"),
            chapter_entry: parse(".chapter-entry"),
            web_serial: parse(".body-web"),
            audiobook: parse(".body-audiobook"),
            ebook: parse(".body-ebook"),
            line_break: parse("br"),
            table: parse("table"),
            row: parse("tr"),
            header_cell: parse("th"),
            data_cell: parse("td"),
        }
    }
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(Selectors::new);

/// One chapter across its three publication formats.
///
/// Serialized in the compact `{ "v", "b", "ws", "ab", "eb" }` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// Index into [`TocResult::volumes`].
    #[serde(rename = "v")]
    pub volume: usize,

    /// Index into [`TocResult::books`].
    #[serde(rename = "b")]
    pub book: usize,

    #[serde(rename = "ws")]
    pub web_serial: Option<String>,

    #[serde(rename = "ab")]
    pub audiobook: Option<String>,

    #[serde(rename = "eb")]
    pub ebook: Option<String>,
}

impl ChapterRecord {
    /// Builds a record, or `None` when all three titles are absent.
    pub fn new(
        volume: usize,
        book: usize,
        web_serial: Option<String>,
        audiobook: Option<String>,
        ebook: Option<String>,
    ) -> Option<Self> {
        if web_serial.is_none() && audiobook.is_none() && ebook.is_none() {
            return None;
        }

        Some(Self {
            volume,
            book,
            web_serial,
            audiobook,
            ebook,
        })
    }

    /// Builds a record from three plain cell texts; empty text means absent.
    fn from_cells(volume: usize, book: usize, [ws, ab, eb]: [String; 3]) -> Option<Self> {
        let present = |s: String| (!s.is_empty()).then_some(s);
        Self::new(volume, book, present(ws), present(ab), present(eb))
    }
}

/// Parsed table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocResult {
    pub volumes: Vec<String>,
    pub books: Vec<String>,
    pub chapters: Vec<ChapterRecord>,
}

/// An entry, row or book that was skipped while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub volume: usize,
    pub book: usize,
    /// Position of the entry (or book wrapper) within its container.
    pub entry: usize,
    pub error: EntryParseError,
}

/// A successful parse together with everything that had to be skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub toc: TocResult,
    pub diagnostics: Vec<Diagnostic>,
}

/// Page layout detected inside the table-of-contents container.
enum Layout<'a> {
    /// Nested volume wrappers, in document order.
    Hierarchical(Vec<ElementRef<'a>>),
    /// Flat table with header rows.
    Tabular,
}

impl<'a> Layout<'a> {
    fn detect(container: ElementRef<'a>) -> Self {
        let volumes: Vec<ElementRef<'a>> = container.select(&SELECTORS.volume_wrapper).collect();
        if volumes.is_empty() {
            Layout::Tabular
        } else {
            Layout::Hierarchical(volumes)
        }
    }
}

/// Running state shared by both layout strategies.
#[derive(Debug, Default)]
struct TocBuilder {
    volumes: NameIndex,
    books: NameIndex,
    chapters: Vec<ChapterRecord>,
    diagnostics: Vec<Diagnostic>,
}

impl TocBuilder {
    fn merge(&mut self, walk: Walk) {
        self.chapters.extend(walk.chapters);
        self.diagnostics.extend(walk.diagnostics);
    }

    fn finish(mut self) -> Result<ParseOutcome, ParseError> {
        if self.volumes.is_empty() {
            self.volumes.register(DEFAULT_VOLUME);
        }
        if self.books.is_empty() {
            self.books.register(DEFAULT_BOOK);
        }
        if self.chapters.is_empty() {
            return Err(ParseError::NoChapters);
        }

        Ok(ParseOutcome {
            toc: TocResult {
                volumes: self.volumes.into_names(),
                books: self.books.into_names(),
                chapters: self.chapters,
            },
            diagnostics: self.diagnostics,
        })
    }
}

/// Parses a full table-of-contents page.
pub fn parse_table_of_contents(html: &str) -> Result<ParseOutcome, ParseError> {
    let document = Html::parse_document(html);
    parse_document(&document)
}

/// Parses an already-built document.
pub fn parse_document(document: &Html) -> Result<ParseOutcome, ParseError> {
    let container = document
        .select(&SELECTORS.container)
        .next()
        .ok_or(ParseError::NoContainer)?;

    let builder = match Layout::detect(container) {
        Layout::Hierarchical(volumes) => {
            debug!(count = volumes.len(), "found volume wrappers");
            hierarchical::parse(&volumes)
        }
        Layout::Tabular => {
            debug!("no volume wrappers, falling back to table layout");
            tabular::parse(container)?
        }
    };

    builder.finish()
}

/// Trimmed text content of an element.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
