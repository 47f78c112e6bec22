//! innsync - Wandering Inn table of contents and word-count updater.
//!
//! This library provides functionality for:
//! - Parsing the published table of contents into volumes, books and chapters
//! - Normalizing the word-count service's payload into a flat map
//! - Fetching both sources and writing the two JSON data files

pub mod config;
pub mod console;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod store;
pub mod toc;
pub mod updater;
pub mod utils;
pub mod wordcount;

// Re-export commonly used types
pub use config::Config;
pub use console::Console;
pub use error::{ConfigError, EntryParseError, FetchError, ParseError, StoreError, UpdateError};
pub use fetch::{HttpSource, Source};
pub use store::{OutputPaths, OutputStore};
pub use toc::{ChapterRecord, Diagnostic, ParseOutcome, TocResult, parse_table_of_contents};
pub use updater::{UpdateSummary, Updater};
pub use wordcount::{WordCountMap, normalize_word_counts};
