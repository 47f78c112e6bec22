//! Error types for innsync.
//!
//! Uses `thiserror` for structured error definitions. Fetch, structural parse
//! and store errors abort a run; entry errors are recorded and skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for fetching either data source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read
    #[error("HTTP request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("HTTP {status} when fetching {url}")]
    Status { url: String, status: u16 },

    /// The body was not valid JSON
    #[error("Invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client could not be built
    #[error("Could not create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Structural failure of the table-of-contents page.
///
/// Any of these means the page cannot be trusted and nothing is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No element could serve as the table-of-contents container
    #[error("Could not find table of contents container in HTML")]
    NoContainer,

    /// No volume wrappers and no table to fall back to
    #[error("Could not find table or volume structure in HTML")]
    NoTable,

    /// The page was understood but yielded no chapters
    #[error("No chapters found in the HTML")]
    NoChapters,
}

/// Which chapter-entry column a problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    WebSerial,
    Audiobook,
    Ebook,
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Column::WebSerial => "web serial",
            Column::Audiobook => "audiobook",
            Column::Ebook => "ebook",
        })
    }
}

/// A single entry, row or book that had to be skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryParseError {
    /// A line break sits inside a nested tag, so the cell cannot be split safely
    #[error("{column} cell has a line break inside a nested tag")]
    NestedBreak { column: Column },

    /// A book wrapper without a body container
    #[error("book '{book}' has no body")]
    MissingBookBody { book: String },
}

/// Error type for writing the output documents.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Serializing a document failed
    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem failure
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory not found
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Any failure that aborts an update run.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
