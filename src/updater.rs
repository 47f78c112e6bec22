//! One update run: fetch, parse, normalize, write.

use crate::config::SourcesConfig;
use crate::error::UpdateError;
use crate::fetch::Source;
use crate::store::{OutputPaths, OutputStore};
use crate::toc::{Diagnostic, parse_table_of_contents};
use crate::wordcount::{normalize_word_counts, total_words};
use tracing::{info, warn};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub volumes: usize,
    pub books: usize,
    pub chapters: usize,
    pub word_count_entries: usize,
    pub total_words: u64,
    /// Entries read leniently and books skipped by the parser.
    pub diagnostics: Vec<Diagnostic>,
    pub paths: OutputPaths,
}

/// Drives a full update against a [`Source`].
pub struct Updater<'a, S: Source> {
    source: &'a S,
    sources: &'a SourcesConfig,
    store: &'a OutputStore,
}

impl<'a, S: Source> Updater<'a, S> {
    pub fn new(source: &'a S, sources: &'a SourcesConfig, store: &'a OutputStore) -> Self {
        Self {
            source,
            sources,
            store,
        }
    }

    /// Fetches both sources concurrently and rewrites both output files.
    ///
    /// Nothing is written unless both fetches succeed and the table of
    /// contents parses.
    pub async fn run(&self) -> Result<UpdateSummary, UpdateError> {
        let toc_url = self.sources.table_of_contents_url.as_str();
        let word_count_url = self.sources.word_count_url.as_str();

        info!(url = toc_url, "fetching table of contents");
        info!(url = word_count_url, "fetching word counts");
        let (html, payload) = futures::try_join!(
            self.source.fetch_text(toc_url),
            self.source.fetch_json(word_count_url)
        )?;

        let outcome = parse_table_of_contents(&html)?;
        for diagnostic in &outcome.diagnostics {
            warn!(
                volume = diagnostic.volume,
                book = diagnostic.book,
                entry = diagnostic.entry,
                "table of contents problem: {}",
                diagnostic.error
            );
        }

        let counts = normalize_word_counts(&payload);
        let paths = self.store.write(&outcome.toc, &counts)?;

        Ok(UpdateSummary {
            volumes: outcome.toc.volumes.len(),
            books: outcome.toc.books.len(),
            chapters: outcome.toc.chapters.len(),
            word_count_entries: counts.len(),
            total_words: total_words(&counts),
            diagnostics: outcome.diagnostics,
            paths,
        })
    }
}
