//! Writing the chapter index and word-count map.
//!
//! Both documents are written or neither is: each is staged in a temporary
//! sibling file and the two are only renamed into place once both staged
//! writes succeeded.

use crate::config::OutputConfig;
use crate::error::StoreError;
use crate::toc::TocResult;
use crate::utils::staging_path;
use crate::wordcount::WordCountMap;
use std::path::{Path, PathBuf};

/// Where the two documents ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub chapters: PathBuf,
    pub word_counts: PathBuf,
}

/// Output location for one run.
#[derive(Debug, Clone)]
pub struct OutputStore {
    directory: PathBuf,
    paths: OutputPaths,
}

impl OutputStore {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            paths: OutputPaths {
                chapters: config.chapters_path(),
                word_counts: config.word_count_path(),
            },
        }
    }

    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    /// Serializes both documents and replaces the output files.
    pub fn write(&self, toc: &TocResult, counts: &WordCountMap) -> Result<OutputPaths, StoreError> {
        let chapters = serde_json::to_string_pretty(toc).map_err(|source| StoreError::Serialize {
            what: "chapters",
            source,
        })?;
        let word_counts =
            serde_json::to_string_pretty(counts).map_err(|source| StoreError::Serialize {
                what: "word counts",
                source,
            })?;

        std::fs::create_dir_all(&self.directory).map_err(|source| StoreError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let staged = [
            (staging_path(&self.paths.chapters), &self.paths.chapters, chapters),
            (
                staging_path(&self.paths.word_counts),
                &self.paths.word_counts,
                word_counts,
            ),
        ];

        for (tmp, _, content) in &staged {
            if let Err(source) = std::fs::write(tmp, content) {
                remove_staged(&staged);
                return Err(StoreError::Io {
                    path: tmp.clone(),
                    source,
                });
            }
        }

        for (tmp, path, _) in &staged {
            if let Err(source) = std::fs::rename(tmp, path) {
                remove_staged(&staged);
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        Ok(self.paths.clone())
    }
}

fn remove_staged(staged: &[(PathBuf, &PathBuf, String)]) {
    for (tmp, _, _) in staged {
        let _ = remove_if_present(tmp);
    }
}

fn remove_if_present(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
