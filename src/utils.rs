//! Utility functions for common operations.

use crate::error::FetchError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Checks if an HTTP response is successful, and if not, returns a status error.
///
/// # Arguments
/// * `url` - The URL the response came from, for the error message
/// * `response` - The reqwest Response to check
pub fn check_response_status(
    url: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

/// Returns the temporary sibling a file is staged in before it is renamed
/// into place (`chapters.json` -> `chapters.json.tmp`).
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
