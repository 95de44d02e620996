//! Request validation
//!
//! All checks are pure: they read filesystem metadata but never create or
//! modify anything.

use crate::error::{Error, Result};
use std::path::Path;

/// Confirm that `path` names an existing directory
///
/// Fails with [`Error::InvalidInput`] when the path is empty, is not valid
/// UTF-8, does not exist, or is not a directory.
///
/// # Examples
///
/// ```
/// use imgfetch::validation::validate_path;
/// use std::path::Path;
///
/// assert!(validate_path(&std::env::temp_dir()).is_ok());
/// assert!(validate_path(Path::new("")).is_err());
/// ```
pub fn validate_path(path: &Path) -> Result<()> {
    let Some(text) = path.to_str() else {
        return Err(Error::invalid_input(
            "path",
            format!("'{}' is not valid UTF-8", path.display()),
        ));
    };

    if text.is_empty() {
        return Err(Error::invalid_input("path", "must be a non-empty string"));
    }

    if !path.exists() {
        return Err(Error::invalid_input(
            "path",
            format!("'{}' does not exist", text),
        ));
    }

    if !path.is_dir() {
        return Err(Error::invalid_input(
            "path",
            format!("'{}' is not a directory", text),
        ));
    }

    Ok(())
}

/// Confirm that `url` is a non-empty absolute http(s) URL
pub fn validate_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::invalid_input("url", "must be a non-empty string"));
    }

    let parsed = url::Url::parse(url)
        .map_err(|e| Error::invalid_input("url", format!("'{}' is not a valid URL: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::invalid_input(
            "url",
            format!("unsupported scheme '{}' (expected http or https)", other),
        )),
    }
}

/// Confirm that at least one task was requested
pub fn validate_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(Error::invalid_input("count", "must be greater than 0"));
    }
    Ok(())
}
