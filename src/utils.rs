//! Utility functions for file operations

use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Suffix of in-progress temp files
const TEMP_SUFFIX: &str = "part";

/// Hidden temp path next to `path`, e.g. `/out/.sync_1.jpg.part`
///
/// The temp file lives in the same directory as the destination so the final
/// rename never crosses a filesystem boundary.
///
/// # Examples
///
/// ```
/// use imgfetch::utils::temp_path_for;
/// use std::path::{Path, PathBuf};
///
/// let temp = temp_path_for(Path::new("/tmp/out/sync_1.jpg")).unwrap();
/// assert_eq!(temp, PathBuf::from("/tmp/out/.sync_1.jpg.part"));
/// ```
pub fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' has no file name", path.display()),
        )
    })?;

    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".");
    temp_name.push(TEMP_SUFFIX);

    Ok(path.with_file_name(temp_name))
}

/// Write `contents` to `path` so that readers see either the old file or the
/// complete new one
///
/// The data goes to a temp file first, is flushed to disk, and is then renamed
/// over `path`, replacing any existing file. On failure the temp file is
/// removed and `path` is left untouched.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let temp = temp_path_for(path)?;

    let result = write_then_rename(&temp, path, contents).await;

    if result.is_err() {
        match tokio::fs::remove_file(&temp).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %temp.display(), error = %e, "Failed to remove temp file");
            }
        }
    }

    result
}

async fn write_then_rename(temp: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = tokio::fs::File::create(temp).await?;
    file.write_all(contents).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(temp, path).await
}
