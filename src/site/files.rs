//! Static file loading
//!
//! Reads a resolved file from disk after confirming it lives under the
//! site root.

use std::io::ErrorKind;
use std::path::Path;

use bytes::Bytes;

use crate::error::RequestError;
use crate::http::mime;

/// A file read from a site, ready to be sent.
#[derive(Debug, Clone)]
pub struct StaticFile {
    pub content: Bytes,

    pub content_type: String,
}

/// Loads the file at `resolved`, which must lie under `root`.
///
/// Missing files, directories, names the filesystem cannot hold, and paths
/// that leave the root (through `..` or a symlink) are `NotFound`. Every
/// other I/O failure is `Io`.
pub async fn load(root: &Path, resolved: &Path) -> Result<StaticFile, RequestError> {
    let root = tokio::fs::canonicalize(root).await?;

    let path = match tokio::fs::canonicalize(resolved).await {
        Ok(path) => path,
        Err(e) if is_missing(&e) => return Err(RequestError::NotFound(resolved.to_path_buf())),
        Err(e) => return Err(e.into()),
    };

    if !path.starts_with(&root) {
        tracing::warn!(
            root = %root.display(),
            path = %path.display(),
            "Refusing path outside site root"
        );
        return Err(RequestError::NotFound(resolved.to_path_buf()));
    }

    let metadata = tokio::fs::metadata(&path).await?;
    if !metadata.is_file() {
        return Err(RequestError::NotFound(resolved.to_path_buf()));
    }

    let content = match tokio::fs::read(&path).await {
        Ok(content) => Bytes::from(content),
        Err(e) if is_missing(&e) => return Err(RequestError::NotFound(resolved.to_path_buf())),
        Err(e) => return Err(e.into()),
    };

    let content_type = mime::content_type(&path);

    Ok(StaticFile {
        content,
        content_type,
    })
}

// A name too long or otherwise unusable on this filesystem cannot exist.
fn is_missing(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::NotFound
            | ErrorKind::NotADirectory
            | ErrorKind::InvalidFilename
            | ErrorKind::InvalidInput
    )
}
