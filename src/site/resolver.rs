use std::path::{Path, PathBuf};

/// File served when a request names a directory.
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// Maps a request target onto a file under the site root.
///
/// The query string is dropped and the remaining path is joined onto
/// `root`. If the result is an existing directory, the default document is
/// appended. The final path is not checked for existence here, nor for
/// escaping the root; the file server does both before reading.
pub async fn resolve(root: &Path, target: &str) -> PathBuf {
    let mut path = join(root, target);

    let is_dir = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    if is_dir {
        path.push(DEFAULT_DOCUMENT);
    }

    path
}

/// Concatenates the site root and the request path, without touching disk.
pub fn join(root: &Path, target: &str) -> PathBuf {
    let path = target.split('?').next().unwrap_or_default();
    root.join(path.trim_start_matches('/'))
}
