//! MIME type detection based on file extensions.

use std::path::Path;

/// Content type used when the extension is unknown or missing.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Resolves the `Content-Type` for a file from its extension.
///
/// The lookup table is compiled in, so the answer never depends on the host
/// platform. Unknown extensions get `application/octet-stream`.
pub fn content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string()
}
