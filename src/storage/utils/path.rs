// Path helper utilities shared across storage operations
use std::path::Path;

/// Extract the final filename component of a local path, stripping directories.
/// Falls back to the trimmed input for paths without a filename component.
pub fn blob_name_for(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().trim_matches('/').to_string())
}
