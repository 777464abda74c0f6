//! File-extension extraction.
//!
//! Vault paths arrive from the host as `/`-separated strings relative to the
//! vault root (e.g. `notes/script.py`).  Only the final path component is
//! inspected, so a dot inside a folder name (`archive.2024/readme`) never
//! produces an extension.

/// Returns the extension of `path`: the text after the final `.` of the last
/// path component, with its original case.
///
/// Leading dots of the file name are skipped, so dot-files such as
/// `.gitignore` have no extension.  Returns `None` when there is no dot or
/// the text after it is empty (`notes/draft.`).
///
/// # Example
///
/// ```rust
/// use cfv_core::extension_of;
///
/// assert_eq!(extension_of("notes/Script.PY"), Some("PY"));
/// assert_eq!(extension_of("notes/Makefile"), None);
/// ```
pub fn extension_of(path: &str) -> Option<&str> {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem_and_ext = file_name.trim_start_matches('.');
    let (_, ext) = stem_and_ext.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
