//! The plugin's persisted settings object.
//!
//! The host stores one opaque data object per plugin.  Ours has exactly three
//! top-level fields:
//!
//! ```json
//! {
//!   "appMap": { "py": "/usr/bin/code" },
//!   "defaultApp": "",
//!   "ignoredExtensions": ["md", "canvas", "pdf"]
//! }
//! ```
//!
//! # Shallow merge over defaults
//!
//! At load time every top-level field present in the stored object replaces
//! the corresponding default wholesale; absent fields keep their defaults.
//! [`PersistedSettings`] models "present or absent" with `Option` and
//! [`PersistedSettings::merged_over_defaults`] performs the merge.  Nested
//! values are never merged: a stored `appMap` replaces the default map, it is
//! not combined with it.
//!
//! # Key case
//!
//! Extension keys and ignore-list entries are lower case.  Edits lower-case
//! what the user types, and loading lower-cases what it finds so that a
//! hand-edited data file cannot break the invariant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Extensions the host keeps handling itself unless the user changes the list.
pub const DEFAULT_IGNORED_EXTENSIONS: [&str; 15] = [
    "md", "canvas", "pdf", "png", "jpg", "jpeg", "gif", "bmp", "svg", "webp", "mp4", "mov", "avi",
    "mkv", "webm",
];

/// The complete, in-memory settings object.
///
/// Serializes to the stored layout; reading goes through [`PersistedSettings`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewerSettings {
    /// Lower-case extension (no leading dot) → path of the program that opens it.
    pub app_map: BTreeMap<String, String>,
    /// Program used when an extension has no usable mapping.  Empty means unset.
    pub default_app: String,
    /// Lower-case extensions always left to the host.
    pub ignored_extensions: Vec<String>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            app_map: BTreeMap::new(),
            default_app: String::new(),
            ignored_extensions: DEFAULT_IGNORED_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
        }
    }
}

/// The stored data object as read back from the host, with every field optional.
///
/// A `null` field is treated the same as an absent one.  Unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSettings {
    #[serde(default)]
    pub app_map: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub default_app: Option<String>,
    #[serde(default)]
    pub ignored_extensions: Option<Vec<String>>,
}

impl PersistedSettings {
    /// Shallow-merges the stored fields over [`ViewerSettings::default`].
    pub fn merged_over_defaults(self) -> ViewerSettings {
        let defaults = ViewerSettings::default();
        ViewerSettings {
            app_map: self
                .app_map
                .map(lowercase_keys)
                .unwrap_or(defaults.app_map),
            default_app: self.default_app.unwrap_or(defaults.default_app),
            ignored_extensions: self
                .ignored_extensions
                .map(|list| list.into_iter().map(|ext| ext.to_lowercase()).collect())
                .unwrap_or(defaults.ignored_extensions),
        }
    }
}

fn lowercase_keys(map: BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut normalized = BTreeMap::new();
    for (ext, app) in map {
        let key = ext.to_lowercase();
        if let Some(previous) = normalized.insert(key.clone(), app) {
            debug!("stored mapping for '{key}' shadowed a case variant pointing at {previous}");
        }
    }
    normalized
}

impl ViewerSettings {
    /// Returns `true` if `extension` (already lower case) is left to the host.
    pub fn is_ignored(&self, extension: &str) -> bool {
        self.ignored_extensions.iter().any(|ext| ext == extension)
    }

    /// Resolves the program for `extension` (already lower case).
    ///
    /// A missing or empty mapping falls through to [`Self::default_app`]; an
    /// empty default yields `None`.
    pub fn application_for(&self, extension: &str) -> Option<&str> {
        self.app_map
            .get(extension)
            .map(String::as_str)
            .filter(|app| !app.is_empty())
            .or_else(|| Some(self.default_app.as_str()).filter(|app| !app.is_empty()))
    }

    /// Replaces the default application path.
    pub fn set_default_app(&mut self, path: impl Into<String>) {
        self.default_app = path.into();
    }

    /// Adds an unnamed mapping row (`"" → ""`).
    ///
    /// An existing unnamed entry is kept as is.  The empty key never matches a
    /// clicked file.
    pub fn add_empty_mapping(&mut self) {
        self.app_map.entry(String::new()).or_default();
    }

    /// Moves the mapping at `old_key` to the lower-cased `new_extension`,
    /// storing `app_path` under the new key.
    ///
    /// The old key is always removed when it differs from the new one.  An
    /// empty new key stores nothing; the row stays inert until it is named.
    /// Returns the key now committed for the row.
    pub fn rename_mapping(&mut self, old_key: &str, new_extension: &str, app_path: &str) -> String {
        let new_key = new_extension.to_lowercase();
        if old_key != new_key {
            self.app_map.remove(old_key);
        }
        if !new_key.is_empty() {
            self.app_map.insert(new_key.clone(), app_path.to_string());
        }
        new_key
    }

    /// Sets the program for `extension`.  Returns `false` (and changes
    /// nothing) when the extension is empty.
    pub fn set_mapping_app(&mut self, extension: &str, app_path: impl Into<String>) -> bool {
        let key = extension.to_lowercase();
        if key.is_empty() {
            return false;
        }
        self.app_map.insert(key, app_path.into());
        true
    }

    /// Removes the mapping for `extension`, returning its program path.
    pub fn remove_mapping(&mut self, extension: &str) -> Option<String> {
        self.app_map.remove(&extension.to_lowercase())
    }

    /// Replaces the ignore list.
    pub fn set_ignored_extensions(&mut self, extensions: Vec<String>) {
        self.ignored_extensions = extensions;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn persisted(json: &str) -> PersistedSettings {
        serde_json::from_str(json).expect("valid persisted settings")
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_settings_have_empty_map_and_default() {
        let settings = ViewerSettings::default();
        assert!(settings.app_map.is_empty());
        assert_eq!(settings.default_app, "");
    }

    #[test]
    fn test_default_ignore_list_is_seed_list() {
        let settings = ViewerSettings::default();
        assert_eq!(settings.ignored_extensions.len(), 15);
        assert!(settings.is_ignored("md"));
        assert!(settings.is_ignored("canvas"));
        assert!(settings.is_ignored("webm"));
        assert!(!settings.is_ignored("py"));
    }

    // ── Shallow merge ─────────────────────────────────────────────────────────

    #[test]
    fn test_empty_object_merges_to_defaults() {
        assert_eq!(persisted("{}").merged_over_defaults(), ViewerSettings::default());
    }

    #[test]
    fn test_present_field_replaces_default_wholesale() {
        // Arrange: the stored list is shorter than the seed list
        let stored = persisted(r#"{ "ignoredExtensions": ["md"] }"#);

        // Act
        let settings = stored.merged_over_defaults();

        // Assert
        assert_eq!(settings.ignored_extensions, vec!["md"]);
        assert!(settings.app_map.is_empty());
    }

    #[test]
    fn test_null_field_keeps_default() {
        let settings = persisted(r#"{ "defaultApp": null, "ignoredExtensions": null }"#)
            .merged_over_defaults();
        assert_eq!(settings.default_app, "");
        assert_eq!(settings.ignored_extensions.len(), DEFAULT_IGNORED_EXTENSIONS.len());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let settings = persisted(r#"{ "defaultApp": "/bin/ed", "theme": "dark" }"#)
            .merged_over_defaults();
        assert_eq!(settings.default_app, "/bin/ed");
    }

    #[test]
    fn test_merge_lowercases_stored_keys_and_ignore_entries() {
        // Arrange: a hand-edited file with upper-case entries
        let stored = persisted(r#"{ "appMap": { "PY": "/usr/bin/code" }, "ignoredExtensions": ["MD"] }"#);

        // Act
        let settings = stored.merged_over_defaults();

        // Assert
        assert_eq!(settings.app_map.get("py").map(String::as_str), Some("/usr/bin/code"));
        assert!(!settings.app_map.contains_key("PY"));
        assert_eq!(settings.ignored_extensions, vec!["md"]);
    }

    #[test]
    fn test_serialized_field_names_match_stored_layout() {
        let json = serde_json::to_value(ViewerSettings::default()).expect("serialize");
        let object = json.as_object().expect("object");
        assert!(object.contains_key("appMap"));
        assert!(object.contains_key("defaultApp"));
        assert!(object.contains_key("ignoredExtensions"));
        assert_eq!(object.len(), 3);
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    #[test]
    fn test_application_for_prefers_mapping() {
        let mut settings = ViewerSettings::default();
        settings.set_default_app("/usr/bin/xdg-open");
        settings.set_mapping_app("py", "/usr/bin/code");
        assert_eq!(settings.application_for("py"), Some("/usr/bin/code"));
    }

    #[test]
    fn test_application_for_empty_mapping_falls_through_to_default() {
        let mut settings = ViewerSettings::default();
        settings.set_default_app("/usr/bin/xdg-open");
        settings.set_mapping_app("py", "");
        assert_eq!(settings.application_for("py"), Some("/usr/bin/xdg-open"));
    }

    #[test]
    fn test_application_for_none_without_mapping_or_default() {
        let settings = ViewerSettings::default();
        assert_eq!(settings.application_for("csv"), None);
    }

    // ── Edits ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_add_empty_mapping_inserts_unnamed_row_once() {
        let mut settings = ViewerSettings::default();
        settings.add_empty_mapping();
        settings.add_empty_mapping();
        assert_eq!(settings.app_map.len(), 1);
        assert_eq!(settings.app_map.get("").map(String::as_str), Some(""));
    }

    #[test]
    fn test_rename_moves_value_to_new_lowercased_key() {
        // Arrange
        let mut settings = ViewerSettings::default();
        settings.set_mapping_app("py", "/usr/bin/code");

        // Act
        let key = settings.rename_mapping("py", "PYW", "/usr/bin/code");

        // Assert
        assert_eq!(key, "pyw");
        assert!(!settings.app_map.contains_key("py"));
        assert_eq!(settings.app_map.get("pyw").map(String::as_str), Some("/usr/bin/code"));
        assert_eq!(settings.app_map.len(), 1);
    }

    #[test]
    fn test_rename_to_same_key_updates_value_only() {
        let mut settings = ViewerSettings::default();
        settings.set_mapping_app("py", "/old");
        settings.rename_mapping("py", "Py", "/new");
        assert_eq!(settings.app_map.len(), 1);
        assert_eq!(settings.app_map.get("py").map(String::as_str), Some("/new"));
    }

    #[test]
    fn test_rename_to_empty_key_removes_mapping() {
        let mut settings = ViewerSettings::default();
        settings.set_mapping_app("py", "/usr/bin/code");
        let key = settings.rename_mapping("py", "", "/usr/bin/code");
        assert_eq!(key, "");
        assert!(settings.app_map.is_empty());
    }

    #[test]
    fn test_set_mapping_app_rejects_empty_extension() {
        let mut settings = ViewerSettings::default();
        assert!(!settings.set_mapping_app("", "/usr/bin/code"));
        assert!(settings.app_map.is_empty());
    }

    #[test]
    fn test_remove_mapping_is_case_insensitive() {
        let mut settings = ViewerSettings::default();
        settings.set_mapping_app("py", "/usr/bin/code");
        assert_eq!(settings.remove_mapping("PY").as_deref(), Some("/usr/bin/code"));
        assert!(settings.app_map.is_empty());
    }
}
