//! SettingsPanel: the plugin's settings form.
//!
//! The panel is a plain render-on-every-edit form bound to the
//! [`SettingsStore`].  [`SettingsPanel::render`] builds a [`SettingsView`]
//! (a flat list of widgets the host draws however it likes), and each edit
//! method applies one field change to the store and persists the whole
//! settings object.
//!
//! # Row addressing
//!
//! Mapping rows are addressed by their index in the most recent render.  The
//! panel remembers, per row, the key currently committed to the store and the
//! last path typed into the row.  A rename therefore moves the mapping away
//! from whatever key the row holds *now*, and a path edit after a rename
//! writes under the new key.
//!
//! A row whose extension was cleared holds no key at all.  It never touches
//! the unnamed `""` entry, which belongs to the row added by "Add Mapping".
//!
//! Adding or removing a row re-renders the whole list; renames and path edits
//! do not, so row indices stay stable while the user types.

use std::fmt;
use std::sync::Arc;

use cfv_core::{format_ignored_extensions, parse_ignored_extensions};
use thiserror::Error;
use tracing::debug;

use crate::application::settings_store::SettingsStore;
use crate::infrastructure::storage::StorageError;

const TITLE: &str = "Custom File Viewer Settings";
const DEFAULT_APP_NAME: &str = "Default Application Path";
const DEFAULT_APP_DESCRIPTION: &str =
    "Path to the default app for opening files (used if no mapping found).";
const MAPPING_HEADING: &str = "Extension to Application Mapping";
const ADD_MAPPING_LABEL: &str = "Add Mapping";
const IGNORED_HEADING: &str = "Ignored Extensions";
const IGNORED_DESCRIPTION: &str =
    "Comma-separated list of extensions that Obsidian will handle itself.";
const IGNORED_TEXT_ROWS: u16 = 3;

#[cfg(target_os = "windows")]
const DEFAULT_APP_PLACEHOLDER: &str = "C:\\Program Files\\...\\App.exe";
#[cfg(not(target_os = "windows"))]
const DEFAULT_APP_PLACEHOLDER: &str = "/usr/bin/app";

/// Errors returned by panel edits.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("no mapping row {row} (the panel shows {rows} rows)")]
    UnknownRow { row: usize, rows: usize },

    #[error("failed to save settings: {0}")]
    Storage(#[from] StorageError),
}

/// Text fields outside the mapping list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DefaultApp,
    IgnoredExtensions,
}

/// Buttons outside the mapping rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    AddMapping,
}

/// One element of the rendered form, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Heading(String),
    TextInput {
        field: Field,
        name: String,
        description: String,
        placeholder: String,
        value: String,
    },
    /// Extension input, path input and a Remove button.
    MappingRow {
        row: usize,
        extension: String,
        app_path: String,
    },
    Button {
        action: ButtonAction,
        label: String,
    },
    TextArea {
        field: Field,
        description: String,
        value: String,
        rows: u16,
    },
}

/// A rendered settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub widgets: Vec<Widget>,
}

impl SettingsView {
    /// The mapping rows as `(row, extension, app_path)`.
    pub fn mapping_rows(&self) -> impl Iterator<Item = (usize, &str, &str)> {
        self.widgets.iter().filter_map(|widget| match widget {
            Widget::MappingRow {
                row,
                extension,
                app_path,
            } => Some((*row, extension.as_str(), app_path.as_str())),
            _ => None,
        })
    }

    /// The current value of a text field, if the view contains it.
    pub fn field_value(&self, wanted: Field) -> Option<&str> {
        self.widgets.iter().find_map(|widget| match widget {
            Widget::TextInput { field, value, .. } | Widget::TextArea { field, value, .. }
                if *field == wanted =>
            {
                Some(value.as_str())
            }
            _ => None,
        })
    }
}

impl fmt::Display for SettingsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for widget in &self.widgets {
            match widget {
                Widget::Heading(text) => writeln!(f, "== {text} ==")?,
                Widget::TextInput {
                    name,
                    description,
                    placeholder,
                    value,
                    ..
                } => {
                    writeln!(f, "{name}: {}", display_or(value, placeholder))?;
                    writeln!(f, "    {description}")?;
                }
                Widget::MappingRow {
                    row,
                    extension,
                    app_path,
                } => writeln!(
                    f,
                    "  [{row}] {:<10} -> {}  [Remove]",
                    display_or(extension, "Extension (e.g. py)"),
                    display_or(app_path, "Path to app"),
                )?,
                Widget::Button { label, .. } => writeln!(f, "  [{label}]")?,
                Widget::TextArea {
                    description, value, ..
                } => {
                    writeln!(f, "{value}")?;
                    writeln!(f, "    {description}")?;
                }
            }
        }
        Ok(())
    }
}

fn display_or<'a>(value: &'a str, placeholder: &'a str) -> std::borrow::Cow<'a, str> {
    if value.is_empty() {
        format!("<{placeholder}>").into()
    } else {
        value.into()
    }
}

#[derive(Debug, Clone)]
struct RowState {
    /// Key this row owns in the map; `None` once its extension is cleared.
    key: Option<String>,
    app_path: String,
}

/// The settings form bound to a [`SettingsStore`].
pub struct SettingsPanel {
    store: Arc<SettingsStore>,
    rows: Vec<RowState>,
}

impl SettingsPanel {
    /// Creates a panel.  Call [`Self::render`] before addressing rows.
    pub fn new(store: Arc<SettingsStore>) -> Self {
        Self {
            store,
            rows: Vec::new(),
        }
    }

    /// Renders the current settings and resets the row table.
    pub fn render(&mut self) -> SettingsView {
        let settings = self.store.snapshot();

        self.rows = settings
            .app_map
            .iter()
            .map(|(key, app_path)| RowState {
                key: Some(key.clone()),
                app_path: app_path.clone(),
            })
            .collect();

        let mut widgets = vec![
            Widget::Heading(TITLE.to_string()),
            Widget::TextInput {
                field: Field::DefaultApp,
                name: DEFAULT_APP_NAME.to_string(),
                description: DEFAULT_APP_DESCRIPTION.to_string(),
                placeholder: DEFAULT_APP_PLACEHOLDER.to_string(),
                value: settings.default_app.clone(),
            },
            Widget::Heading(MAPPING_HEADING.to_string()),
        ];
        widgets.extend(self.rows.iter().enumerate().map(|(row, state)| Widget::MappingRow {
            row,
            extension: state.key.clone().unwrap_or_default(),
            app_path: state.app_path.clone(),
        }));
        widgets.push(Widget::Button {
            action: ButtonAction::AddMapping,
            label: ADD_MAPPING_LABEL.to_string(),
        });
        widgets.push(Widget::Heading(IGNORED_HEADING.to_string()));
        widgets.push(Widget::TextArea {
            field: Field::IgnoredExtensions,
            description: IGNORED_DESCRIPTION.to_string(),
            value: format_ignored_extensions(&settings.ignored_extensions),
            rows: IGNORED_TEXT_ROWS,
        });

        SettingsView { widgets }
    }

    /// Commits the default-application text.
    pub async fn set_default_app(&self, text: &str) -> Result<(), PanelError> {
        self.store.set_default_app(text).await?;
        Ok(())
    }

    /// Appends an empty mapping row, persists, and re-renders.
    pub async fn add_mapping(&mut self) -> Result<SettingsView, PanelError> {
        self.store.update(|settings| settings.add_empty_mapping()).await?;
        Ok(self.render())
    }

    /// Commits new extension text for `row`.
    ///
    /// The text is lower-cased.  The mapping moves from the row's current key
    /// to the new one, carrying the row's path.  Clearing the text removes the
    /// mapping until the row is named again.
    pub async fn rename_extension(&mut self, row: usize, text: &str) -> Result<(), PanelError> {
        let state = self.row(row)?.clone();
        let new_key = self.store.edit(|settings| match &state.key {
            Some(old_key) => {
                let key = settings.rename_mapping(old_key, text, &state.app_path);
                // Clearing the unnamed row keeps its "" entry.
                (!key.is_empty() || old_key.is_empty()).then_some(key)
            }
            None => settings
                .set_mapping_app(text, state.app_path.as_str())
                .then(|| text.to_lowercase()),
        });
        debug!(row, from = ?state.key, to = ?new_key, "mapping renamed");
        self.rows[row].key = new_key;
        self.store.save().await?;
        Ok(())
    }

    /// Commits new application-path text for `row`.
    ///
    /// A row without an extension only remembers the text; it is stored once
    /// the row is named.
    pub async fn set_app_path(&mut self, row: usize, path: &str) -> Result<(), PanelError> {
        let key = self.row(row)?.key.clone();
        self.rows[row].app_path = path.to_string();
        let Some(key) = key.filter(|key| !key.is_empty()) else {
            debug!(row, "path kept on unnamed row");
            return Ok(());
        };
        self.store
            .update(|settings| settings.set_mapping_app(&key, path))
            .await?;
        Ok(())
    }

    /// Removes the mapping held by `row`, persists, and re-renders.
    ///
    /// A row that holds no key is only dropped from the view.
    pub async fn remove_mapping(&mut self, row: usize) -> Result<SettingsView, PanelError> {
        if let Some(key) = self.row(row)?.key.clone() {
            self.store
                .update(|settings| settings.remove_mapping(&key))
                .await?;
        }
        Ok(self.render())
    }

    /// Commits the ignored-extensions text area.
    pub async fn set_ignored_text(&self, text: &str) -> Result<(), PanelError> {
        self.store
            .set_ignored_extensions(parse_ignored_extensions(text))
            .await?;
        Ok(())
    }

    fn row(&self, row: usize) -> Result<&RowState, PanelError> {
        self.rows.get(row).ok_or(PanelError::UnknownRow {
            row,
            rows: self.rows.len(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
