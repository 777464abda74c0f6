//! File-explorer click infrastructure.
//!
//! The host renders its file explorer as an element tree and delivers every
//! click through a single document-level signal.  A file entry looks like:
//!
//! ```text
//! div.nav-file
//!  └─ div.nav-file-title   data-path="notes/script.py"
//!      └─ div.nav-file-title-content   ← usually the click target
//! ```
//!
//! This module models just enough of that structure to identify a clicked
//! file: an owned [`Element`] snapshot, the [`ClickEvent`] carrying the
//! target's ancestor chain, and [`resolve_file_path`] which performs the
//! "closest file item, then its title's path attribute" lookup.
//!
//! # Testability
//!
//! [`ClickDispatcher`] stands in for the host's document click signal, so
//! tests and the command-line host can dispatch synthetic clicks through the
//! same listener path the real host uses.

use std::collections::BTreeMap;

pub mod dispatcher;

pub use dispatcher::{ClickDispatcher, ClickListener, ListenerId, ListenerPhase};

/// Class carried by every file entry container in the explorer.
pub const NAV_FILE_CLASS: &str = "nav-file";
/// Class of the title element inside a file entry.
pub const NAV_FILE_TITLE_CLASS: &str = "nav-file-title";
/// Class of the text element inside a file title.
pub const NAV_FILE_TITLE_CONTENT_CLASS: &str = "nav-file-title-content";
/// Attribute holding the vault-relative path on the title element.
pub const DATA_PATH_ATTR: &str = "data-path";

/// Owned snapshot of one element of the host's explorer tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an element with no classes, attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// First descendant (depth-first, document order, excluding `self`)
    /// carrying `class`.
    pub fn find_descendant(&self, class: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| {
            if child.has_class(class) {
                Some(child)
            } else {
                child.find_descendant(class)
            }
        })
    }
}

/// A click delivered by the document-level click signal.
///
/// `ancestry` holds the clicked element first, then each ancestor up to the
/// outermost element the host reported.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    ancestry: Vec<Element>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ClickEvent {
    /// Creates an event from the target's ancestor chain, innermost first.
    pub fn new(ancestry: Vec<Element>) -> Self {
        Self {
            ancestry,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Builds the event produced by clicking the name of the explorer entry
    /// for `relative_path`.
    pub fn on_explorer_file(relative_path: &str) -> Self {
        let content = Element::new("div").with_class(NAV_FILE_TITLE_CONTENT_CLASS);
        let title = Element::new("div")
            .with_class(NAV_FILE_TITLE_CLASS)
            .with_attr(DATA_PATH_ATTR, relative_path)
            .with_child(content.clone());
        let item = Element::new("div")
            .with_class(NAV_FILE_CLASS)
            .with_child(title.clone());
        Self::new(vec![content, title, item])
    }

    /// The clicked element, if the host reported one.
    pub fn target(&self) -> Option<&Element> {
        self.ancestry.first()
    }

    /// The nearest element (the target itself included) carrying `class`.
    pub fn closest(&self, class: &str) -> Option<&Element> {
        self.ancestry.iter().find(|el| el.has_class(class))
    }

    /// Cancels the host's default action for this click.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stops delivery of this click to any further listener.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Resolves a click to the vault-relative path of the file entry it hit.
///
/// Returns `None` when the click was not inside a file entry or the entry's
/// title carries no path attribute.
pub fn resolve_file_path(event: &ClickEvent) -> Option<String> {
    event
        .closest(NAV_FILE_CLASS)?
        .find_descendant(NAV_FILE_TITLE_CLASS)?
        .attr(DATA_PATH_ATTR)
        .map(str::to_owned)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
