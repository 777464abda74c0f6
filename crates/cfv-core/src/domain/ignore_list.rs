//! Text form of the ignored-extensions list.
//!
//! The settings panel edits the list as a single comma-separated text area.
//! Every change event re-parses the whole text; there is no incremental edit.

/// Separator used when rendering the list back into the text area.
const DISPLAY_SEPARATOR: &str = ", ";

/// Parses comma-separated text into the stored list form.
///
/// Entries are trimmed and lower-cased; empty entries are dropped.  Order is
/// preserved and duplicates are kept as typed.
///
/// # Example
///
/// ```rust
/// use cfv_core::parse_ignored_extensions;
///
/// assert_eq!(parse_ignored_extensions("md, PDF , ,txt"), vec!["md", "pdf", "txt"]);
/// ```
pub fn parse_ignored_extensions(text: &str) -> Vec<String> {
    text.split(',')
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Renders the stored list as the text-area value.
pub fn format_ignored_extensions<S: AsRef<str>>(extensions: &[S]) -> String {
    extensions
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(DISPLAY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_lowercases_and_drops_empty_entries() {
        // Arrange
        let text = "md, PDF , ,txt";

        // Act
        let list = parse_ignored_extensions(text);

        // Assert
        assert_eq!(list, vec!["md", "pdf", "txt"]);
    }

    #[test]
    fn test_parse_empty_text_yields_empty_list() {
        assert!(parse_ignored_extensions("").is_empty());
        assert!(parse_ignored_extensions(" , ,, ").is_empty());
    }

    #[test]
    fn test_parse_keeps_order_of_entries() {
        assert_eq!(parse_ignored_extensions("webm,Canvas,md"), vec!["webm", "canvas", "md"]);
    }

    #[test]
    fn test_format_joins_with_comma_space() {
        assert_eq!(format_ignored_extensions(&["md", "pdf"]), "md, pdf");
    }

    #[test]
    fn test_format_empty_list_is_empty_text() {
        let empty: [&str; 0] = [];
        assert_eq!(format_ignored_extensions(&empty), "");
    }

    #[test]
    fn test_formatted_text_parses_back_to_same_list() {
        let list = vec!["md".to_string(), "canvas".to_string()];
        assert_eq!(parse_ignored_extensions(&format_ignored_extensions(&list)), list);
    }
}
