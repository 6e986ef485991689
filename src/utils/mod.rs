pub mod settings;

/// Configuration constants for the application
pub mod config {
    /// Minimum number of characters before a lookup is issued
    pub const MIN_TERM_LENGTH: usize = 2;

    /// Default suggestion endpoint
    pub const DEFAULT_SUGGEST_URL: &str = "http://127.0.0.1:8080/autocomplete/birds.json";

    /// Query parameter carrying the typed term
    pub const TERM_QUERY_PARAM: &str = "term";

    /// Default location of the bird images
    pub const DEFAULT_IMAGE_BASE: &str = "/birds/img";

    /// Extension appended to every derived image filename
    pub const IMAGE_EXTENSION: &str = ".png";

    /// Directory (under the platform config dir) holding the settings file
    pub const SETTINGS_DIR: &str = "birdsearch";

    /// Settings file name
    pub const SETTINGS_FILE: &str = "settings.toml";

    /// Environment variable overriding the suggestion endpoint
    pub const SUGGEST_URL_ENV: &str = "BIRDSEARCH_SUGGEST_URL";

    /// Environment variable overriding the image base
    pub const IMAGE_BASE_ENV: &str = "BIRDSEARCH_IMAGE_BASE";

    /// Replacement for runs of whitespace in derived filenames
    pub const FILENAME_SPACE_REPLACEMENT: char = '_';

    /// Characters dropped from derived filenames
    pub const FILENAME_DROPPED_CHARS: &[char] = &['-'];

    /// Markup shown when there is nothing to display
    pub const NO_IMAGE_PLACEHOLDER: &str = "<p>No image available.</p>";
}

/// Utility functions for turning labels into markup-safe text and file names
pub mod text_utils {
    use super::config::*;

    /// Derive the image filename for a label.
    ///
    /// The label is lowercased, every run of whitespace becomes a single `_`,
    /// hyphens are removed and `.png` is appended.
    pub fn derive_filename(label: &str) -> String {
        let mut filename = String::with_capacity(label.len() + IMAGE_EXTENSION.len());
        let mut in_whitespace = false;

        for c in label.to_lowercase().chars() {
            if c.is_whitespace() {
                if !in_whitespace {
                    filename.push(FILENAME_SPACE_REPLACEMENT);
                }
                in_whitespace = true;
                continue;
            }
            in_whitespace = false;
            if !FILENAME_DROPPED_CHARS.contains(&c) {
                filename.push(c);
            }
        }

        filename.push_str(IMAGE_EXTENSION);
        filename
    }

    /// Escape text for use inside HTML element content or a quoted attribute
    pub fn escape_html(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '"' => escaped.push_str("&quot;"),
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(c),
            }
        }
        escaped
    }

    /// Length of a term in UTF-16 code units, the unit a browser input reports
    pub fn term_length(term: &str) -> usize {
        term.encode_utf16().count()
    }
}
