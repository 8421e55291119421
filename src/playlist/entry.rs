/// A single playlist item: the `#EXTINF` metadata line, any auxiliary lines and
/// (usually) the stream URL, kept verbatim so it can be written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    display_name: String,
    lines: Vec<String>,
}

impl Entry {
    pub(crate) fn new(lines: Vec<String>) -> Self {
        let display_name = lines
            .first()
            .map(|l| display_name_of(l))
            .unwrap_or_default()
            .to_string();

        Self {
            display_name,
            lines,
        }
    }

    /// Channel name as shown to the viewer, i.e. the text after the last comma
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Lowercased display name, the identity used for deduplication
    #[must_use]
    pub fn key(&self) -> String {
        self.display_name.to_lowercase()
    }

    /// The metadata (`#EXTINF`) line
    #[must_use]
    pub fn metadata(&self) -> &str {
        self.lines.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines of the entry joined by newlines
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Extracts the display name from a metadata line.
///
/// Uses the *last* comma so that attribute values containing commas don't leak
/// into the name. A line without any comma yields an empty name.
#[must_use]
pub fn display_name_of(metadata: &str) -> &str {
    metadata
        .rfind(',')
        .map_or("", |idx| metadata[idx + 1..].trim())
}
