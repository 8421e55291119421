use chrono::{DateTime, SecondsFormat, Utc};

use super::entry::Entry;

pub const PLAYLIST_HEADER: &str = "#EXTM3U";

/// Surviving entries of one source, rendered under `# === {label} ===`
#[derive(Debug, Clone)]
pub struct Section {
    pub label: String,
    pub entries: Vec<Entry>,
}

/// The merged output document. Sections keep source priority order.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    pub sections: Vec<Section>,
}

impl Playlist {
    #[cfg(test)]
    pub(crate) fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    fn lines(&self, synced_at: Option<DateTime<Utc>>) -> Vec<String> {
        let mut out = vec![PLAYLIST_HEADER.to_string()];
        if let Some(ts) = synced_at {
            out.push(format!(
                "# Last synced: {}",
                ts.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
        out.push(String::new());

        for section in &self.sections {
            out.push(format!("# === {} ===", section.label));
            for entry in &section.entries {
                out.extend(entry.lines().iter().cloned());
                out.push(String::new());
            }
        }

        out
    }

    /// Number of lines [`Playlist::render`] produces
    #[must_use]
    pub fn line_count(&self, synced_at: Option<DateTime<Utc>>) -> usize {
        self.lines(synced_at).len()
    }

    /// Serialises the playlist. The result always ends with exactly one newline.
    #[must_use]
    pub fn render(&self, synced_at: Option<DateTime<Utc>>) -> String {
        let mut text = self.lines(synced_at).join("\n");
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text
    }
}
