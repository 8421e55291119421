use std::fmt;

use anyhow::Result;
use tracing::{info, instrument};

use crate::{
    fetch::fetch_playlist,
    playlist::{Entry, FilterRules, Playlist, SeenNames, Section, parse_blocks},
    sources::Source,
};

/// A fetched source after parsing and filtering, waiting for deduplication
#[derive(Debug, Clone)]
pub struct FilteredSource {
    pub label: String,
    pub summary_label: String,
    pub parsed: usize,
    pub filtered: usize,
    pub entries: Vec<Entry>,
}

/// Parses one source's text and applies the filter rules
#[must_use]
pub fn filter_source(source: &Source, text: &str, rules: &FilterRules) -> FilteredSource {
    let entries = parse_blocks(text).collect::<Vec<_>>();
    let parsed = entries.len();
    let (entries, filtered) = rules.apply(entries);

    FilteredSource {
        label: source.label.clone(),
        summary_label: source.summary_label().to_string(),
        parsed,
        filtered,
        entries,
    }
}

/// Fetches, parses and filters every source in order. The first failing fetch aborts.
///
/// # Errors
/// Errors with the first source that could not be retrieved
#[instrument(skip_all, fields(sources = sources.len()))]
pub async fn collect(
    client: &reqwest::Client,
    sources: &[Source],
    rules: &FilterRules,
) -> Result<Vec<FilteredSource>> {
    let mut collected = Vec::with_capacity(sources.len());

    for source in sources {
        info!("Fetching {} from {}", source.label, source.url);
        let text = fetch_playlist(client, source).await?;

        let filtered = filter_source(source, &text, rules);
        info!(
            "{}: {} entries, {} filtered out",
            source.label, filtered.parsed, filtered.filtered
        );
        collected.push(filtered);
    }

    Ok(collected)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceCounts {
    pub parsed: usize,
    pub kept: usize,
    pub filtered: usize,
    pub duplicates: usize,
}

/// Per-source counts of a merge, in source order, keyed by summary label
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub sources: Vec<(String, SourceCounts)>,
}

impl SyncReport {
    #[must_use]
    pub fn total_kept(&self) -> usize {
        self.sources.iter().map(|(_, c)| c.kept).sum()
    }

    fn list(&self, part: impl Fn(&str, &SourceCounts) -> String) -> String {
        self.sources
            .iter()
            .map(|(label, counts)| part(label, counts))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `(live: 10, Backup: 2; skipped fetch: live 1, Backup 0; skipped dup: live 0, Backup 3)`
impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}; skipped fetch: {}; skipped dup: {})",
            self.list(|l, c| format!("{l}: {}", c.kept)),
            self.list(|l, c| format!("{l} {}", c.filtered)),
            self.list(|l, c| format!("{l} {}", c.duplicates)),
        )
    }
}

/// Deduplicates across sources in priority order and assembles the output document
#[must_use]
pub fn merge(sources: Vec<FilteredSource>) -> (Playlist, SyncReport) {
    let mut seen = SeenNames::new();
    let mut playlist = Playlist::default();
    let mut report = SyncReport::default();

    for source in sources {
        let (entries, duplicates) = seen.dedupe(source.entries);

        report.sources.push((
            source.summary_label,
            SourceCounts {
                parsed: source.parsed,
                kept: entries.len(),
                filtered: source.filtered,
                duplicates,
            },
        ));
        playlist.sections.push(Section {
            label: source.label,
            entries,
        });
    }
    info!("{} unique channels across all sources", seen.len());

    (playlist, report)
}
