use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result, bail, ensure};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A remote playlist and the section label it is written under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub label: String,
    pub url: String,
    /// Shorter name used in the summary line, defaults to `label`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_label: Option<String>,
}

impl Source {
    #[must_use]
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            summary_label: None,
        }
    }

    #[must_use]
    pub fn summary_label(&self) -> &str {
        self.summary_label.as_deref().unwrap_or(&self.label)
    }
}

const BUILTIN_SOURCES: &[(&str, &str)] = &[
    (
        "live",
        "https://raw.githubusercontent.com/BuddyChewChew/My-Streams/refs/heads/main/tv.m3u",
    ),
    (
        "Backup",
        "https://raw.githubusercontent.com/BuddyChewChew/My-Streams/refs/heads/main/Backup.m3u",
    ),
    (
        "TheTVApp",
        "https://raw.githubusercontent.com/BuddyChewChew/My-Streams/refs/heads/main/TheTVApp.m3u8",
    ),
    (
        "Xumo",
        "https://raw.githubusercontent.com/BuddyChewChew/xumo-playlist-generator/refs/heads/main/playlists/xumo_playlist.m3u",
    ),
    ("LocalNow", "https://www.apsattv.com/localnow.m3u"),
    (
        "Tubi",
        "https://raw.githubusercontent.com/BuddyChewChew/app-m3u-generator/main/playlists/tubi_all.m3u",
    ),
    (
        "Roku",
        "https://raw.githubusercontent.com/BuddyChewChew/app-m3u-generator/main/playlists/roku_all.m3u",
    ),
    (
        "Pluto TV",
        "https://raw.githubusercontent.com/BuddyChewChew/app-m3u-generator/main/playlists/plutotv_us.m3u",
    ),
    (
        "Plex",
        "https://raw.githubusercontent.com/BuddyChewChew/app-m3u-generator/main/playlists/plex_us.m3u",
    ),
];

/// Built-in sources reported under a shorter name
const SUMMARY_LABELS: &[(&str, &str)] = &[("Pluto TV", "Pluto")];

/// Built-in sources, highest priority first
#[must_use]
pub fn builtin_sources() -> Vec<Source> {
    BUILTIN_SOURCES
        .iter()
        .map(|(label, url)| {
            let mut source = Source::new(*label, *url);
            source.summary_label = SUMMARY_LABELS
                .iter()
                .find(|(full, _)| full == label)
                .map(|(_, short)| (*short).to_string());
            source
        })
        .collect()
}

/// Reads a JSON array of `{ "label": ..., "url": ... }` objects
///
/// # Errors
/// Errors when the file cannot be read, is not valid JSON or fails [`validate`]
#[instrument]
pub async fn load_sources(path: &Path) -> Result<Vec<Source>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Reading source list {}", path.display()))?;
    let sources = serde_json::from_str::<Vec<Source>>(&raw)
        .with_context(|| format!("Parsing source list {}", path.display()))?;

    validate(&sources)?;
    Ok(sources)
}

/// Checks that a source list is usable: non-empty, unique non-blank labels, http(s) URLs
///
/// # Errors
/// Errors describing the first offending source
pub fn validate(sources: &[Source]) -> Result<()> {
    ensure!(!sources.is_empty(), "Source list is empty");

    let mut labels = HashSet::new();
    for source in sources {
        ensure!(
            !source.label.trim().is_empty(),
            "Source {} has a blank label",
            source.url
        );
        ensure!(
            labels.insert(source.label.as_str()),
            "Duplicate source label `{}`",
            source.label
        );

        let url = Url::parse(&source.url)
            .with_context(|| format!("Invalid URL for source `{}`", source.label))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "Source `{}` must use http or https, got `{}`",
                source.label,
                url.scheme()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn source(label: &str, url: &str) -> Source {
        Source::new(label, url)
    }

    #[test]
    fn builtin_sources_are_valid_and_ordered() {
        let sources = builtin_sources();
        validate(&sources).unwrap();

        let labels = sources.iter().map(|s| s.label.as_str()).collect::<Vec<_>>();
        assert_eq!(
            labels,
            [
                "live", "Backup", "TheTVApp", "Xumo", "LocalNow", "Tubi", "Roku", "Pluto TV",
                "Plex"
            ]
        );
    }

    #[test]
    fn summary_label_falls_back_to_label() {
        let sources = builtin_sources();
        let pluto = sources.iter().find(|s| s.label == "Pluto TV").unwrap();
        assert_eq!(pluto.summary_label(), "Pluto");
        assert_eq!(sources[0].summary_label(), "live");
    }

    #[test]
    fn rejects_empty_list() {
        assert!(validate(&[]).is_err());
    }

    #[test]
    fn rejects_duplicate_labels() {
        let err = validate(&[
            source("live", "https://a.example.com/a.m3u"),
            source("live", "https://b.example.com/b.m3u"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate source label"));
    }

    #[test]
    fn rejects_blank_label_and_non_http_url() {
        assert!(validate(&[source("  ", "https://a.example.com/a.m3u")]).is_err());
        assert!(validate(&[source("ftp", "ftp://a.example.com/a.m3u")]).is_err());
        assert!(validate(&[source("bad", "not a url")]).is_err());
    }

    #[tokio::test]
    async fn loads_sources_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"label": "Mine", "url": "https://example.com/mine.m3u"}},
                {{"label": "Theirs", "url": "http://example.com/theirs.m3u", "summary_label": "T"}}]"#
        )
        .unwrap();

        let sources = load_sources(file.path()).await.unwrap();
        assert_eq!(
            sources,
            [
                source("Mine", "https://example.com/mine.m3u"),
                Source {
                    summary_label: Some("T".to_string()),
                    ..source("Theirs", "http://example.com/theirs.m3u")
                }
            ]
        );
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(load_sources(file.path()).await.is_err());
    }
}
