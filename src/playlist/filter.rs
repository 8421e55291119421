use std::{collections::HashSet, fmt};

use tracing::debug;

use super::entry::Entry;

/// Exclusion rules applied to every source before deduplication
#[derive(Debug, Clone)]
pub struct FilterRules {
    /// Names starting with this character are dropped (e.g. `[Regional] ...`)
    pub ignore_prefix: Option<char>,
    /// Exact lowercased names to drop
    pub ignore_names: HashSet<String>,
    /// Lowercase brand matched loosely against the name and the metadata line
    pub brand: Option<String>,
    /// Lowercase host fragment matched against the whole entry
    pub blocked_host: Option<String>,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            ignore_prefix: Some('['),
            ignore_names: ["fanduel", "bbc america sd", "bbc america hd", "bet hd"]
                .into_iter()
                .map(String::from)
                .collect(),
            brand: Some("fanduel".to_string()),
            blocked_host: Some("moveonjoy".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyName,
    IgnoredPrefix,
    IgnoredName,
    BrandInName,
    BrandInMetadata,
    BlockedHost,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyName => "empty name",
            Self::IgnoredPrefix => "ignored prefix",
            Self::IgnoredName => "ignored name",
            Self::BrandInName => "brand in name",
            Self::BrandInMetadata => "brand in metadata",
            Self::BlockedHost => "blocked host",
        })
    }
}

impl FilterRules {
    /// Returns why an entry should be dropped, or `None` to keep it.
    /// Rules are checked in order and the first match wins.
    #[must_use]
    pub fn check(&self, entry: &Entry) -> Option<SkipReason> {
        let name = entry.display_name();
        if name.is_empty() {
            return Some(SkipReason::EmptyName);
        }

        if self
            .ignore_prefix
            .is_some_and(|p| name.trim_start().starts_with(p))
        {
            return Some(SkipReason::IgnoredPrefix);
        }

        let lowered = name.to_lowercase();
        if self.ignore_names.contains(lowered.trim()) {
            return Some(SkipReason::IgnoredName);
        }

        if let Some(brand) = &self.brand {
            if lowered.contains(brand.as_str()) {
                return Some(SkipReason::BrandInName);
            }
            if entry.metadata().to_lowercase().contains(brand.as_str()) {
                return Some(SkipReason::BrandInMetadata);
            }
        }

        match &self.blocked_host {
            Some(host) if entry.text().to_lowercase().contains(host.as_str()) => {
                Some(SkipReason::BlockedHost)
            }
            _ => None,
        }
    }

    /// Keeps the entries passing every rule, in order.
    ///
    /// Returns: `(kept, dropped_count)`
    pub fn apply(&self, entries: impl IntoIterator<Item = Entry>) -> (Vec<Entry>, usize) {
        let mut kept = Vec::new();
        let mut dropped = 0;

        for entry in entries {
            if let Some(reason) = self.check(&entry) {
                debug!("Skipping {:?}: {reason}", entry.display_name());
                dropped += 1;
                continue;
            }
            kept.push(entry);
        }

        (kept, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(metadata: &str, url: &str) -> Entry {
        Entry::new(vec![metadata.to_string(), url.to_string()])
    }

    #[test]
    fn keeps_ordinary_channel() {
        let rules = FilterRules::default();
        assert_eq!(
            rules.check(&entry("#EXTINF:-1,Channel 7", "https://example.com/7")),
            None
        );
    }

    #[test]
    fn drops_empty_name() {
        let rules = FilterRules::default();
        assert_eq!(
            rules.check(&entry("#EXTINF:-1 tvg-id=\"x\"", "https://example.com/x")),
            Some(SkipReason::EmptyName)
        );
    }

    #[test]
    fn drops_bracketed_name() {
        let rules = FilterRules::default();
        assert_eq!(
            rules.check(&entry(
                "#EXTINF:-1,[Regional] Channel 7",
                "https://example.com/7"
            )),
            Some(SkipReason::IgnoredPrefix)
        );
    }

    #[test]
    fn drops_exact_ignored_name_case_insensitively() {
        let rules = FilterRules::default();
        assert_eq!(
            rules.check(&entry("#EXTINF:-1,BBC America HD", "https://example.com/b")),
            Some(SkipReason::IgnoredName)
        );
        assert_eq!(
            rules.check(&entry("#EXTINF:-1,BBC America", "https://example.com/b")),
            None
        );
    }

    #[test]
    fn drops_brand_in_name() {
        let rules = FilterRules::default();
        assert_eq!(
            rules.check(&entry(
                "#EXTINF:-1 tvg-id=\"FDSN\",FanDuel Network",
                "https://example.com/f"
            )),
            Some(SkipReason::BrandInName)
        );
    }

    #[test]
    fn drops_brand_in_metadata_only() {
        let rules = FilterRules::default();
        assert_eq!(
            rules.check(&entry(
                "#EXTINF:-1 tvg-id=\"FanDuel.TV.us\",Sports Network",
                "https://example.com/s"
            )),
            Some(SkipReason::BrandInMetadata)
        );
    }

    #[test]
    fn drops_blocked_host_anywhere_in_block() {
        let rules = FilterRules::default();
        assert_eq!(
            rules.check(&entry(
                "#EXTINF:-1,Good Channel",
                "http://fl1.MoveOnJoy.com/GOOD/index.m3u8"
            )),
            Some(SkipReason::BlockedHost)
        );
    }

    #[test]
    fn disabled_rules_do_not_apply() {
        let rules = FilterRules {
            ignore_prefix: None,
            ignore_names: HashSet::new(),
            brand: None,
            blocked_host: None,
        };
        assert_eq!(
            rules.check(&entry(
                "#EXTINF:-1,[FanDuel] x",
                "https://moveonjoy.com/x"
            )),
            None
        );
        assert_eq!(
            rules.check(&entry("#EXTINF:-1", "https://example.com")),
            Some(SkipReason::EmptyName)
        );
    }

    #[test]
    fn apply_counts_dropped_and_preserves_order() {
        let rules = FilterRules::default();
        let entries = vec![
            entry("#EXTINF:-1,B", "https://example.com/b"),
            entry("#EXTINF:-1,[X] y", "https://example.com/y"),
            entry("#EXTINF:-1,A", "https://example.com/a"),
            entry("#EXTINF:-1,BET HD", "https://example.com/bet"),
        ];

        let (kept, dropped) = rules.apply(entries);
        assert_eq!(dropped, 2);
        assert_eq!(
            kept.iter().map(Entry::display_name).collect::<Vec<_>>(),
            ["B", "A"]
        );
    }
}
