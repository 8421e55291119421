use std::collections::HashSet;

use tracing::debug;

use super::entry::Entry;

/// Lowercased display names already written out, threaded through every source in
/// priority order. Names are only ever added.
#[derive(Debug, Default)]
pub struct SeenNames(HashSet<String>);

impl SeenNames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_lowercase())
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops every entry whose name was seen before, in this source or an earlier one.
    /// First occurrence wins.
    ///
    /// Returns: `(kept, duplicate_count)`
    pub fn dedupe(&mut self, entries: Vec<Entry>) -> (Vec<Entry>, usize) {
        let mut kept = Vec::with_capacity(entries.len());
        let mut duplicates = 0;

        for entry in entries {
            if !self.0.insert(entry.key()) {
                debug!("Duplicate {:?}", entry.display_name());
                duplicates += 1;
                continue;
            }
            kept.push(entry);
        }

        (kept, duplicates)
    }
}
