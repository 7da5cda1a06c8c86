//! Alias construction and mapping-table lookup.

use std::collections::HashMap;

use crate::config::MappingEntry;

use super::error::BridgeError;

/// Immutable alias -> MIDI target table, loaded once at startup and only
/// queried afterwards.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: HashMap<String, MappingEntry>,
}

impl MappingTable {
    pub fn from_entries(entries: Vec<MappingEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.alias.clone(), entry))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up `alias`, or fail with the sorted list of aliases configured
    /// for the same track so the caller can see what actually exists.
    pub fn resolve(&self, alias: &str) -> Result<&MappingEntry, BridgeError> {
        if let Some(entry) = self.entries.get(alias) {
            return Ok(entry);
        }

        let prefix = track_prefix(alias);
        let mut available: Vec<String> = self
            .entries
            .keys()
            .filter(|configured| configured.starts_with(&prefix))
            .cloned()
            .collect();
        available.sort();

        Err(BridgeError::MappingNotFound {
            alias: alias.to_string(),
            available,
        })
    }
}

/// Build the canonical alias for a normalized (track, plugin, parameter)
/// triple: `track<N>.<plugin>.<parameter>`, with the plugin segment omitted
/// for direct track parameters. The track number is the normalized track
/// name with its `"Track "` prefix stripped.
pub fn build_alias(track: &str, plugin: Option<&str>, parameter: &str) -> String {
    let number = track.strip_prefix("Track ").unwrap_or(track);
    match plugin {
        Some(plugin) => format!("track{}.{}.{}", number, plugin, parameter),
        None => format!("track{}.{}", number, parameter),
    }
}

/// The `track<N>.` segment of an alias, dot included so `track1.` never
/// matches `track10.*`.
fn track_prefix(alias: &str) -> String {
    match alias.find('.') {
        Some(idx) => alias[..=idx].to_string(),
        None => alias.to_string(),
    }
}
