//! Last-known domain values, kept to resolve relative adjustments.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::types::intent::{OpKind, Operation, TrackRef};

/// Identity of one tracked parameter. Built from the *raw* target fields,
/// before normalization: two spellings that resolve to the same mapping
/// entry keep separate baselines. Keeping the plugin as an `Option` means a
/// plugin-scoped key can never collide with a direct-track key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    track: String,
    plugin: Option<String>,
    parameter: String,
}

impl StateKey {
    pub fn new(track: &TrackRef, plugin: Option<&str>, parameter: &str) -> Self {
        Self {
            track: track.to_string(),
            plugin: plugin.map(str::to_string),
            parameter: parameter.to_string(),
        }
    }
}

/// Process-lifetime store of last resolved domain values. Owned by the
/// engine instance, so isolated engines get isolated state. Entries are
/// created on first use, overwritten on every subsequent operation, and
/// never deleted.
#[derive(Debug, Default)]
pub struct StateStore {
    values: Mutex<HashMap<StateKey, f64>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one operation for `key` and return the resulting domain value.
    /// The read-modify-write runs under a single lock acquisition, so
    /// concurrent relative adjustments of the same key cannot lose updates.
    pub fn apply(&self, key: StateKey, operation: &Operation) -> f64 {
        let mut values = self.values.lock().unwrap();
        let next = match operation.kind {
            OpKind::Absolute => operation.value,
            OpKind::Relative => {
                let prior = values
                    .get(&key)
                    .copied()
                    .unwrap_or_else(|| default_baseline(operation));
                prior + operation.value
            }
        };
        values.insert(key, next);
        next
    }

    /// Last value recorded for `key`, if any
    pub fn last(&self, key: &StateKey) -> Option<f64> {
        self.values.lock().unwrap().get(key).copied()
    }

    /// Number of tracked identities
    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Baseline for a relative adjustment with no recorded value: percent
/// parameters start from zero, dB-style parameters from an unset fader
/// at -20 dB.
fn default_baseline(operation: &Operation) -> f64 {
    if operation.is_percent() { 0.0 } else { -20.0 }
}
