//! The intent-to-MIDI translation engine.
//!
//! Given one intent, produces one bridge message or fails with a typed
//! diagnostic. Per call the pipeline is: validate targets and operation,
//! normalize the track/plugin/parameter vocabulary, resolve the mapping
//! alias, compute the domain value against the state store, and rescale it
//! onto the MIDI range. The only state shared across calls is the store of
//! last-known domain values.

pub mod error;
pub mod normalize;
pub mod resolve;
pub mod state;
pub mod translate;

use log::debug;

use crate::types::intent::Intent;
use crate::types::message::{BridgeMessage, CcEmission};

use error::BridgeError;
use normalize::PluginKind;
use resolve::MappingTable;
use state::{StateKey, StateStore};

pub struct TranslationEngine {
    mappings: MappingTable,
    state: StateStore,
}

impl TranslationEngine {
    pub fn new(mappings: MappingTable) -> Self {
        Self {
            mappings,
            state: StateStore::new(),
        }
    }

    /// Translate one intent into one bridge message. Only the first target
    /// is consulted; additional targets are accepted and ignored, so the
    /// message always carries exactly one payload entry.
    pub fn translate(&self, intent: &Intent) -> Result<BridgeMessage, BridgeError> {
        let target = intent
            .targets
            .first()
            .ok_or_else(|| BridgeError::Validation("intent has no targets".to_string()))?;
        let operation = intent
            .operation
            .as_ref()
            .ok_or_else(|| BridgeError::Validation("intent has no operation".to_string()))?;
        let track_ref = target
            .track
            .as_ref()
            .ok_or_else(|| BridgeError::Validation("target has no track".to_string()))?;

        let track = normalize::normalize_track(track_ref)?;
        let plugin = PluginKind::classify(target.plugin.as_deref());
        let parameter = plugin.normalize_parameter(&target.parameter, operation);

        let alias = resolve::build_alias(&track, plugin.canonical(), &parameter);
        let entry = self.mappings.resolve(&alias)?;

        // State is keyed by the raw target fields, not the normalized ones
        let key = StateKey::new(track_ref, target.plugin.as_deref(), &target.parameter);
        let final_value = self.state.apply(key, operation);
        let value = translate::scale_to_midi(final_value, &entry.scale)?;

        debug!(
            "{} -> cc {} ch {} value {} ({} {})",
            alias,
            entry.midi.cc,
            entry.midi.channel,
            value,
            final_value,
            operation.unit_label()
        );

        Ok(BridgeMessage::emit_cc(CcEmission {
            cc: entry.midi.cc,
            channel: entry.midi.channel,
            value,
            target: describe_target(&track, plugin.canonical(), &parameter),
            final_value,
            unit: operation.unit_label().to_string(),
        }))
    }
}

fn describe_target(track: &str, plugin: Option<&str>, parameter: &str) -> String {
    match plugin {
        Some(plugin) => format!("{} / {} / {}", track, plugin, parameter),
        None => format!("{} / {}", track, parameter),
    }
}
