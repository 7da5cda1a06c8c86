use thiserror::Error;

/// Engine failure taxonomy. Every failure is returned synchronously to the
/// caller; the engine never retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    /// Caller input is incomplete (no targets, no operation, no track)
    #[error("invalid intent: {0}")]
    Validation(String),

    /// The normalized alias has no configured MIDI target. Carries every
    /// alias configured for the same track as a diagnostic aid.
    #[error("no mapping for `{alias}` (configured for this track: {})", list_or_none(.available))]
    MappingNotFound {
        alias: String,
        available: Vec<String>,
    },

    /// Malformed mapping data reached the engine; fatal for that entry
    #[error("mapping configuration error: {0}")]
    Configuration(String),
}

impl BridgeError {
    /// Stable machine-readable kind, used in wire error replies
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeError::Validation(_) => "validation",
            BridgeError::MappingNotFound { .. } => "mapping_not_found",
            BridgeError::Configuration(_) => "configuration",
        }
    }
}

fn list_or_none(aliases: &[String]) -> String {
    if aliases.is_empty() {
        "none".to_string()
    } else {
        aliases.join(", ")
    }
}
