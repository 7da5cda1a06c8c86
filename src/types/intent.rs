use std::fmt;

use serde::{Deserialize, Serialize};

/// One translation request: a label, the parameters to touch, and the
/// adjustment to apply. Decoding is permissive - structurally missing
/// pieces (no targets, no operation) are reported by the engine as
/// validation failures rather than rejected at parse time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Intent {
    /// Free-form label, informational only
    #[serde(default)]
    pub intent: String,

    #[serde(default)]
    pub targets: Vec<Target>,

    #[serde(default)]
    pub operation: Option<Operation>,
}

/// One parameter the intent addresses. Only the first target of an intent
/// is translated; additional entries are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Target {
    #[serde(default)]
    pub track: Option<TrackRef>,

    /// Absent means a direct track parameter, not an insert/plugin parameter
    #[serde(default)]
    pub plugin: Option<String>,

    pub parameter: String,
}

/// Track reference - intents name tracks either by number or by string
/// ("2", "track 2", "Track 2", or a free-form name)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TrackRef {
    Number(i64),
    Name(String),
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackRef::Number(n) => write!(f, "{}", n),
            TrackRef::Name(name) => write!(f, "{}", name),
        }
    }
}

/// The adjustment to apply to the addressed parameter
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OpKind,

    pub value: f64,

    /// Unit of `value`; "dB" when absent, "%" recognized
    #[serde(default)]
    pub unit: Option<String>,

    /// Band hint in Hz, meaningful only for EQ gain/cut/boost parameters
    #[serde(default)]
    pub frequency: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    /// Applied on top of the last tracked value
    Relative,
    /// Replaces the tracked value outright
    Absolute,
}

impl Operation {
    /// Unit label carried into the bridge message
    pub fn unit_label(&self) -> &str {
        self.unit.as_deref().unwrap_or("dB")
    }

    pub fn is_percent(&self) -> bool {
        self.unit.as_deref() == Some("%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_intent() {
        let json = r#"{
            "intent": "raise track 2 compressor ratio by 1",
            "targets": [{"track": 2, "plugin": "compressor", "parameter": "ratio"}],
            "operation": {"type": "relative", "value": 1}
        }"#;

        let intent: Intent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.targets.len(), 1);
        assert_eq!(intent.targets[0].track, Some(TrackRef::Number(2)));
        assert_eq!(intent.targets[0].plugin.as_deref(), Some("compressor"));
        let op = intent.operation.unwrap();
        assert_eq!(op.kind, OpKind::Relative);
        assert_eq!(op.value, 1.0);
        assert_eq!(op.unit_label(), "dB");
    }

    #[test]
    fn test_decode_track_as_string() {
        let json = r#"{"targets": [{"track": "track 5", "parameter": "volume"}]}"#;
        let intent: Intent = serde_json::from_str(json).unwrap();
        assert_eq!(
            intent.targets[0].track,
            Some(TrackRef::Name("track 5".to_string()))
        );
        assert!(intent.operation.is_none());
    }

    #[test]
    fn test_decode_missing_targets_is_not_a_parse_error() {
        let intent: Intent = serde_json::from_str("{}").unwrap();
        assert!(intent.targets.is_empty());
        assert!(intent.operation.is_none());
    }

    #[test]
    fn test_percent_unit() {
        let op = Operation {
            kind: OpKind::Relative,
            value: 10.0,
            unit: Some("%".to_string()),
            frequency: None,
        };
        assert!(op.is_percent());
        assert_eq!(op.unit_label(), "%");
    }

    #[test]
    fn test_track_ref_display_unifies_number_and_digits() {
        assert_eq!(TrackRef::Number(3).to_string(), "3");
        assert_eq!(TrackRef::Name("3".to_string()).to_string(), "3");
    }
}
