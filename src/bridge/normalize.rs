//! Canonicalization of free-form intent vocabulary into the vocabulary used
//! by the mapping-table aliases.

use crate::types::intent::{Operation, TrackRef};

use super::error::BridgeError;

/// Closed classification of the plugin namespace. Each kind owns its own
/// parameter vocabulary; adding a plugin family means adding a variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginKind {
    /// No plugin named: a direct track parameter (volume, pan)
    Direct,
    Eq,
    Compressor,
    Reverb,
    /// Unrecognized plugin, carried through lower-cased
    Other(String),
}

impl PluginKind {
    /// Classify a raw plugin name. Matching is case-insensitive substring,
    /// checked in fixed order: eq, compressor, reverb. "ChromaVerb" is a
    /// product name that doesn't contain "reverb", so it gets an exact match.
    pub fn classify(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return PluginKind::Direct;
        };
        let lower = raw.to_lowercase();
        if lower.contains("eq") {
            PluginKind::Eq
        } else if lower.contains("compressor") {
            PluginKind::Compressor
        } else if lower.contains("reverb") || raw == "ChromaVerb" {
            PluginKind::Reverb
        } else {
            PluginKind::Other(lower)
        }
    }

    /// Canonical name used in alias keys; `None` for direct track parameters
    pub fn canonical(&self) -> Option<&str> {
        match self {
            PluginKind::Direct => None,
            PluginKind::Eq => Some("eq"),
            PluginKind::Compressor => Some("compressor"),
            PluginKind::Reverb => Some("reverb"),
            PluginKind::Other(name) => Some(name),
        }
    }

    /// Canonicalize a parameter name under this plugin's vocabulary.
    /// Unrecognized parameters pass through unchanged.
    pub fn normalize_parameter(&self, raw: &str, operation: &Operation) -> String {
        let canonical = match self {
            PluginKind::Direct => match raw {
                "vol" | "volume" | "level" => "volume",
                "pan" | "panning" => "pan",
                other => other,
            },
            PluginKind::Eq => match raw {
                "gain" | "high_gain" => "high",
                "mid_gain" => "mid",
                "low_gain" => "low",
                // Band-free cut/boost requests pick their band from the
                // operation's frequency hint
                "cut" | "boost" => band_for_frequency(operation.frequency),
                other => other,
            },
            // Identity mapping; documents the accepted vocabulary
            PluginKind::Compressor => match raw {
                "ratio" => "ratio",
                "threshold" => "threshold",
                "attack" => "attack",
                "release" => "release",
                other => other,
            },
            PluginKind::Reverb => match raw {
                "wet" | "wet_level" => "wet",
                "dry" | "dry_level" => "dry",
                other => other,
            },
            PluginKind::Other(_) => raw,
        };
        canonical.to_string()
    }
}

/// EQ band for a band-free gain adjustment: below 200 Hz is the low shelf,
/// 2 kHz and up the high shelf, everything between the mid bell. No hint
/// defaults to mid.
pub fn band_for_frequency(frequency: Option<f64>) -> &'static str {
    match frequency {
        Some(f) if f < 200.0 => "low",
        Some(f) if f < 2000.0 => "mid",
        Some(_) => "high",
        None => "mid",
    }
}

/// Normalize a track reference to the `"Track <N>"` form used by the mapping
/// aliases. Numbers, digit-only strings, and `"track <N>"` phrases (any
/// case, surrounding whitespace allowed) all become `"Track <N>"`. Any other
/// string passes through unchanged, which keeps free-form track names usable.
pub fn normalize_track(track: &TrackRef) -> Result<String, BridgeError> {
    match track {
        TrackRef::Number(n) => Ok(format!("Track {}", n)),
        TrackRef::Name(name) => {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(BridgeError::Validation("target track is blank".to_string()));
            }

            if trimmed.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(n) = trimmed.parse::<i64>() {
                    return Ok(format!("Track {}", n));
                }
            }

            if let Some(n) = parse_track_phrase(trimmed) {
                return Ok(format!("Track {}", n));
            }

            Ok(name.clone())
        }
    }
}

/// Parse a `"track <N>"` phrase, case-insensitive. The space between the
/// word and the number is required.
fn parse_track_phrase(s: &str) -> Option<i64> {
    let lower = s.to_lowercase();
    let rest = lower.strip_prefix("track")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let digits = rest.trim_start();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::intent::OpKind;

    fn op(frequency: Option<f64>) -> Operation {
        Operation {
            kind: OpKind::Relative,
            value: 1.0,
            unit: None,
            frequency,
        }
    }

    #[test]
    fn test_normalize_track_number() {
        assert_eq!(normalize_track(&TrackRef::Number(2)).unwrap(), "Track 2");
    }

    #[test]
    fn test_normalize_track_digit_string() {
        let track = TrackRef::Name("7".to_string());
        assert_eq!(normalize_track(&track).unwrap(), "Track 7");
        // Leading zeros collapse like the numeric form
        let track = TrackRef::Name("07".to_string());
        assert_eq!(normalize_track(&track).unwrap(), "Track 7");
    }

    #[test]
    fn test_normalize_track_phrase() {
        for raw in ["track 3", "Track 3", "TRACK 3", "  track 3  "] {
            let track = TrackRef::Name(raw.to_string());
            assert_eq!(normalize_track(&track).unwrap(), "Track 3", "raw: {raw}");
        }
    }

    #[test]
    fn test_normalize_track_free_form_passes_through() {
        let track = TrackRef::Name("Master".to_string());
        assert_eq!(normalize_track(&track).unwrap(), "Master");
        // "track" without a number is not the phrase form
        let track = TrackRef::Name("trackless".to_string());
        assert_eq!(normalize_track(&track).unwrap(), "trackless");
    }

    #[test]
    fn test_normalize_track_blank_is_invalid() {
        let track = TrackRef::Name("   ".to_string());
        assert!(matches!(
            normalize_track(&track),
            Err(BridgeError::Validation(_))
        ));
    }

    #[test]
    fn test_classify_plugins() {
        assert_eq!(PluginKind::classify(None), PluginKind::Direct);
        assert_eq!(PluginKind::classify(Some("Channel EQ")), PluginKind::Eq);
        assert_eq!(PluginKind::classify(Some("eq")), PluginKind::Eq);
        assert_eq!(
            PluginKind::classify(Some("Compressor")),
            PluginKind::Compressor
        );
        assert_eq!(PluginKind::classify(Some("Space Reverb")), PluginKind::Reverb);
        assert_eq!(PluginKind::classify(Some("ChromaVerb")), PluginKind::Reverb);
        assert_eq!(
            PluginKind::classify(Some("Tape Delay")),
            PluginKind::Other("tape delay".to_string())
        );
    }

    #[test]
    fn test_direct_parameter_synonyms() {
        let kind = PluginKind::Direct;
        for raw in ["vol", "volume", "level"] {
            assert_eq!(kind.normalize_parameter(raw, &op(None)), "volume");
        }
        assert_eq!(kind.normalize_parameter("panning", &op(None)), "pan");
        assert_eq!(kind.normalize_parameter("mute", &op(None)), "mute");
    }

    #[test]
    fn test_eq_gain_parameters() {
        let kind = PluginKind::Eq;
        // Bare "gain" is the high-shelf synonym; the frequency hint only
        // steers cut/boost
        assert_eq!(kind.normalize_parameter("gain", &op(Some(150.0))), "high");
        assert_eq!(kind.normalize_parameter("high_gain", &op(None)), "high");
        assert_eq!(kind.normalize_parameter("mid_gain", &op(None)), "mid");
        assert_eq!(kind.normalize_parameter("low_gain", &op(None)), "low");
    }

    #[test]
    fn test_eq_band_from_frequency() {
        let kind = PluginKind::Eq;
        assert_eq!(kind.normalize_parameter("cut", &op(Some(150.0))), "low");
        assert_eq!(kind.normalize_parameter("cut", &op(Some(200.0))), "mid");
        assert_eq!(kind.normalize_parameter("boost", &op(Some(1999.0))), "mid");
        assert_eq!(kind.normalize_parameter("boost", &op(Some(2000.0))), "high");
        assert_eq!(kind.normalize_parameter("cut", &op(None)), "mid");
    }

    #[test]
    fn test_compressor_vocabulary() {
        let kind = PluginKind::Compressor;
        for raw in ["ratio", "threshold", "attack", "release"] {
            assert_eq!(kind.normalize_parameter(raw, &op(None)), raw);
        }
        assert_eq!(kind.normalize_parameter("knee", &op(None)), "knee");
    }

    #[test]
    fn test_reverb_parameters() {
        let kind = PluginKind::Reverb;
        assert_eq!(kind.normalize_parameter("wet_level", &op(None)), "wet");
        assert_eq!(kind.normalize_parameter("dry_level", &op(None)), "dry");
        assert_eq!(kind.normalize_parameter("decay", &op(None)), "decay");
    }

    #[test]
    fn test_other_plugin_passes_parameters_through() {
        let kind = PluginKind::classify(Some("Tape Delay"));
        assert_eq!(kind.normalize_parameter("feedback", &op(None)), "feedback");
        assert_eq!(kind.canonical(), Some("tape delay"));
    }
}
