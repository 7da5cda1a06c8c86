use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Top-level mapping configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MappingConfig {
    pub mappings: Vec<MappingEntry>,
}

impl MappingConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping file: {}", path.display()))?;

        let config: MappingConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML mapping file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.mappings.is_empty() {
            return Err(anyhow!("Mapping configuration must have at least one entry"));
        }

        let mut seen = HashSet::new();
        for (idx, entry) in self.mappings.iter().enumerate() {
            entry
                .validate()
                .with_context(|| format!("Invalid mapping entry {} (`{}`)", idx, entry.alias))?;

            if !seen.insert(entry.alias.as_str()) {
                return Err(anyhow!("Duplicate mapping alias `{}`", entry.alias));
            }
        }

        Ok(())
    }
}

/// One controllable parameter: its alias key, MIDI target, and value scale
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MappingEntry {
    pub alias: String,
    pub midi: MidiTarget,
    pub scale: ScaleRange,
}

impl MappingEntry {
    /// Validate this mapping entry
    pub fn validate(&self) -> Result<()> {
        if self.alias.is_empty() {
            return Err(anyhow!("Alias must not be empty"));
        }

        if self.midi.cc > 127 {
            return Err(anyhow!("CC number must be between 0 and 127"));
        }

        // Validate MIDI channel (1-16)
        if self.midi.channel < 1 || self.midi.channel > 16 {
            return Err(anyhow!("MIDI channel must be between 1 and 16"));
        }

        self.scale.validate()
    }
}

/// MIDI Control Change target
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MidiTarget {
    pub cc: u8,
    pub channel: u8,
}

/// Linear scale from a domain-value range onto a MIDI value range
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScaleRange {
    pub in_min: f64,
    pub in_max: f64,
    pub out_min: f64,
    pub out_max: f64,
}

impl ScaleRange {
    /// Validate the scale ranges. A zero-width or inverted input range can
    /// never be rescaled, and the output range must stay inside 0-127 so
    /// the emitted value always fits a MIDI data byte.
    pub fn validate(&self) -> Result<()> {
        if self.in_min >= self.in_max {
            return Err(anyhow!(
                "Scale input range must satisfy in_min < in_max (got {}..{})",
                self.in_min,
                self.in_max
            ));
        }
        if self.out_min >= self.out_max {
            return Err(anyhow!(
                "Scale output range must satisfy out_min < out_max (got {}..{})",
                self.out_min,
                self.out_max
            ));
        }
        if self.out_min < 0.0 || self.out_max > 127.0 {
            return Err(anyhow!(
                "Scale output range must be within 0-127 (got {}..{})",
                self.out_min,
                self.out_max
            ));
        }
        Ok(())
    }
}
