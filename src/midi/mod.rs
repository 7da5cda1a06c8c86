use anyhow::{Result, anyhow};
use midir::{MidiOutput, MidiOutputConnection};

use crate::types::message::CcEmission;

/// MIDI CC delivery
/// Holds an output connection and writes raw Control Change bytes to it
pub struct MidiSender {
    connection: MidiOutputConnection,
}

impl MidiSender {
    /// Connect to a MIDI output device by name or index string
    pub fn connect(search: &str) -> Result<Self> {
        let midi_out = MidiOutput::new("mixbridge-output")?;
        let ports = midi_out.ports();

        if ports.is_empty() {
            return Err(anyhow!("No MIDI output devices found"));
        }

        let names: Vec<String> = ports
            .iter()
            .map(|port| {
                midi_out
                    .port_name(port)
                    .unwrap_or_else(|_| "Unknown".to_string())
            })
            .collect();
        let index = find_output_device(&names, search)?;

        let connection = midi_out
            .connect(&ports[index], "mixbridge-output")
            .map_err(|e| anyhow!("Failed to connect to MIDI port `{}`: {}", names[index], e))?;

        log::info!("MIDI output connected: {}", names[index]);

        Ok(Self { connection })
    }

    /// Emit one Control Change message
    pub fn send(&mut self, emission: &CcEmission) -> Result<()> {
        self.connection
            .send(&emission.cc_bytes())
            .map_err(|e| anyhow!("Failed to send CC {}: {}", emission.cc, e))
    }

    /// List all available MIDI output devices
    pub fn list_devices() -> Result<Vec<String>> {
        let midi_out = MidiOutput::new("mixbridge-list")?;
        let ports = midi_out.ports();

        let mut devices = Vec::new();
        for port in ports.iter() {
            if let Ok(name) = midi_out.port_name(port) {
                devices.push(name);
            }
        }

        Ok(devices)
    }
}

/// Find a MIDI output device index by name or index string
fn find_output_device(devices: &[String], search: &str) -> Result<usize> {
    // Try to parse as index first
    if let Ok(index) = search.parse::<usize>() {
        if index < devices.len() {
            return Ok(index);
        } else {
            return Err(anyhow!(
                "MIDI device index {} out of range (0-{})",
                index,
                devices.len() - 1
            ));
        }
    }

    // Search by name (case-insensitive substring match)
    let search_lower = search.to_lowercase();
    for (i, device) in devices.iter().enumerate() {
        if device.to_lowercase().contains(&search_lower) {
            return Ok(i);
        }
    }

    Err(anyhow!("MIDI device '{}' not found", search))
}
