use serde::{Deserialize, Serialize};

/// Engine output: one instruction for the delivery side, plus the
/// human-readable and domain-value metadata a caller wants echoed back.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BridgeMessage {
    pub op: BridgeOp,
    pub payload: Vec<CcEmission>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeOp {
    EmitCc,
}

/// One MIDI Control Change to emit
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CcEmission {
    pub cc: u8,
    /// 1-16, as configured
    pub channel: u8,
    /// 0-127, already scaled
    pub value: u8,
    /// Human-readable description of what was adjusted
    pub target: String,
    /// The domain value behind `value`, in `unit`
    pub final_value: f64,
    pub unit: String,
}

impl BridgeMessage {
    /// An emit-CC message with a single payload entry
    pub fn emit_cc(emission: CcEmission) -> Self {
        Self {
            op: BridgeOp::EmitCc,
            payload: vec![emission],
        }
    }
}

impl CcEmission {
    /// Raw wire bytes: [status, controller, value].
    /// Channel is 1-16 in config and on the wire status nibble 0-15.
    pub fn cc_bytes(&self) -> [u8; 3] {
        [0xB0 | (self.channel - 1), self.cc, self.value]
    }
}
