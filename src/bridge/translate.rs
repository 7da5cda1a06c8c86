//! Domain-value rescaling onto the MIDI range.

use crate::config::ScaleRange;

use super::error::BridgeError;

/// Clamp `domain_value` into the scale's input range and map it linearly
/// onto the output range, rounded to the nearest integer. Out-of-range
/// inputs are clamped, never rejected. A zero-width input range cannot be
/// rescaled and is reported as a configuration failure for the entry.
pub fn scale_to_midi(domain_value: f64, scale: &ScaleRange) -> Result<u8, BridgeError> {
    let in_span = scale.in_max - scale.in_min;
    if in_span <= 0.0 {
        return Err(BridgeError::Configuration(format!(
            "unscalable input range {}..{}",
            scale.in_min, scale.in_max
        )));
    }

    let clamped = domain_value.clamp(scale.in_min, scale.in_max);
    let midi =
        (clamped - scale.in_min) / in_span * (scale.out_max - scale.out_min) + scale.out_min;
    Ok(midi.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> ScaleRange {
        ScaleRange {
            in_min,
            in_max,
            out_min,
            out_max,
        }
    }

    #[test]
    fn test_volume_fader_scaling() {
        // -6 dB on a -60..6 fader lands at round(54/66 * 127) = 104
        let s = scale(-60.0, 6.0, 0.0, 127.0);
        assert_eq!(scale_to_midi(-6.0, &s).unwrap(), 104);
    }

    #[test]
    fn test_range_endpoints() {
        let s = scale(-60.0, 6.0, 0.0, 127.0);
        assert_eq!(scale_to_midi(-60.0, &s).unwrap(), 0);
        assert_eq!(scale_to_midi(6.0, &s).unwrap(), 127);
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let s = scale(-60.0, 6.0, 0.0, 127.0);
        assert_eq!(scale_to_midi(-500.0, &s).unwrap(), 0);
        assert_eq!(scale_to_midi(500.0, &s).unwrap(), 127);
    }

    #[test]
    fn test_nonzero_output_floor() {
        let s = scale(0.0, 10.0, 20.0, 40.0);
        assert_eq!(scale_to_midi(5.0, &s).unwrap(), 30);
        // Clamped values land on the output bounds, not 0/127
        assert_eq!(scale_to_midi(-3.0, &s).unwrap(), 20);
        assert_eq!(scale_to_midi(99.0, &s).unwrap(), 40);
    }

    #[test]
    fn test_rounds_to_nearest() {
        let s = scale(0.0, 100.0, 0.0, 127.0);
        assert_eq!(scale_to_midi(10.0, &s).unwrap(), 13); // 12.7 rounds up
        assert_eq!(scale_to_midi(20.0, &s).unwrap(), 25); // 25.4 rounds down
    }

    #[test]
    fn test_zero_width_input_range_is_fatal() {
        let s = scale(5.0, 5.0, 0.0, 127.0);
        assert!(matches!(
            scale_to_midi(5.0, &s),
            Err(BridgeError::Configuration(_))
        ));
    }
}
