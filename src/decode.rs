//! Conversions from raw Finch response frames to sensor readings.

use crate::constants::{FRAME_LEN, TAP_MASK};

/// Left and right light sensor intensities, 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Light {
    pub left: u8,
    pub right: u8,
}

/// Accelerometer reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acceleration {
    /// X axis in g.
    pub x: f64,
    /// Y axis in g.
    pub y: f64,
    /// Z axis in g.
    pub z: f64,
    /// The Finch was tapped since the previous read.
    pub tap: bool,
    /// The Finch was shaken since the previous read. Never reported as set,
    /// see `status` for the raw bits.
    pub shake: bool,
    /// The raw tap/shake status byte.
    pub status: u8,
}

/// Obstacle sensor state, `true` when something is in front of that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacles {
    pub left: bool,
    pub right: bool,
}

/// Converts the raw temperature byte to degrees Celsius.
pub fn raw_to_celsius(raw: u8) -> f64 {
    (f64::from(raw) - 127.0) / 2.4 + 25.0
}

/// Converts a 6-bit two's complement accelerometer sample to g.
pub fn raw_to_g(raw: u8) -> f64 {
    let mut value = i16::from(raw);
    if value > 31 {
        value -= 64;
    }
    f64::from(value) * 1.5 / 32.0
}

/// Decodes a temperature response.
///
/// # Arguments
///
/// * `frame` - The response frame; byte 0 holds the raw temperature.
///
/// # Returns
///
/// The temperature in degrees Celsius.
pub fn decode_temperature(frame: &[u8; FRAME_LEN]) -> f64 {
    raw_to_celsius(frame[0])
}

/// Decodes a light sensor response.
///
/// # Arguments
///
/// * `frame` - The response frame; bytes 0 and 1 hold the left and right
///   intensities.
///
/// # Returns
///
/// A `Light` with both intensities as sent by the device.
pub fn decode_light(frame: &[u8; FRAME_LEN]) -> Light {
    Light {
        left: frame[0],
        right: frame[1],
    }
}

/// Decodes an accelerometer response.
///
/// # Arguments
///
/// * `frame` - The response frame; bytes 1-3 hold the X, Y and Z samples and
///   byte 4 the tap/shake status.
///
/// # Returns
///
/// An `Acceleration` with each axis converted to g and the tap flag decoded.
pub fn decode_acceleration(frame: &[u8; FRAME_LEN]) -> Acceleration {
    let status = frame[4];
    Acceleration {
        x: raw_to_g(frame[1]),
        y: raw_to_g(frame[2]),
        z: raw_to_g(frame[3]),
        // Bit 5 is cleared while a tap is pending.
        tap: status & TAP_MASK == 0,
        // Shake detection is not decoded; bit 7 is left to the caller via `status`.
        shake: false,
        status,
    }
}

// Only 0 and 1 are meaningful; anything else reads as no obstacle.
fn obstacle_flag(raw: u8) -> bool {
    raw == 1
}

/// Decodes an obstacle sensor response.
///
/// # Arguments
///
/// * `frame` - The response frame; bytes 0 and 1 hold the left and right
///   sensor states.
///
/// # Returns
///
/// An `Obstacles` where a side is `true` only when its raw byte is 1.
pub fn decode_obstacles(frame: &[u8; FRAME_LEN]) -> Obstacles {
    Obstacles {
        left: obstacle_flag(frame[0]),
        right: obstacle_flag(frame[1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(prefix: &[u8]) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        frame[..prefix.len()].copy_from_slice(prefix);
        frame
    }

    #[test]
    fn temperature_midpoint_is_25_celsius() {
        assert!((raw_to_celsius(127) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn temperature_zero_raw() {
        let expected = 25.0 - 127.0 / 2.4;
        assert!((raw_to_celsius(0) - expected).abs() < 1e-9);
        assert!((raw_to_celsius(0) - (-27.9)).abs() < 0.05);
    }

    #[test]
    fn acceleration_sign_extends_six_bits() {
        assert_eq!(raw_to_g(0), 0.0);
        assert_eq!(raw_to_g(31), 31.0 * 1.5 / 32.0);
        assert_eq!(raw_to_g(32), -1.5);
        assert_eq!(raw_to_g(40), -1.125);
        assert_eq!(raw_to_g(63), -1.5 / 32.0);
    }

    #[test]
    fn acceleration_tap_is_active_low() {
        let tapped = decode_acceleration(&frame(&[0, 1, 2, 3, 0x00]));
        assert!(tapped.tap);
        let idle = decode_acceleration(&frame(&[0, 1, 2, 3, 0x20]));
        assert!(!idle.tap);
    }

    #[test]
    fn acceleration_shake_stays_false_with_bit_7_set() {
        let reading = decode_acceleration(&frame(&[0, 0, 0, 0, 0xA0]));
        assert!(!reading.shake);
        assert_eq!(reading.status, 0xA0);
    }

    #[test]
    fn obstacles_only_one_means_present() {
        assert_eq!(
            decode_obstacles(&frame(&[1, 0])),
            Obstacles { left: true, right: false }
        );
        assert_eq!(
            decode_obstacles(&frame(&[0, 0])),
            Obstacles { left: false, right: false }
        );
        assert_eq!(
            decode_obstacles(&frame(&[2, 1])),
            Obstacles { left: false, right: true }
        );
    }

    #[test]
    fn light_passes_bytes_through() {
        assert_eq!(
            decode_light(&frame(&[17, 250])),
            Light { left: 17, right: 250 }
        );
    }
}
