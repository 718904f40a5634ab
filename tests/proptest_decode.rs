//! Property-based tests for the Finch sequence counter and response decoding.
//!
//! Uses proptest with 500 cases to verify:
//! - the sequence counter wraps from 255 to 0 and otherwise adds one
//! - accelerometer samples always land in -1.5..1.5 g
//! - obstacle flags are only set by a raw 1

use finch_hid::{
    decode_acceleration, decode_light, decode_obstacles, next_sequence, raw_to_celsius,
    raw_to_g, FRAME_LEN,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_sequence_increments_or_wraps(seq in 0u8..=u8::MAX) {
        let next = next_sequence(seq);
        if seq == u8::MAX {
            prop_assert_eq!(next, 0);
        } else {
            prop_assert_eq!(next, seq + 1);
        }
    }

    /// Every 6-bit sample maps into the accelerometer's +/-1.5 g range.
    #[test]
    fn prop_six_bit_samples_in_range(raw in 0u8..64) {
        let g = raw_to_g(raw);
        prop_assert!((-1.5..1.5).contains(&g), "{} mapped to {}", raw, g);
    }

    /// Samples above 31 are negative and mirror `raw - 64`.
    #[test]
    fn prop_upper_half_is_negative(raw in 32u8..64) {
        let expected = (f64::from(raw) - 64.0) * 1.5 / 32.0;
        prop_assert_eq!(raw_to_g(raw), expected);
    }

    #[test]
    fn prop_temperature_is_monotonic(raw in 0u8..u8::MAX) {
        prop_assert!(raw_to_celsius(raw) < raw_to_celsius(raw + 1));
    }

    /// Only bytes 1-3 carry axes and byte 4 the status.
    #[test]
    fn prop_acceleration_fields_from_bytes(
        x in 0u8..64,
        y in 0u8..64,
        z in 0u8..64,
        status in 0u8..=u8::MAX,
    ) {
        let frame = [0xFF, x, y, z, status, 0, 0, 3, 3];
        let reading = decode_acceleration(&frame);
        prop_assert_eq!(reading.x, raw_to_g(x));
        prop_assert_eq!(reading.y, raw_to_g(y));
        prop_assert_eq!(reading.z, raw_to_g(z));
        prop_assert_eq!(reading.tap, status & 0x20 == 0);
        prop_assert!(!reading.shake);
        prop_assert_eq!(reading.status, status);
    }

    #[test]
    fn prop_obstacles_only_set_by_one(left in 0u8..=u8::MAX, right in 0u8..=u8::MAX) {
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = left;
        frame[1] = right;
        let obstacles = decode_obstacles(&frame);
        prop_assert_eq!(obstacles.left, left == 1);
        prop_assert_eq!(obstacles.right, right == 1);
    }

    #[test]
    fn prop_light_passes_through(left in 0u8..=u8::MAX, right in 0u8..=u8::MAX) {
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = left;
        frame[1] = right;
        let light = decode_light(&frame);
        prop_assert_eq!((light.left, light.right), (left, right));
    }
}
