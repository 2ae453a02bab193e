//! Base-255 pick color codec
//!
//! Index `i` maps to `r = i % 255`, `g = (i / 255) % 255`, `b = i / 65025`.
//! No valid index ever produces a 255 channel, which keeps 255 free as the
//! "nothing here" marker of the white clear color.

use prism_core::{Color, Rgba8};

const BASE: u32 = 255;
const BASE_SQUARED: u32 = BASE * BASE;

/// Number of distinct pickable indices per pass (255^3).
pub const PICK_INDEX_CAPACITY: u32 = BASE * BASE * BASE;

/// Channels of the flat color for `index`, or `None` once the space is exhausted.
pub fn encode_pick_index(index: u32) -> Option<[u8; 3]> {
    let b = index / BASE_SQUARED;
    if b >= BASE {
        return None;
    }
    let rem = index % BASE_SQUARED;
    Some([(rem % BASE) as u8, (rem / BASE) as u8, b as u8])
}

/// Inverse of [`encode_pick_index`]. Any 255 channel decodes to `None`.
pub fn decode_pick_color(rgb: [u8; 3]) -> Option<u32> {
    if rgb.contains(&255) {
        return None;
    }
    let [r, g, b] = rgb.map(u32::from);
    Some(b * BASE_SQUARED + g * BASE + r)
}

/// Normalized opaque color for `index`.
pub fn pick_index_color(index: u32) -> Option<Color> {
    encode_pick_index(index).map(|[r, g, b]| Color::from_rgba8(Rgba8::new(r, g, b, 255)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_index_round_trips_without_reserved_channels() {
        for index in 0..PICK_INDEX_CAPACITY {
            let rgb = encode_pick_index(index).unwrap();
            assert!(!rgb.contains(&255), "index {index} encoded to {rgb:?}");
            assert_eq!(decode_pick_color(rgb), Some(index));
        }
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encode_pick_index(0), Some([0, 0, 0]));
        assert_eq!(encode_pick_index(1), Some([1, 0, 0]));
        assert_eq!(encode_pick_index(254), Some([254, 0, 0]));
        assert_eq!(encode_pick_index(255), Some([0, 1, 0]));
        assert_eq!(encode_pick_index(65_025), Some([0, 0, 1]));
        assert_eq!(encode_pick_index(PICK_INDEX_CAPACITY - 1), Some([254, 254, 254]));
    }

    #[test]
    fn space_ends_at_capacity() {
        assert_eq!(PICK_INDEX_CAPACITY, 16_581_375);
        assert_eq!(encode_pick_index(PICK_INDEX_CAPACITY), None);
        assert_eq!(encode_pick_index(u32::MAX), None);
    }

    #[test]
    fn reserved_channels_decode_to_nothing() {
        assert_eq!(decode_pick_color([255, 255, 255]), None);
        assert_eq!(decode_pick_color([255, 0, 0]), None);
        assert_eq!(decode_pick_color([0, 255, 0]), None);
        assert_eq!(decode_pick_color([0, 0, 255]), None);
    }

    #[test]
    fn colors_survive_quantization() {
        for index in [0, 1, 300, 70_000, PICK_INDEX_CAPACITY - 1] {
            let color = pick_index_color(index).unwrap();
            assert_eq!(color.a, 1.0);
            assert_eq!(decode_pick_color(color.to_rgba8().rgb()), Some(index));
        }
    }
}
