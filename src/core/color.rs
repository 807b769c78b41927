use nalgebra::Vector3;

/// Compresses an over-bright color back into [0, 1].
/// If the largest channel exceeds one, every channel is divided by it, so the
/// ratio between channels (the hue) survives instead of being hard-clipped.
pub fn max_to_one(color: Vector3<f32>) -> Vector3<f32> {
    let max = color.x.max(color.y).max(color.z);
    if max > 1.0 { color / max } else { color }
}

/// Packs a [0, 1] color into `0xAARRGGBB` with an opaque alpha.
/// Negative and NaN channels saturate to zero.
#[inline]
pub fn pack_rgb(color: Vector3<f32>) -> u32 {
    let r = (color.x * 255.0) as u8 as u32;
    let g = (color.y * 255.0) as u8 as u32;
    let b = (color.z * 255.0) as u8 as u32;
    (255 << 24) | (r << 16) | (g << 8) | b
}

/// Splits a packed `0xAARRGGBB` value into 8-bit RGB channels.
#[inline]
pub fn unpack_rgb8(packed: u32) -> [u8; 3] {
    [
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        (packed & 0xFF) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_to_one_keeps_ratios() {
        let c = max_to_one(Vector3::new(2.0, 1.0, 0.5));
        assert_eq!(c, Vector3::new(1.0, 0.5, 0.25));
    }

    #[test]
    fn max_to_one_leaves_ldr_colors_alone() {
        let c = Vector3::new(0.2, 0.9, 1.0);
        assert_eq!(max_to_one(c), c);
    }

    #[test]
    fn pack_and_unpack() {
        let packed = pack_rgb(Vector3::new(1.0, 0.0, 0.5));
        assert_eq!(packed >> 24, 0xFF);
        assert_eq!(unpack_rgb8(packed), [255, 0, 127]);
    }

    #[test]
    fn negative_channels_saturate() {
        assert_eq!(unpack_rgb8(pack_rgb(Vector3::new(-1.0, f32::NAN, 0.0))), [0, 0, 0]);
    }
}
