//! Film grain overlay.

use corona_api::PixelBuffer;
use rand::Rng;

/// Opacity of every grain pixel (0-255)
pub const GRAIN_ALPHA: u8 = 16;
/// Brightest grain luminance as a fraction of white
pub const GRAIN_INTENSITY: f32 = 0.4;

/// Fill `buffer` with fresh per-pixel luminance noise
pub fn fill_grain<R: Rng>(buffer: &mut PixelBuffer, rng: &mut R) {
    let pixels = buffer.pixels_mut();
    rng.fill(bytemuck::cast_slice_mut::<u32, u8>(&mut *pixels));

    for pixel in pixels.iter_mut() {
        let noise = pixel.to_ne_bytes()[0];
        let v = (noise as f32 * GRAIN_INTENSITY) as u8;
        *pixel = PixelBuffer::pack([v, v, v, GRAIN_ALPHA]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grain_is_gray_low_intensity() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut buffer = PixelBuffer::new(64, 32);
        fill_grain(&mut buffer, &mut rng);

        let max = (255.0 * GRAIN_INTENSITY) as u8;
        for px in buffer.as_bytes().chunks(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert!(px[0] <= max);
            assert_eq!(px[3], GRAIN_ALPHA);
        }
    }

    #[test]
    fn test_grain_changes_every_fill() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut buffer = PixelBuffer::new(32, 32);
        fill_grain(&mut buffer, &mut rng);
        let first = buffer.pixels().to_vec();
        fill_grain(&mut buffer, &mut rng);
        assert_ne!(first, buffer.pixels());
    }

    #[test]
    fn test_empty_buffer_is_fine() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut buffer = PixelBuffer::new(0, 0);
        fill_grain(&mut buffer, &mut rng);
        assert!(buffer.is_empty());
    }
}
