//! Frame enhancement for text recognition
//!
//! Deterministic transform applied to the decoded greyscale bitmap before it
//! is fed to the engine: smooth out sensor noise, then run a blackhat
//! morphological operation to lift dark text strokes off a lighter
//! background. Output dimensions always equal input dimensions.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use imageproc::contrast::adaptive_threshold;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{grayscale_close, Mask};
use tracing::debug;

use crate::config::EnhanceConfig;

/// Sigma for the 3x3 smoothing kernel
const BLUR_SIGMA: f32 = 0.8;

/// Structuring element for the blackhat operation, wide and short to match
/// the aspect of printed text runs
const BLACKHAT_KERNEL: (u8, u8) = (13, 5);

/// Enhance a greyscale bitmap for recognition.
///
/// Applies a small Gaussian blur, then a blackhat operation with a 13x5
/// rectangular structuring element. Dense dark-on-light text regions come
/// out bright against a near-black background. Contrast binarization is
/// available behind [`EnhanceConfig::adaptive_threshold`] but off by
/// default.
pub fn enhance(bitmap: &GrayImage, config: &EnhanceConfig) -> GrayImage {
    let (width, height) = bitmap.dimensions();

    let blurred = gaussian_blur_f32(bitmap, BLUR_SIGMA);

    // Blackhat: closing minus source, reveals regions darker than their
    // local surroundings
    let mask = blackhat_mask();
    let closed = grayscale_close(&blurred, &mask);
    let mut enhanced = GrayImage::new(width, height);
    for (x, y, pixel) in enhanced.enumerate_pixels_mut() {
        pixel.0[0] = closed.get_pixel(x, y).0[0].saturating_sub(blurred.get_pixel(x, y).0[0]);
    }

    let mut enhanced = if config.adaptive_threshold {
        debug!(
            "applying adaptive threshold, block radius {}",
            config.adaptive_block_radius
        );
        adaptive_threshold(&enhanced, config.adaptive_block_radius)
    } else {
        enhanced
    };

    // Intermediate operations must not change the bitmap dimensions the
    // engine sees
    if enhanced.dimensions() != (width, height) {
        enhanced = imageops::resize(&enhanced, width, height, FilterType::Triangle);
    }

    enhanced
}

/// 13x5 rectangular structuring element anchored at its midpoint
fn blackhat_mask() -> Mask {
    let (width, height) = BLACKHAT_KERNEL;
    let element = GrayImage::from_pixel(width as u32, height as u32, Luma([255u8]));
    Mask::from_image(&element, width / 2, height / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_like_image() -> GrayImage {
        // Light background with a dark vertical stroke through the middle
        let mut image = GrayImage::from_pixel(32, 32, image::Luma([200u8]));
        for y in 4..28 {
            for x in 15..18 {
                image.put_pixel(x, y, image::Luma([30u8]));
            }
        }
        image
    }

    #[test]
    fn preserves_dimensions() {
        let image = text_like_image();
        let enhanced = enhance(&image, &EnhanceConfig::default());
        assert_eq!(enhanced.dimensions(), image.dimensions());
    }

    #[test]
    fn is_deterministic() {
        let image = text_like_image();
        let config = EnhanceConfig::default();
        assert_eq!(enhance(&image, &config), enhance(&image, &config));
    }

    #[test]
    fn blackhat_lifts_dark_strokes() {
        let image = text_like_image();
        let enhanced = enhance(&image, &EnhanceConfig::default());
        let stroke = enhanced.get_pixel(16, 16).0[0];
        let background = enhanced.get_pixel(3, 3).0[0];
        assert!(
            stroke > background,
            "stroke {} should outshine background {}",
            stroke,
            background
        );
    }

    #[test]
    fn blackhat_removes_only_features_smaller_than_kernel() {
        // Two full-width dark bands: one thinner than the 5-pixel kernel
        // height, one taller. Closing only fills the thin one.
        let mut image = GrayImage::from_pixel(32, 32, image::Luma([200u8]));
        for x in 0..32 {
            for y in 6..9 {
                image.put_pixel(x, y, image::Luma([30u8]));
            }
            for y in 18..27 {
                image.put_pixel(x, y, image::Luma([30u8]));
            }
        }

        let enhanced = enhance(&image, &EnhanceConfig::default());
        let thin_band = enhanced.get_pixel(16, 7).0[0];
        let thick_band = enhanced.get_pixel(16, 22).0[0];
        assert!(
            thin_band > 100,
            "thin band should be lifted, got {}",
            thin_band
        );
        assert!(
            thick_band < 20,
            "band taller than the kernel should survive closing, got {}",
            thick_band
        );
    }

    #[test]
    fn blackhat_keeps_features_anchored() {
        // A midpoint-anchored structuring element must not shift features
        let mut image = GrayImage::from_pixel(32, 32, image::Luma([200u8]));
        image.put_pixel(16, 16, image::Luma([0u8]));

        let enhanced = enhance(&image, &EnhanceConfig::default());
        let brightest = enhanced
            .enumerate_pixels()
            .max_by_key(|(_, _, p)| p.0[0])
            .map(|(x, y, _)| (x, y))
            .unwrap();
        assert_eq!(brightest, (16, 16));
    }

    #[test]
    fn uniform_input_yields_flat_output() {
        let image = GrayImage::from_pixel(24, 24, image::Luma([128u8]));
        let enhanced = enhance(&image, &EnhanceConfig::default());
        assert!(enhanced.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn threshold_disabled_by_default() {
        let image = text_like_image();
        let default_output = enhance(&image, &EnhanceConfig::default());
        let explicit_off = enhance(
            &image,
            &EnhanceConfig {
                adaptive_threshold: false,
                ..Default::default()
            },
        );
        assert_eq!(default_output, explicit_off);
    }

    #[test]
    fn threshold_binarizes_when_enabled() {
        let image = text_like_image();
        let config = EnhanceConfig {
            adaptive_threshold: true,
            ..Default::default()
        };
        let enhanced = enhance(&image, &config);
        assert!(enhanced.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }
}
