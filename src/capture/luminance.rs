//! Luminance-source capability for frame decoding
//!
//! A luminance source converts a raw camera buffer into a single-channel
//! greyscale bitmap. Decode failure is signalled with `None` and terminates
//! the recognition pipeline before any engine call is made.

use image::GrayImage;
use tracing::debug;

/// Capability that decodes a raw pixel buffer into a greyscale bitmap.
///
/// Implementations return `None` when the buffer cannot produce an image
/// (empty or truncated data, zero dimensions, invalid crop window).
pub trait LuminanceSource: Send + Sync {
    /// Decode a raw buffer with declared dimensions into a greyscale bitmap
    fn decode(&self, data: &[u8], width: u32, height: u32) -> Option<GrayImage>;
}

/// Crop window applied after decoding, in full-frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Luminance source for planar camera buffers.
///
/// Reads the leading `width * height` bytes as an 8-bit luminance plane.
/// Camera buffers commonly carry chroma planes after the luma plane; those
/// trailing bytes are ignored. An optional crop window restricts the decoded
/// bitmap to the framing rectangle the capture owner displays.
#[derive(Debug, Clone, Default)]
pub struct PlanarLuminanceSource {
    crop: Option<CropRect>,
}

impl PlanarLuminanceSource {
    /// Create a source decoding the full frame
    pub fn new() -> Self {
        Self { crop: None }
    }

    /// Create a source that crops the decoded frame to the given window
    pub fn with_crop(crop: CropRect) -> Self {
        Self { crop: Some(crop) }
    }
}

impl LuminanceSource for PlanarLuminanceSource {
    fn decode(&self, data: &[u8], width: u32, height: u32) -> Option<GrayImage> {
        if width == 0 || height == 0 {
            return None;
        }
        let plane_len = (width as usize).checked_mul(height as usize)?;
        if data.len() < plane_len {
            debug!(
                "luminance buffer too short: {} bytes for {}x{} frame",
                data.len(),
                width,
                height
            );
            return None;
        }

        let full = GrayImage::from_raw(width, height, data[..plane_len].to_vec())?;

        match self.crop {
            None => Some(full),
            Some(crop) => {
                if crop.width == 0
                    || crop.height == 0
                    || crop.x.checked_add(crop.width)? > width
                    || crop.y.checked_add(crop.height)? > height
                {
                    debug!("crop window {:?} outside {}x{} frame", crop, width, height);
                    return None;
                }
                let cropped =
                    image::imageops::crop_imm(&full, crop.x, crop.y, crop.width, crop.height)
                        .to_image();
                Some(cropped)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_luma_plane() {
        let data = vec![7u8; 4 * 3];
        let source = PlanarLuminanceSource::new();
        let image = source.decode(&data, 4, 3).unwrap();
        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.get_pixel(3, 2).0[0], 7);
    }

    #[test]
    fn ignores_trailing_chroma_bytes() {
        // NV21-style buffer: luma plane followed by interleaved chroma
        let mut data = vec![10u8; 4 * 4];
        data.extend_from_slice(&[128u8; 8]);
        let source = PlanarLuminanceSource::new();
        let image = source.decode(&data, 4, 4).unwrap();
        assert_eq!(image.dimensions(), (4, 4));
        assert!(image.pixels().all(|p| p.0[0] == 10));
    }

    #[test]
    fn rejects_empty_buffer() {
        let source = PlanarLuminanceSource::new();
        assert!(source.decode(&[], 4, 4).is_none());
    }

    #[test]
    fn rejects_truncated_buffer() {
        let source = PlanarLuminanceSource::new();
        assert!(source.decode(&[0u8; 15], 4, 4).is_none());
    }

    #[test]
    fn rejects_zero_dimensions() {
        let source = PlanarLuminanceSource::new();
        assert!(source.decode(&[0u8; 16], 0, 4).is_none());
        assert!(source.decode(&[0u8; 16], 4, 0).is_none());
    }

    #[test]
    fn crops_to_window() {
        let mut data = vec![0u8; 6 * 4];
        // Mark the pixel at (2, 1)
        data[6 + 2] = 200;
        let source = PlanarLuminanceSource::with_crop(CropRect {
            x: 2,
            y: 1,
            width: 3,
            height: 2,
        });
        let image = source.decode(&data, 6, 4).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0).0[0], 200);
    }

    #[test]
    fn rejects_crop_outside_frame() {
        let source = PlanarLuminanceSource::with_crop(CropRect {
            x: 4,
            y: 0,
            width: 4,
            height: 4,
        });
        assert!(source.decode(&[0u8; 36], 6, 6).is_none());
    }
}
