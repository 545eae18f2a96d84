//! Frame data structures for captured camera content

use std::time::Instant;

/// A raw frame handed to the recognition pipeline
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Raw pixel data as produced by the camera
    pub data: Vec<u8>,
    /// Declared frame width in pixels
    pub width: u32,
    /// Declared frame height in pixels
    pub height: u32,
    /// Timestamp when the frame was captured
    pub timestamp: Instant,
}

impl RawFrame {
    /// Create a new raw frame
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: Instant::now(),
        }
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
