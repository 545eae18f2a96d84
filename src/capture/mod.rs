//! Capture Layer
//!
//! Raw frame data handed in by the camera owner, plus the luminance-source
//! capability that turns a frame buffer into a greyscale bitmap for
//! recognition. Frame acquisition itself lives outside this crate.

pub mod frame;
pub mod luminance;

pub use frame::RawFrame;
pub use luminance::{CropRect, LuminanceSource, PlanarLuminanceSource};
