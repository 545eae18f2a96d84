//! snapocr - single-shot OCR recognition pipeline
//!
//! Takes one raw camera frame, enhances it for text recognition, drives an
//! injected OCR engine, and delivers a structured result to a consumer
//! channel. The pipeline never owns the engine's lifecycle and never raises:
//! every invocation resolves to exactly one tagged success/failure message
//! (or a silent skip when the consumer has detached), with engine cleanup
//! guaranteed on every path.

pub mod capture;
pub mod config;
pub mod shared;
pub mod vision;

pub use capture::{CropRect, LuminanceSource, PlanarLuminanceSource, RawFrame};
pub use config::{EnhanceConfig, RecognitionConfig};
pub use shared::{ChannelSink, OutcomeSink, RecognitionMessage};
pub use vision::engine::{
    BoundingBox, CursorGuard, EngineController, EngineFault, OcrEngine, PageLevel, ResultCursor,
};
pub use vision::recognize::{RecognitionTask, SharedEngine};
pub use vision::result::RecognitionResult;
