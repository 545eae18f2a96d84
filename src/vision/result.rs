//! Structured output of one recognition run

use image::GrayImage;

use crate::vision::engine::BoundingBox;

/// Result record for a single recognition invocation.
///
/// Built once per run and populated field by field while the engine is
/// driven; the consumer only ever sees the finished record inside a
/// [`RecognitionMessage`](crate::shared::RecognitionMessage). On failure the
/// record is delivered empty: no text, no box collections.
#[derive(Debug, Clone, Default)]
pub struct RecognitionResult {
    /// Recognized text, uppercased; present only on success
    pub text: Option<String>,
    /// Per-word confidence values, ordered like `word_boxes`
    pub word_confidences: Vec<i32>,
    /// Mean confidence over the recognized text
    pub mean_confidence: i32,
    /// Bounding boxes of recognized regions
    pub region_boxes: Vec<BoundingBox>,
    /// Bounding boxes of recognized text lines
    pub line_boxes: Vec<BoundingBox>,
    /// Bounding boxes of recognized words
    pub word_boxes: Vec<BoundingBox>,
    /// Bounding boxes of recognized strips
    pub strip_boxes: Vec<BoundingBox>,
    /// Bounding boxes of recognized symbols, collected via cursor iteration
    pub character_boxes: Vec<BoundingBox>,
    /// The enhanced bitmap that was fed to the engine, kept for display
    pub image: Option<GrayImage>,
    /// Wall-clock duration of decode, enhancement and recognition
    pub recognition_time_ms: u64,
}
