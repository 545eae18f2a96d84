//! Recognition-engine capability traits
//!
//! The pipeline never constructs an OCR engine; the caller injects one and
//! keeps ownership of its lifecycle. The pipeline only drives the engine's
//! per-invocation state: feed an image, read results, clear state afterwards.

use image::GrayImage;
use thiserror::Error;

/// Unexpected fault raised by the recognition engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineFault {
    /// The engine has no recognition state to operate on. This is the
    /// secondary fault tolerated during best-effort recovery.
    #[error("engine has no recognition state to operate on")]
    MissingState,
    /// Backend failure with diagnostic detail
    #[error("recognition engine failure: {0}")]
    Recognition(String),
}

/// Axis-aligned bounding rectangle reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Recognition granularity, coarsest to finest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLevel {
    /// Text region (block)
    Region,
    /// Line of text
    TextLine,
    /// Single word
    Word,
    /// Strip within a line
    Strip,
    /// Single symbol (character)
    Symbol,
}

/// Stateful iterator over recognized symbols.
///
/// The cursor is a scoped engine resource: `begin` positions it on the first
/// element, `advance` steps to the next one, and `dispose` releases it. Use
/// [`CursorGuard`] rather than calling `dispose` by hand; the guard releases
/// the cursor exactly once on every exit path.
pub trait ResultCursor {
    /// Position the cursor on the first recognized element
    fn begin(&mut self);

    /// Step to the next element at the given level; `false` when exhausted
    fn advance(&mut self, level: PageLevel) -> Result<bool, EngineFault>;

    /// Bounding box of the element under the cursor, `None` when the cursor
    /// is not positioned on any element
    fn bounding_box(&mut self, level: PageLevel) -> Result<Option<BoundingBox>, EngineFault>;

    /// Release the cursor. Called by [`CursorGuard`] on drop.
    fn dispose(&mut self);
}

/// Release-on-drop wrapper around a [`ResultCursor`].
///
/// Guarantees the cursor is disposed exactly once whether iteration finishes
/// normally, finds nothing, or bails out early on a fault.
pub struct CursorGuard {
    cursor: Box<dyn ResultCursor>,
}

impl CursorGuard {
    pub fn new(cursor: Box<dyn ResultCursor>) -> Self {
        Self { cursor }
    }
}

impl std::ops::Deref for CursorGuard {
    type Target = dyn ResultCursor;

    fn deref(&self) -> &Self::Target {
        &*self.cursor
    }
}

impl std::ops::DerefMut for CursorGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.cursor
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        self.cursor.dispose();
    }
}

/// Capability set of an external text-recognition engine.
///
/// One invocation of the pipeline holds the engine exclusively; callers must
/// not issue overlapping requests against the same instance.
pub trait OcrEngine {
    /// Feed the image to recognize
    fn set_image(&mut self, image: &GrayImage) -> Result<(), EngineFault>;

    /// Recognized text for the current image. `None` or an empty string
    /// means nothing was recognized, which is an expected outcome.
    fn text(&mut self) -> Result<Option<String>, EngineFault>;

    /// Per-word confidence values, ordered like the word bounding boxes
    fn word_confidences(&mut self) -> Result<Vec<i32>, EngineFault>;

    /// Mean confidence over the recognized text
    fn mean_confidence(&mut self) -> Result<i32, EngineFault>;

    /// Bounding boxes at the given granularity (region, line, word, strip)
    fn bounding_boxes(&mut self, level: PageLevel) -> Result<Vec<BoundingBox>, EngineFault>;

    /// Obtain the symbol-level result cursor for the current image
    fn result_cursor(&mut self) -> Result<Box<dyn ResultCursor>, EngineFault>;

    /// Best-effort reset of internal recognition state after a fault.
    /// A [`EngineFault::MissingState`] return is tolerated by the pipeline.
    fn reset(&mut self) -> Result<(), EngineFault>;

    /// Clear per-invocation state. Invoked exactly once per pipeline run as
    /// terminal cleanup, on every outcome path. Must not fail.
    fn clear_state(&mut self);
}

/// Hooks back into the controller that owns the recognition engine
pub trait EngineController: Send + Sync {
    /// Halt any continuous-recognition mode after an unexpected engine fault
    fn halt_continuous_mode(&self);
}
