//! Vision/OCR Layer
//!
//! The recognition pipeline proper: frame enhancement, engine invocation and
//! result assembly. The engine itself is an injected capability
//! ([`engine::OcrEngine`]); this layer owns only its per-invocation state.

pub mod engine;
pub mod preprocess;
pub mod recognize;
pub mod result;

pub use engine::{
    BoundingBox, CursorGuard, EngineController, EngineFault, OcrEngine, PageLevel, ResultCursor,
};
pub use recognize::{RecognitionTask, SharedEngine};
pub use result::RecognitionResult;
