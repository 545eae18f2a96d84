//! Single-shot recognition task
//!
//! Drives one frame through decode, enhancement and engine recognition on a
//! background worker, then delivers the tagged outcome and performs terminal
//! engine cleanup. No fault raised by any stage escapes this module; every
//! invocation resolves to exactly one dispatch decision.

use std::sync::Arc;
use std::time::Instant;

use image::GrayImage;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::capture::{LuminanceSource, RawFrame};
use crate::config::RecognitionConfig;
use crate::shared::{OutcomeSink, RecognitionMessage};
use crate::vision::engine::{
    BoundingBox, CursorGuard, EngineController, EngineFault, OcrEngine, PageLevel,
};
use crate::vision::preprocess;
use crate::vision::result::RecognitionResult;

/// Recognition engine shared with the owning controller.
///
/// The pipeline locks the engine for the whole invocation; callers must not
/// issue overlapping requests against the same instance.
pub type SharedEngine = Arc<Mutex<dyn OcrEngine + Send>>;

/// Why a pipeline stage stopped short of a successful result
#[derive(Debug, Error)]
enum StageError {
    /// The frame buffer could not be decoded into a greyscale bitmap
    #[error("frame buffer could not be decoded into a bitmap")]
    DecodeFailed,
    /// The engine recognized no text; expected, not logged as an error
    #[error("no text recognized")]
    NoText,
    /// Unexpected engine fault
    #[error(transparent)]
    Engine(#[from] EngineFault),
}

/// One-shot recognition of a single raw frame.
///
/// Built by the owning controller with an injected engine and luminance
/// source, then either [`spawn`](RecognitionTask::spawn)ed onto a blocking
/// worker or [`run`](RecognitionTask::run) directly on a caller-managed
/// thread. The task is consumed by execution; it is not re-entrant.
pub struct RecognitionTask {
    engine: SharedEngine,
    luminance: Arc<dyn LuminanceSource>,
    frame: RawFrame,
    config: RecognitionConfig,
    consumer: Option<Box<dyn OutcomeSink>>,
    controller: Option<Arc<dyn EngineController>>,
}

impl RecognitionTask {
    /// Create a task for one frame with default configuration, no consumer
    /// and no controller
    pub fn new(engine: SharedEngine, luminance: Arc<dyn LuminanceSource>, frame: RawFrame) -> Self {
        Self {
            engine,
            luminance,
            frame,
            config: RecognitionConfig::default(),
            consumer: None,
            controller: None,
        }
    }

    /// Use the given recognition configuration
    pub fn with_config(mut self, config: RecognitionConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach the consumer that receives the outcome message
    pub fn with_consumer(mut self, sink: impl OutcomeSink + 'static) -> Self {
        self.consumer = Some(Box::new(sink));
        self
    }

    /// Attach the controller to signal on unexpected engine faults
    pub fn with_controller(mut self, controller: Arc<dyn EngineController>) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Run the pipeline on a tokio blocking worker.
    ///
    /// Must be called within a tokio runtime. The returned handle completes
    /// after dispatch and cleanup have finished.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::task::spawn_blocking(move || self.run())
    }

    /// Run the pipeline to completion on the current thread.
    ///
    /// Executes the recognition stages, makes exactly one dispatch decision,
    /// and clears the engine's per-invocation state regardless of outcome.
    pub fn run(self) {
        let message = {
            let mut engine = self.engine.lock();
            self.execute(&mut *engine)
        };
        self.dispatch(message);

        // Terminal cleanup, unconditional on every outcome path
        self.engine.lock().clear_state();
    }

    fn execute(&self, engine: &mut dyn OcrEngine) -> RecognitionMessage {
        let started = Instant::now();
        match self.run_stages(engine, started) {
            Ok(result) => RecognitionMessage::Succeeded(result),
            Err(StageError::DecodeFailed) => {
                debug!("frame decode produced no bitmap, aborting recognition");
                RecognitionMessage::Failed(RecognitionResult::default())
            }
            Err(StageError::NoText) => RecognitionMessage::Failed(RecognitionResult::default()),
            Err(StageError::Engine(fault)) => {
                error!("engine fault during recognition: {fault}");
                self.recover(engine);
                RecognitionMessage::Failed(RecognitionResult::default())
            }
        }
    }

    fn run_stages(
        &self,
        engine: &mut dyn OcrEngine,
        started: Instant,
    ) -> Result<RecognitionResult, StageError> {
        let bitmap = self
            .luminance
            .decode(&self.frame.data, self.frame.width, self.frame.height)
            .ok_or(StageError::DecodeFailed)?;

        let enhanced = preprocess::enhance(&bitmap, &self.config.enhance);

        let mut result = RecognitionResult::default();
        invoke(engine, &enhanced, &mut result, &self.config)?;

        result.image = Some(enhanced);
        result.recognition_time_ms = started.elapsed().as_millis() as u64;
        debug!(
            time_ms = result.recognition_time_ms,
            words = result.word_boxes.len(),
            "recognition succeeded"
        );
        Ok(result)
    }

    /// Best-effort engine recovery after an unexpected fault. A missing-state
    /// secondary fault is tolerated; anything else is logged, never masked
    /// as the primary fault.
    fn recover(&self, engine: &mut dyn OcrEngine) {
        match engine.reset() {
            Ok(()) => {}
            Err(EngineFault::MissingState) => debug!("engine had no state left to reset"),
            Err(fault) => warn!("engine reset failed: {fault}"),
        }
        if let Some(controller) = &self.controller {
            controller.halt_continuous_mode();
        }
    }

    /// Exactly one dispatch decision per invocation: deliver if a consumer is
    /// attached, skip silently otherwise.
    fn dispatch(&self, message: RecognitionMessage) {
        let Some(sink) = &self.consumer else {
            debug!("no consumer attached, skipping outcome delivery");
            return;
        };
        sink.deliver(message);
        sink.dismiss_progress();
    }
}

/// Drive the engine over the enhanced bitmap, populating the result record
fn invoke(
    engine: &mut dyn OcrEngine,
    image: &GrayImage,
    result: &mut RecognitionResult,
    config: &RecognitionConfig,
) -> Result<(), StageError> {
    engine.set_image(image)?;

    let Some(text) = engine.text()?.filter(|t| !t.is_empty()) else {
        return Err(StageError::NoText);
    };

    result.word_confidences = engine.word_confidences()?;
    result.mean_confidence = engine.mean_confidence()?;
    result.region_boxes = engine.bounding_boxes(PageLevel::Region)?;
    result.line_boxes = engine.bounding_boxes(PageLevel::TextLine)?;
    result.word_boxes = engine.bounding_boxes(PageLevel::Word)?;
    result.strip_boxes = engine.bounding_boxes(PageLevel::Strip)?;
    result.character_boxes = collect_symbol_boxes(engine)?;
    result.text = Some(normalize_text(text, config));
    Ok(())
}

/// Iterate the symbol cursor, one bounding box per symbol. The guard releases
/// the cursor on every exit path, including mid-iteration faults.
fn collect_symbol_boxes(engine: &mut dyn OcrEngine) -> Result<Vec<BoundingBox>, EngineFault> {
    let mut cursor = CursorGuard::new(engine.result_cursor()?);
    cursor.begin();

    let mut boxes = Vec::new();
    loop {
        match cursor.bounding_box(PageLevel::Symbol)? {
            Some(bounding_box) => boxes.push(bounding_box),
            None => break,
        }
        if !cursor.advance(PageLevel::Symbol)? {
            break;
        }
    }
    Ok(boxes)
}

fn normalize_text(text: String, config: &RecognitionConfig) -> String {
    let text: String = if config.strip_whitespace {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    } else {
        text
    };
    text.to_uppercase()
}
