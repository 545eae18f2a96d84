//! Shared messaging between the recognition pipeline and its consumer

pub mod messages;

pub use messages::{ChannelSink, OutcomeSink, RecognitionMessage};
