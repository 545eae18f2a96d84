//! Message types for delivering recognition outcomes
//!
//! One tagged message flows producer to consumer per invocation. Delivery is
//! best-effort: a detached consumer (no sink, or a dropped receiver) makes
//! the dispatch a silent no-op, never an error.

use tokio::sync::mpsc;
use tracing::debug;

use crate::vision::result::RecognitionResult;

/// Tagged outcome of one recognition invocation
#[derive(Debug)]
pub enum RecognitionMessage {
    /// Recognition produced text; the result carries all collections
    Succeeded(RecognitionResult),
    /// Recognition failed; the result is empty
    Failed(RecognitionResult),
}

impl RecognitionMessage {
    /// Whether this message carries a successful outcome
    pub fn is_success(&self) -> bool {
        matches!(self, RecognitionMessage::Succeeded(_))
    }

    /// The result record, whatever the tag
    pub fn result(&self) -> &RecognitionResult {
        match self {
            RecognitionMessage::Succeeded(result) | RecognitionMessage::Failed(result) => result,
        }
    }
}

/// Consumer-side delivery capability.
///
/// The pipeline calls `deliver` exactly once per invocation when a sink is
/// attached, then `dismiss_progress` so the consumer can drop any progress
/// indicator it is showing. Both calls must be no-throw.
pub trait OutcomeSink: Send {
    /// Deliver the tagged outcome message
    fn deliver(&self, message: RecognitionMessage);

    /// Dismiss the progress indicator owned by the consumer, if any
    fn dismiss_progress(&self);
}

/// Sink that forwards outcomes over a tokio channel.
///
/// A closed channel (receiver dropped) is treated as a detached consumer and
/// the message is discarded silently.
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<RecognitionMessage>,
}

impl ChannelSink {
    pub fn new(sender: mpsc::UnboundedSender<RecognitionMessage>) -> Self {
        Self { sender }
    }
}

impl OutcomeSink for ChannelSink {
    fn deliver(&self, message: RecognitionMessage) {
        if self.sender.send(message).is_err() {
            debug!("recognition consumer detached, dropping outcome");
        }
    }

    fn dismiss_progress(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_sink_forwards_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);
        sink.deliver(RecognitionMessage::Failed(RecognitionResult::default()));
        let message = rx.recv().await.unwrap();
        assert!(!message.is_success());
        assert!(message.result().text.is_none());
    }

    #[test]
    fn channel_sink_tolerates_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let sink = ChannelSink::new(tx);
        sink.deliver(RecognitionMessage::Succeeded(RecognitionResult::default()));
    }
}
