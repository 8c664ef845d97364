//! Flush notifier: a sink that signals when a compacted segment should be
//! flushed. Backed by an unbounded channel so the completion handler's send
//! is always non-blocking — the downstream is expected to drain.

use cc_core::SegmentId;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct FlushSink {
    tx: mpsc::UnboundedSender<SegmentId>,
}

impl FlushSink {
    pub fn new(tx: mpsc::UnboundedSender<SegmentId>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (FlushSink, mpsc::UnboundedReceiver<SegmentId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (FlushSink::new(tx), rx)
    }

    /// Emit a segment for flushing. Never blocks; a closed receiver (the
    /// downstream having shut down) is silently dropped rather than treated
    /// as a completion-handler error.
    pub fn notify(&self, segment_id: SegmentId) {
        let _ = self.tx.send(segment_id);
    }
}
