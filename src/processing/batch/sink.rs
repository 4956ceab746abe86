use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::UnboundedSender;
use crate::core::BatchEvent;

/// Receives engine events on the worker thread, in emission order.
pub trait ProgressSink: Send {
    fn emit(&mut self, event: BatchEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(BatchEvent) + Send,
{
    fn emit(&mut self, event: BatchEvent) {
        self(event)
    }
}

/// Forwards events over a channel to the notifying side.
pub struct ChannelSink(pub UnboundedSender<BatchEvent>);

impl ProgressSink for ChannelSink {
    fn emit(&mut self, event: BatchEvent) {
        // A dropped receiver just means nobody is listening any more.
        let _ = self.0.send(event);
    }
}

/// Cooperative cancellation flag, checked between tasks.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
