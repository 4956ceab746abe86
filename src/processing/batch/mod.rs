mod engine;
mod sink;

pub use engine::{run_batch, BatchEngine, RunHandle};
pub use sink::{CancelToken, ChannelSink, ProgressSink};
