pub mod batch;
pub mod grid;
pub mod output_path;
pub mod raster;
pub mod resolver;

pub use batch::{run_batch, BatchEngine, CancelToken, ChannelSink, ProgressSink, RunHandle};
pub use grid::{tiles, Rect, Tile};
pub use output_path::{derive_folder, output_folder, run_timestamp, tile_file_name};
pub use resolver::resolve;
