//! Vibroscope - Streaming Vibration Spectrum Core
//!
//! Buffers a live stream of vibration samples and temperature readings,
//! transforms each completed window into a band-limited amplitude spectrum,
//! and emits display frames annotated with a temperature alert. The
//! messaging transport and the plot backend are external collaborators
//! wired in through the `ingest` and `render` seams.

pub mod alert;
pub mod buffer;
pub mod config;
pub mod ingest;
pub mod pipeline;
pub mod render;
pub mod spectrum;

pub use config::PipelineConfig;
pub use ingest::{RecordDecoder, SensorRecord};
pub use pipeline::{DisplayFrame, FramePipeline, PipelineRunner};
pub use render::{DisplayBounds, FrameSink};
pub use spectrum::SpectralFrame;
