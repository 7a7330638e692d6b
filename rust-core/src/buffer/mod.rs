//! Sample and temperature buffering

pub mod sample_queue;
pub mod temp_history;

pub use sample_queue::SampleQueue;
pub use temp_history::TempHistory;
