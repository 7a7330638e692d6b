//! Decoding of incoming sensor payloads

pub mod record;
pub mod source;

pub use record::{DecodeError, RecordDecoder, SensorRecord};
pub use source::{RecordSource, ScriptedSource, SourceError};
