//! Record source seam between the transport and the pipeline
//!
//! The messaging transport (connection, subscription, reconnection) lives
//! outside this crate; it feeds the pipeline through `RecordSource` so the
//! state machine runs the same against a live broker or a test script.

use super::record::SensorRecord;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Pull interface for decoded records
///
/// `Ok(None)` means no record is available right now; the driver keeps
/// polling. Delivery gaps during a transport outage surface as a run of
/// `Ok(None)` and the pipeline simply resumes when records reappear.
pub trait RecordSource: Send {
    fn next_record(&mut self) -> Result<Option<SensorRecord>, SourceError>;
}

/// In-memory source replaying a fixed sequence of records
///
/// Backs tests and offline replay; returns `Ok(None)` forever once drained.
pub struct ScriptedSource {
    records: VecDeque<SensorRecord>,
}

impl ScriptedSource {
    pub fn new(records: Vec<SensorRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl RecordSource for ScriptedSource {
    fn next_record(&mut self) -> Result<Option<SensorRecord>, SourceError> {
        Ok(self.records.pop_front())
    }
}
