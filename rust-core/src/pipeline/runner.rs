//! Threaded driver connecting a record source to the frame channel
//!
//! Ingestion runs on its own thread, independent of whichever context owns
//! the display surface. Completed frames cross over on an unbounded mpsc
//! channel, which preserves completion order and never drops a frame; the
//! consumer pumps them into its sink at its own cadence.

use super::{DisplayFrame, FramePipeline};
use crate::ingest::{RecordSource, SensorRecord};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Idle backoff when the source has nothing to deliver
const POLL_BACKOFF: Duration = Duration::from_micros(100);

/// Backoff after a transport-side error before polling again
const ERROR_BACKOFF: Duration = Duration::from_millis(10);

/// Shared access to a running pipeline for push-style producers
///
/// A transport callback (the original delivery model) ingests through this
/// handle concurrently with the polling thread; the pipeline mutex is the
/// single critical section serializing pushes and window extraction, and
/// frames are sent while it is held so cross-producer completion order is
/// preserved on the channel.
#[derive(Clone)]
pub struct PipelineHandle {
    pipeline: Arc<Mutex<FramePipeline>>,
    sender: Sender<DisplayFrame>,
}

impl PipelineHandle {
    /// Decode and ingest one raw payload; returns frames emitted
    pub fn ingest_payload(&self, payload: &[u8]) -> usize {
        let Ok(mut pipeline) = self.pipeline.lock() else {
            return 0;
        };
        let frames = pipeline.handle_payload(payload);
        let emitted = frames.len();
        for frame in frames {
            if self.sender.send(frame).is_err() {
                break;
            }
        }
        emitted
    }

    /// Ingest one already-decoded record; returns frames emitted
    pub fn ingest_record(&self, record: &SensorRecord) -> usize {
        let Ok(mut pipeline) = self.pipeline.lock() else {
            return 0;
        };
        let frames = pipeline.handle_record(record);
        let emitted = frames.len();
        for frame in frames {
            if self.sender.send(frame).is_err() {
                break;
            }
        }
        emitted
    }
}

/// Owns the ingestion thread and the pipeline lifecycle
///
/// `stop()` (or drop) flips the running flag, joins the thread, and shuts
/// the pipeline down, discarding any partial window.
pub struct PipelineRunner {
    pipeline: Arc<Mutex<FramePipeline>>,
    sender: Sender<DisplayFrame>,
    running: Arc<AtomicBool>,
    ingest_thread: Option<JoinHandle<()>>,
}

impl PipelineRunner {
    /// Start the ingestion thread over `source`
    ///
    /// Returns the runner and the receiving end of the frame channel; the
    /// receiver belongs to the single context that owns the renderer.
    pub fn spawn<S>(pipeline: FramePipeline, mut source: S) -> (Self, Receiver<DisplayFrame>)
    where
        S: RecordSource + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let pipeline = Arc::new(Mutex::new(pipeline));
        let running = Arc::new(AtomicBool::new(true));

        let thread_pipeline = Arc::clone(&pipeline);
        let thread_sender = sender.clone();
        let thread_running = Arc::clone(&running);

        let handle = std::thread::spawn(move || {
            'ingest: while thread_running.load(Ordering::SeqCst) {
                match source.next_record() {
                    Ok(Some(record)) => {
                        // Send while holding the lock: frames from this
                        // thread and from push handles reach the channel
                        // in window-completion order
                        let Ok(mut pipeline) = thread_pipeline.lock() else {
                            break 'ingest;
                        };
                        for frame in pipeline.handle_record(&record) {
                            if thread_sender.send(frame).is_err() {
                                // Receiver gone; nothing left to feed
                                break 'ingest;
                            }
                        }
                    }
                    Ok(None) => std::thread::sleep(POLL_BACKOFF),
                    Err(e) => {
                        // Transport outages are the adapter's problem; we
                        // just see a gap and resume when records return
                        log::warn!("record source error: {}", e);
                        std::thread::sleep(ERROR_BACKOFF);
                    }
                }
            }

            if let Ok(mut pipeline) = thread_pipeline.lock() {
                pipeline.shutdown();
            }
        });

        let runner = Self {
            pipeline,
            sender,
            running,
            ingest_thread: Some(handle),
        };
        (runner, receiver)
    }

    /// Handle for push-style producers feeding the same pipeline
    pub fn handle(&self) -> PipelineHandle {
        PipelineHandle {
            pipeline: Arc::clone(&self.pipeline),
            sender: self.sender.clone(),
        }
    }

    /// Stop ingestion, join the thread, and shut the pipeline down
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.ingest_thread.take() {
            let _ = handle.join();
        }

        // The thread shuts the pipeline down on exit; repeat here in case
        // it left early on a poisoned lock or dropped receiver
        if let Ok(mut pipeline) = self.pipeline.lock() {
            pipeline.shutdown();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst) && self.ingest_thread.is_some()
    }
}

impl Drop for PipelineRunner {
    fn drop(&mut self) {
        self.stop();
    }
}
