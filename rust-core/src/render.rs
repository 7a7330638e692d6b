//! Renderer-facing seam
//!
//! The actual display surface lives outside this crate and is owned by a
//! single consumer context. The core hands it immutable display frames in
//! completion order through `FrameSink`; the drawing cadence and plot
//! technology are the sink's concern.

use crate::pipeline::DisplayFrame;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

/// Static axis bounds handed to the sink once, before any frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayBounds {
    /// Upper edge of the frequency axis (Fmax)
    pub freq_max_hz: f64,

    /// Spacing of frequency-axis ticks
    pub tick_hz: f64,
}

impl Default for DisplayBounds {
    fn default() -> Self {
        Self {
            freq_max_hz: 500.0,
            tick_hz: 25.0,
        }
    }
}

/// Consumer of emitted display frames
pub trait FrameSink {
    /// Receives the static display bounds before the first frame
    fn attach(&mut self, _bounds: &DisplayBounds) {}

    /// Receives one completed frame; called in window-completion order
    fn on_frame(&mut self, frame: &DisplayFrame);
}

/// Sink that reports each frame through the log facade
///
/// Useful as a headless stand-in when no plot backend is attached.
pub struct LogSink;

impl FrameSink for LogSink {
    fn on_frame(&mut self, frame: &DisplayFrame) {
        let (peak_freq, peak_amp) = frame.spectrum.peak().unwrap_or((0.0, 0.0));
        log::info!(
            "frame: {} bins, peak {:.3} @ {:.1} Hz, avg temp {:.1}, alert {}",
            frame.spectrum.len(),
            peak_amp,
            peak_freq,
            frame.avg_temperature,
            frame.alert
        );
    }
}

/// Sink that retains every delivered frame, in order
///
/// The collected frames are shared behind a handle so a test can inspect
/// them after the consumer context finishes.
#[derive(Default)]
pub struct CollectingSink {
    frames: Arc<Mutex<Vec<DisplayFrame>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the shared frame store
    pub fn frames_handle(&self) -> Arc<Mutex<Vec<DisplayFrame>>> {
        Arc::clone(&self.frames)
    }

    /// Snapshot of the frames collected so far
    pub fn collected(&self) -> Vec<DisplayFrame> {
        self.frames.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

impl FrameSink for CollectingSink {
    fn on_frame(&mut self, frame: &DisplayFrame) {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(frame.clone());
        }
    }
}

/// Drain every frame currently queued on `receiver` into `sink`
///
/// Non-blocking; returns the number of frames delivered. The receiver end
/// of the runner's channel belongs to the context that owns the display
/// surface, and this is its per-tick pump.
pub fn deliver_pending(receiver: &Receiver<DisplayFrame>, sink: &mut dyn FrameSink) -> usize {
    let mut delivered = 0;
    while let Ok(frame) = receiver.try_recv() {
        sink.on_frame(&frame);
        delivered += 1;
    }
    delivered
}
