//! Unbounded ingress queue for vibration samples
//!
//! Accumulates samples in arrival order and hands out fixed-size,
//! non-overlapping windows from the front.

use std::collections::VecDeque;

/// Queue depth at which a high-water warning is logged, as a multiple of
/// the last requested window size. Crossing it means the producer is
/// sustaining a rate the consumer cannot keep up with.
const HIGH_WATER_WINDOWS: usize = 8;

/// FIFO queue of vibration samples awaiting windowing
///
/// The queue is deliberately unbounded: over-rate input grows memory
/// rather than dropping samples. The depth is logged when it climbs past
/// a multiple of the window size so sustained overload is visible.
pub struct SampleQueue {
    samples: VecDeque<f64>,
    /// Window size the consumer last asked for; sizes the high-water mark
    window_hint: usize,
    high_water_logged: bool,
}

impl SampleQueue {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::new(),
            window_hint: 0,
            high_water_logged: false,
        }
    }

    /// Append samples to the back of the queue, preserving order
    ///
    /// Never blocks and never fails on finite numeric input.
    pub fn push_slice(&mut self, values: &[f64]) {
        self.samples.extend(values.iter().copied());
        self.check_high_water();
    }

    /// Pop exactly the `n` oldest samples if at least `n` are queued
    ///
    /// Returns `None` without touching the queue when fewer than `n`
    /// samples have accumulated. On success the returned window holds the
    /// removed samples in their original arrival order.
    pub fn try_extract_window(&mut self, n: usize) -> Option<Vec<f64>> {
        self.window_hint = n;
        if self.samples.len() < n {
            return None;
        }

        let window: Vec<f64> = self.samples.drain(..n).collect();
        self.check_high_water();
        Some(window)
    }

    /// Warn once each time the backlog climbs past the high-water mark
    ///
    /// Runs on push as well as after extraction so an over-rate burst is
    /// reported when it arrives, not a window later.
    fn check_high_water(&mut self) {
        if self.window_hint == 0 {
            return;
        }
        let depth = self.samples.len();
        if depth >= self.window_hint * HIGH_WATER_WINDOWS {
            if !self.high_water_logged {
                log::warn!(
                    "sample queue backlog at {} samples ({} windows); producer outpacing consumer",
                    depth,
                    depth / self.window_hint
                );
                self.high_water_logged = true;
            }
        } else {
            self.high_water_logged = false;
        }
    }

    /// Number of samples currently queued
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all queued samples (shutdown path; no partial window is emitted)
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for SampleQueue {
    fn default() -> Self {
        Self::new()
    }
}
