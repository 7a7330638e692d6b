//! Bounded recent-history window of temperature readings

use std::collections::VecDeque;

/// Ring-semantics FIFO of the most recent temperature readings
///
/// Holds at most `capacity` entries; pushing past capacity evicts the
/// oldest reading first.
pub struct TempHistory {
    readings: VecDeque<f64>,
    capacity: usize,
}

impl TempHistory {
    /// Create a history with fixed capacity C (must be > 0, enforced by
    /// config validation upstream)
    pub fn new(capacity: usize) -> Self {
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert a reading at the newest end, evicting the oldest at capacity
    pub fn push(&mut self, temp: f64) {
        if self.readings.len() == self.capacity {
            self.readings.pop_front();
        }
        self.readings.push_back(temp);
    }

    /// Arithmetic mean of the current contents, or 0.0 when empty
    ///
    /// The empty-history zero is a sentinel for "no data yet", not an
    /// error.
    pub fn average(&self) -> f64 {
        if self.readings.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.readings.iter().sum();
        sum / self.readings.len() as f64
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Readings in insertion order, oldest first
    #[cfg(test)]
    pub fn contents(&self) -> Vec<f64> {
        self.readings.iter().copied().collect()
    }
}
