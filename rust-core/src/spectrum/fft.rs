//! FFT engine using realfft for real-valued vibration windows
//!
//! Plans the transform once and reuses scratch buffers across windows,
//! keeping the per-frame cost at O(N log N) with no allocations.

use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    #[error("window length {actual} does not match configured size {expected}")]
    WindowLength { expected: usize, actual: usize },

    #[error("FFT processing failed: {0}")]
    Fft(String),
}

/// FFT engine for fixed-size real-valued windows
pub struct FftEngine {
    /// Window size (number of samples per transform)
    window_size: usize,

    /// Real-to-complex FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer (realfft consumes its input in place)
    input_buffer: Vec<f64>,

    /// Reusable output buffer, N/2 + 1 complex bins
    output_buffer: Vec<num_complex::Complex<f64>>,
}

impl FftEngine {
    /// Create an engine for windows of exactly `window_size` samples
    pub fn new(window_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(window_size);

        let input_buffer = vec![0.0; window_size];
        let output_buffer = vec![num_complex::Complex::new(0.0, 0.0); window_size / 2 + 1];

        Self {
            window_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Transform one window and return normalized amplitudes |X[k]| / N
    /// for the non-negative-frequency bins k = 0..N/2
    ///
    /// The input must be exactly one window long; anything else is a
    /// caller-side invariant break, reported rather than padded over.
    pub fn amplitudes(&mut self, window: &[f64]) -> Result<Vec<f64>, SpectrumError> {
        if window.len() != self.window_size {
            return Err(SpectrumError::WindowLength {
                expected: self.window_size,
                actual: window.len(),
            });
        }

        self.input_buffer.copy_from_slice(window);

        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| SpectrumError::Fft(e.to_string()))?;

        let n = self.window_size as f64;
        Ok(self.output_buffer.iter().map(|c| c.norm() / n).collect())
    }

    /// Window size this engine was planned for
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of output bins (N/2 + 1 for a real-input transform)
    pub fn num_bins(&self) -> usize {
        self.window_size / 2 + 1
    }

    /// Frequency of bin k in Hz: k * Fs / N
    pub fn bin_frequency_hz(&self, bin: usize, sample_rate_hz: f64) -> f64 {
        bin as f64 * sample_rate_hz / self.window_size as f64
    }
}
