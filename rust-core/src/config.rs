//! Pipeline configuration and startup-time validation
//!
//! All constants are owned by the deployment; the core only validates them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("window size must be greater than zero")]
    ZeroWindowSize,

    #[error("temperature history capacity must be greater than zero")]
    ZeroTempCapacity,

    #[error("sample rate must be positive (got {0} Hz)")]
    NonPositiveSampleRate(f64),

    #[error("frequency cutoff must be non-negative (got {0} Hz)")]
    NegativeFreqCutoff(f64),

    #[error("frequency cutoff {cutoff_hz} Hz must lie below Nyquist ({nyquist_hz} Hz)")]
    CutoffAboveNyquist { cutoff_hz: f64, nyquist_hz: f64 },
}

/// Configuration for the frame pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Window size N (samples per spectral frame)
    pub window_size: usize,

    /// Sampling rate Fs in Hz
    pub sample_rate_hz: f64,

    /// Frequency cutoff Fmax in Hz; bins above it are discarded
    pub freq_cutoff_hz: f64,

    /// Temperature history capacity C
    pub temp_capacity: usize,

    /// Alert threshold T in the temperature unit of the feed
    pub alert_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: 1000,
            sample_rate_hz: 1000.0,
            // One bin below Nyquist: bin 500 of a 1000-sample transform at
            // 1000 Hz is the Nyquist bin, which the cutoff must exclude
            freq_cutoff_hz: 499.0,
            temp_capacity: 1000,
            alert_threshold: 100.0,
        }
    }
}

impl PipelineConfig {
    /// Validate the constants against the constraints N > 0, C > 0,
    /// Fs > 0 and Fmax < Fs/2
    ///
    /// Violations are startup errors; a pipeline is never constructed
    /// from an invalid config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        if self.temp_capacity == 0 {
            return Err(ConfigError::ZeroTempCapacity);
        }
        if self.sample_rate_hz <= 0.0 {
            return Err(ConfigError::NonPositiveSampleRate(self.sample_rate_hz));
        }
        if self.freq_cutoff_hz < 0.0 {
            return Err(ConfigError::NegativeFreqCutoff(self.freq_cutoff_hz));
        }
        let nyquist_hz = self.sample_rate_hz / 2.0;
        if self.freq_cutoff_hz >= nyquist_hz {
            return Err(ConfigError::CutoffAboveNyquist {
                cutoff_hz: self.freq_cutoff_hz,
                nyquist_hz,
            });
        }
        Ok(())
    }

    /// Frequency spacing between adjacent bins (Fs/N)
    pub fn bin_width_hz(&self) -> f64 {
        self.sample_rate_hz / self.window_size as f64
    }
}
