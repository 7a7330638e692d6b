//! Band-limited spectral frame built from one transformed window

use super::fft::{FftEngine, SpectrumError};
use serde::Serialize;

/// Amplitude spectrum of one window, restricted to [0, Fmax]
///
/// Frequencies ascend strictly; `frequencies_hz` and `amplitudes` always
/// have equal, non-zero length for a validated configuration (bin 0 at
/// 0 Hz survives any non-negative cutoff).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectralFrame {
    pub frequencies_hz: Vec<f64>,
    pub amplitudes: Vec<f64>,
}

impl SpectralFrame {
    /// Transform `window` and keep the bins whose frequency lies in
    /// [0, `freq_cutoff_hz`]
    ///
    /// The real-input transform already yields only the non-negative
    /// half of the spectrum; the cutoff truncates it further. Amplitudes
    /// are |X[k]|/N with no single-sided factor-of-two correction.
    pub fn compute(
        engine: &mut FftEngine,
        window: &[f64],
        sample_rate_hz: f64,
        freq_cutoff_hz: f64,
    ) -> Result<Self, SpectrumError> {
        let amplitudes = engine.amplitudes(window)?;

        let mut kept_frequencies = Vec::new();
        let mut kept_amplitudes = Vec::new();
        for (bin, amplitude) in amplitudes.into_iter().enumerate() {
            let frequency_hz = engine.bin_frequency_hz(bin, sample_rate_hz);
            if frequency_hz > freq_cutoff_hz {
                break;
            }
            kept_frequencies.push(frequency_hz);
            kept_amplitudes.push(amplitude);
        }

        Ok(Self {
            frequencies_hz: kept_frequencies,
            amplitudes: kept_amplitudes,
        })
    }

    /// Number of retained bins
    pub fn len(&self) -> usize {
        self.frequencies_hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies_hz.is_empty()
    }

    /// (frequency, amplitude) of the strongest bin, if any
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.amplitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, &amp)| (self.frequencies_hz[i], amp))
    }

    /// Largest amplitude in the frame, 0.0 for an all-zero window
    ///
    /// A zero maximum tells the renderer to fall back to a default axis
    /// scale instead of dividing by it.
    pub fn max_amplitude(&self) -> f64 {
        self.amplitudes.iter().copied().fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine_window(freq_hz: f64, sample_rate_hz: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate_hz).sin())
            .collect()
    }

    #[test]
    fn test_band_limit_keeps_only_cutoff_range() {
        let mut engine = FftEngine::new(1000);
        let window = sine_window(50.0, 1000.0, 1000);

        let frame = SpectralFrame::compute(&mut engine, &window, 1000.0, 400.0).unwrap();

        // Bins 0..=400 Hz at 1 Hz spacing
        assert_eq!(frame.len(), 401);
        assert_eq!(frame.frequencies_hz[0], 0.0);
        assert_eq!(*frame.frequencies_hz.last().unwrap(), 400.0);
        assert_eq!(frame.frequencies_hz.len(), frame.amplitudes.len());
    }

    #[test]
    fn test_frequencies_strictly_ascending() {
        let mut engine = FftEngine::new(256);
        let window = vec![0.5; 256];
        let frame = SpectralFrame::compute(&mut engine, &window, 1000.0, 450.0).unwrap();

        assert!(frame
            .frequencies_hz
            .windows(2)
            .all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_peak_of_sine() {
        let mut engine = FftEngine::new(1000);
        let window = sine_window(50.0, 1000.0, 1000);

        let frame = SpectralFrame::compute(&mut engine, &window, 1000.0, 500.0).unwrap();
        let (peak_freq, peak_amp) = frame.peak().unwrap();

        assert!((peak_freq - 50.0).abs() <= 1.0);
        assert!((peak_amp - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_zero_window_max_amplitude_is_zero() {
        let mut engine = FftEngine::new(128);
        let window = vec![0.0; 128];

        let frame = SpectralFrame::compute(&mut engine, &window, 1000.0, 400.0).unwrap();
        assert_eq!(frame.max_amplitude(), 0.0);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_out_of_band_tone_is_discarded() {
        let mut engine = FftEngine::new(1000);
        // 450 Hz tone with a 100 Hz cutoff: all retained bins stay small
        let window = sine_window(450.0, 1000.0, 1000);

        let frame = SpectralFrame::compute(&mut engine, &window, 1000.0, 100.0).unwrap();
        assert_eq!(*frame.frequencies_hz.last().unwrap(), 100.0);
        assert!(frame.max_amplitude() < 0.05);
    }
}
