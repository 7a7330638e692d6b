//! Spectral analysis with FFT

pub mod fft;
pub mod frame;

pub use fft::{FftEngine, SpectrumError};
pub use frame::SpectralFrame;
