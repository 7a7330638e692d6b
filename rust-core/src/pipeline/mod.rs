//! Frame pipeline: accumulation, window extraction, and frame emission
//!
//! The pipeline owns both buffers exclusively. It accumulates samples and
//! temperature readings from incoming records; whenever the ingress queue
//! completes a full window it transforms the window, annotates it with the
//! temperature average and alert flag, and emits an immutable display
//! frame. No history is retained once a frame is handed off.

pub mod runner;

pub use runner::{PipelineHandle, PipelineRunner};

use crate::alert;
use crate::buffer::{SampleQueue, TempHistory};
use crate::config::{ConfigError, PipelineConfig};
use crate::ingest::{RecordDecoder, SensorRecord};
use crate::spectrum::{FftEngine, SpectralFrame, SpectrumError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("frame invariant violated: {0}")]
    InvariantViolation(#[from] SpectrumError),
}

/// The unit handed to the renderer, built once per completed window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFrame {
    /// Band-limited amplitude spectrum of the completed window
    pub spectrum: SpectralFrame,

    /// Temperature average at emission time
    pub avg_temperature: f64,

    /// True when the average sits at or above the configured threshold
    pub alert: bool,
}

/// Streaming pipeline from decoded records to display frames
///
/// Two states per incoming record: accumulating (the steady state) and a
/// transient emitting pass entered each time the queue completes a window.
/// After shutdown no further input is accepted and any partial window is
/// discarded.
pub struct FramePipeline {
    config: PipelineConfig,
    decoder: RecordDecoder,
    samples: SampleQueue,
    temps: TempHistory,
    fft: FftEngine,
    accepting: bool,
}

impl FramePipeline {
    /// Build a pipeline from validated configuration
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        Self::with_decoder(config, RecordDecoder::default())
    }

    /// Build a pipeline with deployment-specific payload field names
    pub fn with_decoder(
        config: PipelineConfig,
        decoder: RecordDecoder,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let samples = SampleQueue::new();
        let temps = TempHistory::new(config.temp_capacity);
        let fft = FftEngine::new(config.window_size);

        Ok(Self {
            config,
            decoder,
            samples,
            temps,
            fft,
            accepting: true,
        })
    }

    /// Decode a raw payload and feed it through the pipeline
    ///
    /// A malformed payload is dropped with a warning and leaves both
    /// buffers untouched; this never escalates to the caller.
    pub fn handle_payload(&mut self, payload: &[u8]) -> Vec<DisplayFrame> {
        match self.decoder.decode(payload) {
            Ok(record) => self.handle_record(&record),
            Err(e) => {
                log::warn!("dropping malformed record: {}", e);
                Vec::new()
            }
        }
    }

    /// Feed one decoded record through the accumulate/emit state machine
    ///
    /// Returns the display frames completed by this record, in window
    /// completion order. A record large enough to complete several windows
    /// yields several frames. A frame whose transform breaks an invariant
    /// is skipped with an error report; accumulation continues.
    pub fn handle_record(&mut self, record: &SensorRecord) -> Vec<DisplayFrame> {
        if !self.accepting {
            log::debug!("pipeline shut down, ignoring record");
            return Vec::new();
        }

        if record.has_vibration() {
            self.samples.push_slice(&record.vibration);
        }
        if let Some(temp) = record.temperature {
            self.temps.push(temp);
        }

        let mut frames = Vec::new();
        while let Some(window) = self.samples.try_extract_window(self.config.window_size) {
            match self.emit_window(&window) {
                Ok(frame) => frames.push(frame),
                Err(e) => {
                    // Skip this frame only; the pipeline stays accumulating
                    log::error!("skipping frame: {}", e);
                }
            }
        }
        frames
    }

    /// Transform one complete window into a display frame
    fn emit_window(&mut self, window: &[f64]) -> Result<DisplayFrame, PipelineError> {
        let spectrum = SpectralFrame::compute(
            &mut self.fft,
            window,
            self.config.sample_rate_hz,
            self.config.freq_cutoff_hz,
        )?;

        let avg_temperature = self.temps.average();
        let alert = alert::evaluate(avg_temperature, self.config.alert_threshold);

        log::debug!(
            "emitting frame: {} bins, avg temp {:.2}, alert {}",
            spectrum.len(),
            avg_temperature,
            alert
        );

        Ok(DisplayFrame {
            spectrum,
            avg_temperature,
            alert,
        })
    }

    /// Stop accepting input and discard any partially accumulated window
    pub fn shutdown(&mut self) {
        if !self.accepting {
            return;
        }
        self.accepting = false;
        if !self.samples.is_empty() {
            log::debug!(
                "discarding {} accumulated samples on shutdown",
                self.samples.len()
            );
            self.samples.clear();
        }
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Samples currently queued short of a window
    pub fn queued_samples(&self) -> usize {
        self.samples.len()
    }

    /// Temperature readings currently held
    pub fn temp_readings(&self) -> usize {
        self.temps.len()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
