//! End-to-end pipeline tests: scripted records in, display frames out

use std::f64::consts::PI;
use std::time::Duration;

use vibroscope::ingest::{ScriptedSource, SensorRecord};
use vibroscope::pipeline::{FramePipeline, PipelineRunner};
use vibroscope::render::{deliver_pending, CollectingSink, DisplayBounds, FrameSink, LogSink};
use vibroscope::PipelineConfig;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sine_samples(freq_hz: f64, sample_rate_hz: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate_hz).sin())
        .collect()
}

#[test]
fn test_hot_bearing_scenario() {
    init_logging();

    // 1000 temperature readings of 105.0 against a threshold of 100, plus
    // one full window of a 50 Hz unit sine at Fs = 1000 Hz
    let config = PipelineConfig::default();
    let pipeline = FramePipeline::new(config).expect("default config is valid");

    let mut records: Vec<SensorRecord> = (0..1000)
        .map(|_| SensorRecord {
            vibration: Vec::new(),
            temperature: Some(105.0),
        })
        .collect();
    records.push(SensorRecord {
        vibration: sine_samples(50.0, 1000.0, 1000),
        temperature: None,
    });

    let source = ScriptedSource::new(records);
    let (mut runner, receiver) = PipelineRunner::spawn(pipeline, source);

    let frame = receiver
        .recv_timeout(Duration::from_secs(10))
        .expect("exactly one frame should be emitted");

    assert_eq!(frame.avg_temperature, 105.0);
    assert!(frame.alert);

    let (peak_freq, peak_amp) = frame.spectrum.peak().expect("spectrum is non-empty");
    assert!((peak_freq - 50.0).abs() <= 1.0);
    assert!((peak_amp - 0.5).abs() < 0.01);

    // Band limit: frequencies ascend within [0, Fmax], below Nyquist
    assert_eq!(frame.spectrum.frequencies_hz[0], 0.0);
    assert!(*frame.spectrum.frequencies_hz.last().unwrap() <= 499.0);
    assert!(frame
        .spectrum
        .frequencies_hz
        .windows(2)
        .all(|pair| pair[0] < pair[1]));

    // The scripted feed held exactly one window's worth of samples
    assert!(receiver.recv_timeout(Duration::from_millis(200)).is_err());

    runner.stop();
}

#[test]
fn test_two_bursts_arrive_in_completion_order() {
    init_logging();

    let config = PipelineConfig {
        window_size: 100,
        sample_rate_hz: 1000.0,
        freq_cutoff_hz: 450.0,
        temp_capacity: 10,
        alert_threshold: 100.0,
    };
    let pipeline = FramePipeline::new(config).unwrap();

    // 2N samples in two batches of N; DC level tags each window
    let source = ScriptedSource::new(vec![
        SensorRecord {
            vibration: vec![1.0; 100],
            temperature: None,
        },
        SensorRecord {
            vibration: vec![2.0; 100],
            temperature: None,
        },
    ]);

    let (mut runner, receiver) = PipelineRunner::spawn(pipeline, source);

    let first = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
    let second = receiver.recv_timeout(Duration::from_secs(5)).unwrap();

    assert!((first.spectrum.amplitudes[0] - 1.0).abs() < 1e-9);
    assert!((second.spectrum.amplitudes[0] - 2.0).abs() < 1e-9);

    runner.stop();
}

#[test]
fn test_sink_pump_collects_frames_in_order() {
    init_logging();

    let config = PipelineConfig {
        window_size: 10,
        sample_rate_hz: 100.0,
        freq_cutoff_hz: 40.0,
        temp_capacity: 10,
        alert_threshold: 100.0,
    };
    let pipeline = FramePipeline::new(config).unwrap();

    let source = ScriptedSource::new(vec![
        SensorRecord {
            vibration: vec![1.0; 10],
            temperature: Some(20.0),
        },
        SensorRecord {
            vibration: vec![2.0; 10],
            temperature: Some(30.0),
        },
        SensorRecord {
            vibration: vec![3.0; 10],
            temperature: Some(40.0),
        },
    ]);

    let (mut runner, receiver) = PipelineRunner::spawn(pipeline, source);

    let mut sink = CollectingSink::new();
    sink.attach(&DisplayBounds {
        freq_max_hz: 40.0,
        tick_hz: 5.0,
    });

    // Pump until all three frames crossed over
    let mut delivered = 0;
    for _ in 0..500 {
        delivered += deliver_pending(&receiver, &mut sink);
        if delivered >= 3 {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(delivered, 3);

    let frames = sink.collected();
    let dc_levels: Vec<f64> = frames.iter().map(|f| f.spectrum.amplitudes[0]).collect();
    assert!((dc_levels[0] - 1.0).abs() < 1e-9);
    assert!((dc_levels[1] - 2.0).abs() < 1e-9);
    assert!((dc_levels[2] - 3.0).abs() < 1e-9);

    // Temperature average tracks the history at each emission
    assert_eq!(frames[0].avg_temperature, 20.0);
    assert_eq!(frames[1].avg_temperature, 25.0);
    assert_eq!(frames[2].avg_temperature, 30.0);
    assert!(frames.iter().all(|f| !f.alert));

    runner.stop();
}

#[test]
fn test_malformed_payloads_never_disturb_the_stream() {
    init_logging();

    let config = PipelineConfig {
        window_size: 4,
        sample_rate_hz: 100.0,
        freq_cutoff_hz: 40.0,
        temp_capacity: 4,
        alert_threshold: 100.0,
    };
    let pipeline = FramePipeline::new(config).unwrap();
    let source = ScriptedSource::new(Vec::new());

    let (mut runner, receiver) = PipelineRunner::spawn(pipeline, source);
    let handle = runner.handle();

    // Garbage interleaved with good payloads
    assert_eq!(handle.ingest_payload(b"garbage"), 0);
    assert_eq!(handle.ingest_payload(br#"{"AccelZ": [1.0, 1.0]}"#), 0);
    assert_eq!(handle.ingest_payload(br#"{"Temperature": "hot"}"#), 0);
    assert_eq!(handle.ingest_payload(br#"{"AccelZ": [1.0, 1.0]}"#), 1);

    let frame = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!((frame.spectrum.amplitudes[0] - 1.0).abs() < 1e-9);

    let mut sink = LogSink;
    sink.on_frame(&frame);

    runner.stop();
}
