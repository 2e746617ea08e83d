use rustfft::{FftPlanner, num_complex::Complex};
use std::f32::consts::PI;
use std::sync::{Arc, Mutex};

use crate::config::AudioConfig;
use crate::engine::SpectrumSource;

/// Turns the rolling capture buffer into the byte frequency spectrum the
/// engine consumes: Hann window, forward FFT, per-bin temporal smoothing,
/// then decibels mapped onto 0..=255 over the configured range.
pub struct SpectrumAnalyzer {
    config: AudioConfig,
    buffer: Vec<f32>,
    fft_planner: FftPlanner<f32>,
    smoothed: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(config: AudioConfig) -> Self {
        let bins = config.fft_size / 2;
        Self {
            buffer: Vec::with_capacity(config.fft_size),
            fft_planner: FftPlanner::new(),
            smoothed: vec![0.0; bins],
            config,
        }
    }

    /// Number of frequency bins a full analysis pass produces.
    pub fn bin_count(&self) -> usize {
        self.config.fft_size / 2
    }

    /// Append captured samples, keeping only the most recent window.
    pub fn add_samples(&mut self, samples: &[f32]) {
        self.buffer.extend_from_slice(samples);
        if self.buffer.len() > self.config.fft_size {
            let excess = self.buffer.len() - self.config.fft_size;
            self.buffer.drain(0..excess);
        }
    }

    /// Byte spectrum of the current window. Reports silence until a full
    /// window of samples has arrived.
    pub fn magnitudes(&mut self) -> Vec<u8> {
        let size = self.config.fft_size;
        let bins = size / 2;
        if self.buffer.len() < size {
            return vec![0; bins];
        }

        let mut spectrum: Vec<Complex<f32>> = self.buffer[self.buffer.len() - size..]
            .iter()
            .enumerate()
            .map(|(i, &s)| Complex::new(s * hann_window(i, size), 0.0))
            .collect();
        let fft = self.fft_planner.plan_fft_forward(size);
        fft.process(&mut spectrum);

        let tau = self.config.smoothing_time_constant;
        let db_span = self.config.max_decibels - self.config.min_decibels;
        let mut out = Vec::with_capacity(bins);
        for (k, c) in spectrum[..bins].iter().enumerate() {
            let norm = c.norm() / size as f32;
            let s = tau * self.smoothed[k] + (1.0 - tau) * norm;
            self.smoothed[k] = s;
            let db = 20.0 * s.max(1e-12).log10();
            let scaled = (db - self.config.min_decibels) / db_span * 255.0;
            out.push(scaled.clamp(0.0, 255.0) as u8);
        }
        out
    }
}

/// Hann window coefficient for sample `index` of a `size`-sample window.
fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

/// Latest published byte spectrum, shared between the analysis thread and
/// the render loop. Cloning shares the same frame.
#[derive(Clone)]
pub struct SharedSpectrum {
    frame: Arc<Mutex<Vec<u8>>>,
    bin_count: usize,
}

impl SharedSpectrum {
    pub fn new(bin_count: usize) -> Self {
        Self {
            frame: Arc::new(Mutex::new(vec![0; bin_count])),
            bin_count,
        }
    }

    pub fn publish(&self, magnitudes: Vec<u8>) {
        *self.frame.lock().unwrap() = magnitudes;
    }

    pub fn snapshot(&self) -> Vec<u8> {
        self.frame.lock().unwrap().clone()
    }
}

impl SpectrumSource for SharedSpectrum {
    fn sample_count(&self) -> usize {
        self.bin_count
    }

    fn read_magnitudes(&mut self) -> Vec<u8> {
        self.snapshot()
    }
}
