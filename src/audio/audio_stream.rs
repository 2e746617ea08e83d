use anyhow::{Context, anyhow};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat};
use std::sync::{Arc, Mutex};

use crate::audio::analyzer::SpectrumAnalyzer;

/// A live input stream feeding captured samples into the analyzer.
/// Dropping it stops the capture.
pub struct AudioStream {
    _stream: cpal::Stream,
}

impl AudioStream {
    pub fn new(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        sample_format: SampleFormat,
        analyzer: Arc<Mutex<SpectrumAnalyzer>>,
    ) -> Result<Self, anyhow::Error> {
        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(device, config, analyzer)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(device, config, analyzer)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(device, config, analyzer)?,
            _ => return Err(anyhow!("unsupported sample format {sample_format}")),
        };

        stream.play().context("could not start the input stream")?;

        Ok(Self { _stream: stream })
    }
}

/// Open an input stream on the device at `device_idx`. Errors carry enough
/// context for the shell's capture-error panel.
pub fn create_audio_stream(
    device_idx: usize,
    devices: &[String],
    analyzer: Arc<Mutex<SpectrumAnalyzer>>,
) -> Result<AudioStream, anyhow::Error> {
    let host = cpal::default_host();

    let device_name = devices
        .get(device_idx)
        .ok_or_else(|| anyhow!("no audio input device selected"))?;

    let device = host
        .input_devices()
        .context("could not enumerate audio input devices")?
        .find(|d| d.name().ok().as_deref() == Some(device_name.as_str()))
        .ok_or_else(|| anyhow!("audio input device '{device_name}' is no longer available"))?;

    let supported_config = device
        .default_input_config()
        .with_context(|| format!("device '{device_name}' rejected its default input config"))?;
    let sample_format = supported_config.sample_format();
    let stream_config: cpal::StreamConfig = supported_config.into();

    AudioStream::new(&device, &stream_config, sample_format, analyzer)
        .with_context(|| format!("could not open capture on '{device_name}'"))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    analyzer: Arc<Mutex<SpectrumAnalyzer>>,
) -> Result<cpal::Stream, anyhow::Error>
where
    T: Sample + FromSample<f32> + cpal::SizedSample,
    f32: FromSample<T>,
{
    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let samples: Vec<f32> = data.iter().map(|&s| s.to_sample()).collect();
            analyzer.lock().unwrap().add_samples(&samples);
        },
        |err| log::error!("input stream error: {err}"),
        None,
    )?;

    Ok(stream)
}
