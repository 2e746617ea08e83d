pub const APP_VERSION: &str = "v0.1.0";

#[derive(Clone, PartialEq, Debug)]
pub struct AudioConfig {
    /// Sample rate in Hz. Standard CD quality is 44100 Hz.
    /// Higher = better frequency resolution but more CPU usage.
    pub sample_rate: f32,

    /// Number of samples per analysis window. Must be a power of 2 for FFT.
    /// 2048 samples at 44.1kHz = ~46ms of audio and 1024 frequency bins.
    pub fft_size: usize,

    /// Portion of the previous per-bin magnitude kept on each analysis pass,
    /// in [0, 1). Higher = steadier spectrum but laggier response.
    pub smoothing_time_constant: f32,

    /// Magnitude (in dB) that maps to byte value 0.
    /// Anything quieter reads as silence.
    pub min_decibels: f32,

    /// Magnitude (in dB) that maps to byte value 255.
    /// Anything louder saturates.
    pub max_decibels: f32,

    /// How often the analysis thread recomputes the spectrum, in ms.
    /// ~16ms keeps the published frame fresh for a 60Hz render loop.
    pub update_interval_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            fft_size: 2048,
            smoothing_time_constant: 0.3,
            min_decibels: -100.0,
            max_decibels: -30.0,
            update_interval_ms: 16,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct VisualConfig {
    /// Number of particles on the ring. The whole ring is rebuilt on resize.
    pub particle_count: usize,

    /// Rest radius of the ring, as a fraction of the surface half-extent.
    pub base_radius_scale: f32,

    /// Maximum energy-driven radial swell, as a fraction of the half-extent.
    pub swell_scale: f32,

    /// Lerp factor pulling each particle radius toward its target per tick.
    /// Trades latency against jitter; tuned for ~60Hz ticking.
    pub radial_smoothing: f32,

    /// Opacity of the black veil composited over the frame each tick.
    /// Smaller = longer trails.
    pub fade_alpha: f32,

    /// How many of the lowest frequency bins count as bass.
    pub bass_bin_count: usize,

    /// Bass energy (0-1) above which a shockwave may spawn.
    pub bass_drop_threshold: f32,

    /// A qualifying tick spawns a shockwave only when a uniform draw
    /// exceeds this, so sustained bass does not flood the queue.
    pub shockwave_chance: f32,

    /// Ring rotation per tick with no audio.
    pub idle_spin: f32,

    /// Additional rotation per tick per unit of overall energy.
    pub energy_spin: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            particle_count: 256,
            base_radius_scale: 0.4,
            swell_scale: 0.7,
            radial_smoothing: 0.4,
            fade_alpha: 0.1,
            bass_bin_count: 5,
            bass_drop_threshold: 0.9,
            shockwave_chance: 0.5,
            idle_spin: 0.0005,
            energy_spin: 0.003,
        }
    }
}
