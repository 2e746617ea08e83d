use egui::pos2;
use rand::Rng;
use thiserror::Error;

use crate::config::VisualConfig;
use crate::engine::particles::ParticleField;
use crate::engine::scene;
use crate::engine::shockwave::ShockwaveQueue;
use crate::engine::surface::RenderSurface;

/// Supplies the latest frequency spectrum, one array per tick.
pub trait SpectrumSource {
    /// Number of frequency bins, fixed for the lifetime of one activation.
    fn sample_count(&self) -> usize;

    /// Latest magnitudes, one byte per bin. May return fewer entries than
    /// `sample_count`; the engine reads missing bins as silence.
    fn read_magnitudes(&mut self) -> Vec<u8>;
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("render surface has no drawable area ({width}x{height})")]
    UnsupportedSurface { width: f32, height: f32 },
    #[error("spectrum source declares zero frequency bins")]
    EmptySpectrum,
    #[error("particle count must be non-zero")]
    NoParticles,
}

/// Whether the host should arm another tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Stopped,
}

/// Everything one activation of the engine mutates frame to frame.
pub struct EngineState {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
    pub bin_count: usize,
    pub rotation: f32,
    pub field: ParticleField,
    pub shockwaves: ShockwaveQueue,
}

impl EngineState {
    pub(crate) fn new(
        width: f32,
        height: f32,
        pixel_ratio: f32,
        bin_count: usize,
        config: &VisualConfig,
    ) -> Self {
        let mut field = ParticleField::new();
        field.initialize(
            config.particle_count,
            pos2(width / 2.0, height / 2.0),
            config,
        );
        Self {
            width,
            height,
            pixel_ratio,
            bin_count,
            rotation: 0.0,
            field,
            shockwaves: ShockwaveQueue::new(),
        }
    }

    /// Adopt new dimensions and hard-reset the ring. Live shockwaves stay;
    /// they are center-anchored.
    fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32, config: &VisualConfig) {
        self.width = width;
        self.height = height;
        self.pixel_ratio = pixel_ratio;
        self.field.initialize(
            config.particle_count,
            pos2(width / 2.0, height / 2.0),
            config,
        );
    }
}

/// Drives the scene at the host's repaint cadence. The host arms one tick
/// at a time and re-arms only while `tick` reports `Continue`, so frame
/// computations never overlap.
pub struct FrameScheduler {
    config: VisualConfig,
    state: Option<EngineState>,
    running: bool,
}

impl FrameScheduler {
    pub fn new(config: VisualConfig) -> Self {
        Self {
            config,
            state: None,
            running: false,
        }
    }

    /// Validate the collaborators and bring the engine to the active state.
    /// Fails before the first tick, never mid-loop.
    pub fn start(
        &mut self,
        surface: &mut impl RenderSurface,
        source: &impl SpectrumSource,
    ) -> Result<(), EngineError> {
        let (width, height) = surface.logical_size();
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(EngineError::UnsupportedSurface { width, height });
        }
        let bin_count = source.sample_count();
        if bin_count == 0 {
            return Err(EngineError::EmptySpectrum);
        }
        if self.config.particle_count == 0 {
            return Err(EngineError::NoParticles);
        }

        let pixel_ratio = surface.pixel_ratio();
        surface.set_pixel_scale(pixel_ratio);
        self.state = Some(EngineState::new(
            width,
            height,
            pixel_ratio,
            bin_count,
            &self.config,
        ));
        self.running = true;
        log::info!("visual engine started: {width}x{height} @{pixel_ratio}x, {bin_count} bins");
        Ok(())
    }

    /// Leave the active state. Safe to call repeatedly and at any time;
    /// no further ticks run after it returns.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("visual engine stopped");
        }
        self.running = false;
        self.state = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> Option<&EngineState> {
        self.state.as_ref()
    }

    /// Run one frame: re-derive the surface size (a change hard-resets the
    /// ring), read one spectrum, compose the scene. A detached surface
    /// stops the loop silently.
    pub fn tick(
        &mut self,
        surface: &mut impl RenderSurface,
        source: &mut impl SpectrumSource,
        rng: &mut impl Rng,
    ) -> TickOutcome {
        if !self.running || self.state.is_none() {
            return TickOutcome::Stopped;
        }

        let (width, height) = surface.logical_size();
        if !(width > 0.0 && height > 0.0) {
            log::debug!("render surface detached, stopping");
            self.stop();
            return TickOutcome::Stopped;
        }

        let Some(state) = self.state.as_mut() else {
            return TickOutcome::Stopped;
        };
        if width != state.width || height != state.height {
            let pixel_ratio = surface.pixel_ratio();
            surface.set_pixel_scale(pixel_ratio);
            state.resize(width, height, pixel_ratio, &self.config);
        }

        let spectrum = source.read_magnitudes();
        scene::compose_frame(state, &self.config, &spectrum, surface, rng);
        TickOutcome::Continue
    }
}
