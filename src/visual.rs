mod surface;

pub use surface::PainterSurface;

use eframe::egui;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::audio::SharedSpectrum;
use crate::config::VisualConfig;
use crate::engine::{FrameScheduler, TickOutcome};

/// Hosts the frame scheduler inside the visuals viewport: one tick per
/// egui frame, re-armed with a repaint request while the engine runs.
pub struct VisualEngine {
    spectrum: SharedSpectrum,
    scheduler: FrameScheduler,
    surface: PainterSurface,
    rng: SmallRng,
}

impl VisualEngine {
    pub fn new(spectrum: SharedSpectrum) -> Self {
        Self {
            spectrum,
            scheduler: FrameScheduler::new(VisualConfig::default()),
            surface: PainterSurface::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(egui::Color32::BLACK)
                    .inner_margin(0.0),
            )
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                self.surface
                    .begin_frame(response.rect, ctx.pixels_per_point());

                if !self.scheduler.is_running() {
                    if let Err(e) = self.scheduler.start(&mut self.surface, &self.spectrum) {
                        log::error!("could not start visual engine: {e}");
                        return;
                    }
                }

                match self
                    .scheduler
                    .tick(&mut self.surface, &mut self.spectrum, &mut self.rng)
                {
                    TickOutcome::Continue => {
                        self.surface.flush(&painter);
                        ctx.request_repaint();
                    }
                    TickOutcome::Stopped => {}
                }
            });
    }

    /// Tear the engine down; the next `render` after this starts it fresh.
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
        self.surface.clear();
    }
}
