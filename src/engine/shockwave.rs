use egui::Pos2;
use rand::Rng;

use crate::config::VisualConfig;
use crate::engine::surface::{Hsla, RenderSurface};

/// Ring growth per advance step, in logical pixels.
const RADIUS_GROWTH: f64 = 10.0;
/// Opacity lost per advance step; 1/0.02 = 50 steps from spawn to removal.
const ALPHA_DECAY: f64 = 0.02;
/// Stroke thinning per advance step, down to `MIN_LINE_WIDTH`.
const WIDTH_DECAY: f64 = 0.1;
const MIN_LINE_WIDTH: f64 = 1.0;
const SPAWN_LINE_WIDTH: f64 = 6.0;

/// One expanding ring. Fields are f64: fifty `ALPHA_DECAY` steps must land
/// at alpha <= 0, which f32 subtraction misses by a positive residue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shockwave {
    pub radius: f64,
    pub alpha: f64,
    pub line_width: f64,
}

/// Queue of live shockwave rings, each decaying independently.
#[derive(Default)]
pub struct ShockwaveQueue {
    events: Vec<Shockwave>,
}

impl ShockwaveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a ring when bass energy trips the threshold and a coin flip
    /// passes. The flip keeps sustained bass from flooding the queue; the
    /// threshold is the hard contract.
    pub fn maybe_spawn<R: Rng>(&mut self, bass_energy: f32, config: &VisualConfig, rng: &mut R) {
        if bass_energy > config.bass_drop_threshold && rng.r#gen::<f32>() > config.shockwave_chance
        {
            self.events.push(Shockwave {
                radius: 0.0,
                alpha: 1.0,
                line_width: SPAWN_LINE_WIDTH,
            });
        }
    }

    /// Draw every live ring at `center`, then age it. Rings whose alpha has
    /// run out are removed; reverse iteration keeps in-place removal from
    /// skipping or reordering survivors.
    pub fn advance_and_draw<S: RenderSurface>(&mut self, surface: &mut S, center: Pos2) {
        for i in (0..self.events.len()).rev() {
            let expired = {
                let ev = &mut self.events[i];
                surface.stroke_arc(
                    center,
                    ev.radius as f32,
                    Hsla::new(0.0, 0.0, 100.0, ev.alpha as f32),
                    ev.line_width as f32,
                );
                ev.radius += RADIUS_GROWTH;
                ev.alpha -= ALPHA_DECAY;
                ev.line_width = (ev.line_width - WIDTH_DECAY).max(MIN_LINE_WIDTH);
                ev.alpha <= 0.0
            };
            if expired {
                self.events.remove(i);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Shockwave] {
        &self.events
    }
}
