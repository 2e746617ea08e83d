//! Recording fakes shared by the engine unit tests.

use egui::Pos2;

use crate::engine::scheduler::SpectrumSource;
use crate::engine::surface::{Hsla, LinearGradient, RenderSurface};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    PixelScale {
        factor: f32,
    },
    Fade {
        alpha: f32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        color: Hsla,
    },
    Arc {
        center: Pos2,
        radius: f32,
        color: Hsla,
        width: f32,
    },
    Curve {
        points: Vec<Pos2>,
        width: f32,
    },
}

/// Surface that records every primitive call instead of drawing.
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub ratio: f32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ratio: 1.0,
            calls: Vec::new(),
        }
    }

    pub fn arc_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Arc { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count()
    }
}

impl RenderSurface for RecordingSurface {
    fn logical_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn pixel_ratio(&self) -> f32 {
        self.ratio
    }

    fn set_pixel_scale(&mut self, factor: f32) {
        self.calls.push(DrawCall::PixelScale { factor });
    }

    fn fade(&mut self, alpha: f32) {
        self.calls.push(DrawCall::Fade { alpha });
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Hsla) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_arc(&mut self, center: Pos2, radius: f32, color: Hsla, width: f32) {
        self.calls.push(DrawCall::Arc {
            center,
            radius,
            color,
            width,
        });
    }

    fn stroke_curve_through(&mut self, points: &[Pos2], _gradient: &LinearGradient, width: f32) {
        self.calls.push(DrawCall::Curve {
            points: points.to_vec(),
            width,
        });
    }
}

/// Source that hands out the same frame every tick and counts reads.
pub struct FixedSource {
    pub bins: usize,
    pub frame: Vec<u8>,
    pub reads: usize,
}

impl FixedSource {
    pub fn new(bins: usize, frame: Vec<u8>) -> Self {
        Self {
            bins,
            frame,
            reads: 0,
        }
    }

    pub fn silent(bins: usize) -> Self {
        Self::new(bins, vec![0; bins])
    }
}

impl SpectrumSource for FixedSource {
    fn sample_count(&self) -> usize {
        self.bins
    }

    fn read_magnitudes(&mut self) -> Vec<u8> {
        self.reads += 1;
        self.frame.clone()
    }
}
