use egui::{Color32, Pos2, Rect, Stroke, pos2};

use crate::engine::surface::{Hsla, LinearGradient, RenderSurface};

/// Flattening steps per quadratic arc of the connective curve.
const CURVE_SUBDIVISIONS: usize = 6;
/// Trail ops dimmer than this are dropped.
const MIN_TRAIL_OPACITY: f32 = 1.0 / 255.0;

#[derive(Clone, Debug)]
enum DrawOp {
    Circle {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    Ring {
        center: Pos2,
        radius: f32,
        color: Color32,
        width: f32,
    },
    Polyline {
        points: Vec<Pos2>,
        color: Color32,
        width: f32,
    },
}

#[derive(Clone, Debug)]
struct Trail {
    op: DrawOp,
    opacity: f32,
}

/// `RenderSurface` over an egui painter. egui repaints from scratch every
/// frame, so the canvas-style fade compositing is emulated by replaying
/// recent draw ops with an opacity that decays on every `fade` call.
pub struct PainterSurface {
    rect: Rect,
    pixel_ratio: f32,
    applied_pixel_scale: f32,
    trails: Vec<Trail>,
}

impl Default for PainterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PainterSurface {
    pub fn new() -> Self {
        Self {
            rect: Rect::ZERO,
            pixel_ratio: 1.0,
            applied_pixel_scale: 1.0,
            trails: Vec::new(),
        }
    }

    /// Adopt this frame's drawable area and the host's pixel density.
    pub fn begin_frame(&mut self, rect: Rect, pixel_ratio: f32) {
        self.rect = rect;
        self.pixel_ratio = pixel_ratio;
    }

    /// Paint the retained scene into `painter`, oldest ops first.
    pub fn flush(&self, painter: &egui::Painter) {
        painter.rect_filled(self.rect, 0.0, Color32::BLACK);
        let origin = self.rect.min.to_vec2();
        for trail in &self.trails {
            match &trail.op {
                DrawOp::Circle {
                    center,
                    radius,
                    color,
                } => {
                    painter.circle_filled(*center + origin, *radius, color.gamma_multiply(trail.opacity));
                }
                DrawOp::Ring {
                    center,
                    radius,
                    color,
                    width,
                } => {
                    painter.circle_stroke(
                        *center + origin,
                        *radius,
                        Stroke::new(*width, color.gamma_multiply(trail.opacity)),
                    );
                }
                DrawOp::Polyline {
                    points,
                    color,
                    width,
                } => {
                    painter.add(egui::Shape::line(
                        points.iter().map(|p| *p + origin).collect(),
                        Stroke::new(*width, color.gamma_multiply(trail.opacity)),
                    ));
                }
            }
        }
    }

    /// Drop all retained trails, e.g. when the engine restarts.
    pub fn clear(&mut self) {
        self.trails.clear();
    }

    fn push(&mut self, op: DrawOp) {
        self.trails.push(Trail { op, opacity: 1.0 });
    }

    #[cfg(test)]
    fn trail_count(&self) -> usize {
        self.trails.len()
    }
}

impl RenderSurface for PainterSurface {
    fn logical_size(&self) -> (f32, f32) {
        (self.rect.width(), self.rect.height())
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn set_pixel_scale(&mut self, factor: f32) {
        // egui already rasterizes at native density; the factor is kept so
        // sizing stays in logical points.
        self.applied_pixel_scale = factor;
    }

    fn fade(&mut self, alpha: f32) {
        let keep = (1.0 - alpha).clamp(0.0, 1.0);
        for trail in &mut self.trails {
            trail.opacity *= keep;
        }
        self.trails.retain(|t| t.opacity >= MIN_TRAIL_OPACITY);
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Hsla) {
        self.push(DrawOp::Circle {
            center,
            radius,
            color: color.to_color32(),
        });
    }

    fn stroke_arc(&mut self, center: Pos2, radius: f32, color: Hsla, width: f32) {
        self.push(DrawOp::Ring {
            center,
            radius,
            color: color.to_color32(),
            width,
        });
    }

    fn stroke_curve_through(&mut self, points: &[Pos2], gradient: &LinearGradient, width: f32) {
        let n = points.len();
        if n < 3 {
            if n == 2 {
                let color = gradient.sample(gradient.project(points[0])).to_color32();
                self.push(DrawOp::Polyline {
                    points: points.to_vec(),
                    color,
                    width,
                });
            }
            return;
        }

        // Closed canvas-style smoothing: each input point is the control of
        // a quadratic arc between the midpoints of its neighboring edges.
        for i in 0..n {
            let prev = points[(i + n - 1) % n];
            let ctrl = points[i];
            let next = points[(i + 1) % n];
            let from = midpoint(prev, ctrl);
            let to = midpoint(ctrl, next);

            let mut arc = Vec::with_capacity(CURVE_SUBDIVISIONS + 1);
            for k in 0..=CURVE_SUBDIVISIONS {
                let t = k as f32 / CURVE_SUBDIVISIONS as f32;
                arc.push(quadratic_point(from, ctrl, to, t));
            }

            let color = gradient.sample(gradient.project(ctrl)).to_color32();
            self.push(DrawOp::Polyline {
                points: arc,
                color,
                width,
            });
        }
    }
}

fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    pos2((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

fn quadratic_point(p0: Pos2, ctrl: Pos2, p1: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    pos2(
        u * u * p0.x + 2.0 * u * t * ctrl.x + t * t * p1.x,
        u * u * p0.y + 2.0 * u * t * ctrl.y + t * t * p1.y,
    )
}
