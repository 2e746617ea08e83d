use egui::{Color32, Pos2, pos2};

/// Minimal immediate-mode drawing contract the engine renders through.
/// Any 2D surface offering these primitives can host the visualization.
pub trait RenderSurface {
    /// Current drawable area in logical coordinates.
    fn logical_size(&self) -> (f32, f32);

    /// Device-pixel-to-logical ratio reported by the host.
    fn pixel_ratio(&self) -> f32;

    /// Reconfigure backing-store scaling. Applied once at engine start and
    /// again whenever the logical size changes.
    fn set_pixel_scale(&mut self, factor: f32);

    /// Composite a black veil of the given opacity over the whole surface,
    /// fading previously drawn content instead of hard-clearing it.
    fn fade(&mut self, alpha: f32);

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Hsla);

    fn stroke_arc(&mut self, center: Pos2, radius: f32, color: Hsla, width: f32);

    /// Stroke one smoothed closed curve through `points`, colored along its
    /// length by `gradient`.
    fn stroke_curve_through(&mut self, points: &[Pos2], gradient: &LinearGradient, width: f32);
}

/// HSL color with alpha. Hue in degrees, saturation and lightness in
/// percent, alpha in [0, 1]. Out-of-range components are clamped (hue
/// wraps) when converting, never rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    pub fn to_color32(self) -> Color32 {
        let h = self.hue.rem_euclid(360.0);
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);
        let a = self.alpha.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = if h < 60.0 {
            (c, x, 0.0)
        } else if h < 120.0 {
            (x, c, 0.0)
        } else if h < 180.0 {
            (0.0, c, x)
        } else if h < 240.0 {
            (0.0, x, c)
        } else if h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Color32::from_rgba_unmultiplied(
            ((r + m) * 255.0).round() as u8,
            ((g + m) * 255.0).round() as u8,
            ((b + m) * 255.0).round() as u8,
            (a * 255.0).round() as u8,
        )
    }
}

/// A linear gradient between two points, sampled by offset in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: Pos2,
    pub end: Pos2,
    pub stops: Vec<(f32, Hsla)>,
}

impl LinearGradient {
    pub fn new(start: Pos2, end: Pos2, stops: Vec<(f32, Hsla)>) -> Self {
        Self { start, end, stops }
    }

    /// The static magenta -> cyan -> yellow sweep across the surface
    /// bounding box used to stroke the connective curve.
    pub fn spectrum_sweep(width: f32, height: f32) -> Self {
        Self::new(
            pos2(0.0, 0.0),
            pos2(width, height),
            vec![
                (0.0, Hsla::new(300.0, 100.0, 50.0, 1.0)),
                (0.5, Hsla::new(180.0, 100.0, 50.0, 1.0)),
                (1.0, Hsla::new(60.0, 100.0, 50.0, 1.0)),
            ],
        )
    }

    /// Color at offset `t`, interpolated between the bracketing stops.
    pub fn sample(&self, t: f32) -> Hsla {
        let t = t.clamp(0.0, 1.0);
        let Some(&(first_offset, first)) = self.stops.first() else {
            return Hsla::new(0.0, 0.0, 100.0, 1.0);
        };
        if t <= first_offset {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (o0, c0) = pair[0];
            let (o1, c1) = pair[1];
            if t <= o1 {
                let span = o1 - o0;
                let f = if span > 0.0 { (t - o0) / span } else { 0.0 };
                return Hsla::new(
                    c0.hue + (c1.hue - c0.hue) * f,
                    c0.saturation + (c1.saturation - c0.saturation) * f,
                    c0.lightness + (c1.lightness - c0.lightness) * f,
                    c0.alpha + (c1.alpha - c0.alpha) * f,
                );
            }
        }
        self.stops.last().map(|&(_, c)| c).unwrap_or(first)
    }

    /// Offset of `point` projected onto the gradient axis, clamped to [0, 1].
    pub fn project(&self, point: Pos2) -> f32 {
        let axis = self.end - self.start;
        let len_sq = axis.length_sq();
        if len_sq == 0.0 {
            return 0.0;
        }
        ((point - self.start).dot(axis) / len_sq).clamp(0.0, 1.0)
    }
}
