use egui::Pos2;
use std::f32::consts::TAU;

use crate::config::VisualConfig;

/// One oscillator on the ring. Angle and hue never change after
/// initialization; the radius chases an energy-dependent target each tick.
#[derive(Clone, Debug)]
pub struct Particle {
    pub angle: f32,
    pub base_radius: f32,
    pub radius: f32,
    pub hue: f32,
    pub energy: f32,
    pub x: f32,
    pub y: f32,
}

impl Particle {
    pub fn position(&self) -> Pos2 {
        egui::pos2(self.x, self.y)
    }
}

/// Fixed-size ring of particles, one per assigned spectrum bin.
#[derive(Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)build the ring: `count` particles evenly spaced around `center`,
    /// at rest on the base circle. Replaces any previous set wholesale;
    /// called at engine start and on every logical-size change.
    pub fn initialize(&mut self, count: usize, center: Pos2, config: &VisualConfig) {
        let base_radius = center.x.min(center.y) * config.base_radius_scale;
        self.particles.clear();
        self.particles.reserve(count);
        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU;
            self.particles.push(Particle {
                angle,
                base_radius,
                radius: base_radius,
                hue: i as f32 / count as f32 * 360.0,
                energy: 0.0,
                x: center.x + angle.cos() * base_radius,
                y: center.y + angle.sin() * base_radius,
            });
        }
    }

    /// Feed one magnitude sample (nominally 0-255) to the particle at
    /// `index`. The radius lerps toward an energy-swelled target and the
    /// cartesian position is recomputed from the fixed angle. Samples
    /// outside 0-255 just push the target further; they are not an error.
    pub fn update(&mut self, index: usize, magnitude: f32, center: Pos2, config: &VisualConfig) {
        let Some(p) = self.particles.get_mut(index) else {
            return;
        };
        p.energy = magnitude / 255.0;
        let swell = center.x.min(center.y) * config.swell_scale;
        let target = p.base_radius + p.energy * swell;
        p.radius += (target - p.radius) * config.radial_smoothing;
        p.x = center.x + p.angle.cos() * p.radius;
        p.y = center.y + p.angle.sin() * p.radius;
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
