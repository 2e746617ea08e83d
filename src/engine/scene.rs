use egui::{Pos2, pos2};
use rand::Rng;

use crate::config::VisualConfig;
use crate::engine::scheduler::EngineState;
use crate::engine::surface::{Hsla, LinearGradient, RenderSurface};

/// Particle dot radius at zero energy and its gain per unit energy.
const DOT_BASE_RADIUS: f32 = 1.0;
const DOT_ENERGY_GAIN: f32 = 6.0;
/// Connective curve stroke width at zero energy and its gain.
const CURVE_BASE_WIDTH: f32 = 1.0;
const CURVE_ENERGY_GAIN: f32 = 4.0;

/// Mean of the first `bins` magnitudes, normalized to [0, 1]. Missing
/// samples read as silence; the divisor stays `bins`.
pub fn bass_energy(spectrum: &[u8], bins: usize) -> f32 {
    if bins == 0 {
        return 0.0;
    }
    let sum: u32 = spectrum.iter().take(bins).map(|&m| u32::from(m)).sum();
    sum as f32 / bins as f32 / 255.0
}

/// Mean of the whole magnitude array, normalized to [0, 1].
pub fn overall_energy(spectrum: &[u8]) -> f32 {
    if spectrum.is_empty() {
        return 0.0;
    }
    let sum: u32 = spectrum.iter().map(|&m| u32::from(m)).sum();
    sum as f32 / spectrum.len() as f32 / 255.0
}

/// Advance one frame: fade the previous contents, derive the energy
/// metrics, gate shockwave spawning, spin the ring, update and draw every
/// particle, stroke the connective curve, then run the shockwave pass.
///
/// The rotation is folded into the particle and curve draw positions;
/// shockwave rings stay center-anchored and unrotated.
pub fn compose_frame<S: RenderSurface, R: Rng>(
    state: &mut EngineState,
    config: &VisualConfig,
    spectrum: &[u8],
    surface: &mut S,
    rng: &mut R,
) {
    surface.fade(config.fade_alpha);

    let bass = bass_energy(spectrum, config.bass_bin_count);
    let overall = overall_energy(spectrum);

    state.shockwaves.maybe_spawn(bass, config, rng);
    state.rotation += config.idle_spin + overall * config.energy_spin;

    let center = pos2(state.width / 2.0, state.height / 2.0);
    let count = state.field.len();
    let (rot_sin, rot_cos) = state.rotation.sin_cos();

    let mut ring: Vec<Pos2> = Vec::with_capacity(count);
    for i in 0..count {
        let bin = i * state.bin_count / count;
        let magnitude = spectrum.get(bin).copied().unwrap_or(0);
        state.field.update(i, f32::from(magnitude), center, config);

        let p = &state.field.particles()[i];
        let pos = rotate_about(center, p.position(), rot_sin, rot_cos);
        ring.push(pos);
        surface.fill_circle(
            pos,
            DOT_BASE_RADIUS + p.energy * DOT_ENERGY_GAIN,
            Hsla::new(p.hue, 100.0, 50.0 + p.energy * 50.0, 1.0),
        );
    }

    if !ring.is_empty() {
        let gradient = LinearGradient::spectrum_sweep(state.width, state.height);
        surface.stroke_curve_through(&ring, &gradient, CURVE_BASE_WIDTH + overall * CURVE_ENERGY_GAIN);
    }

    state.shockwaves.advance_and_draw(surface, center);
}

fn rotate_about(center: Pos2, p: Pos2, sin: f32, cos: f32) -> Pos2 {
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    pos2(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}
