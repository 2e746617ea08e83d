// Host-side integration tests for the visual engine: a recording surface
// and a scripted spectrum source stand in for the GUI and the capture side.

use egui::{Pos2, pos2};
use rand::rngs::mock::StepRng;

use rhythmfx::config::VisualConfig;
use rhythmfx::engine::surface::{Hsla, LinearGradient, RenderSurface};
use rhythmfx::engine::{EngineError, FrameScheduler, SpectrumSource, TickOutcome};

const BINS: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Call {
    PixelScale,
    Fade,
    Circle,
    Arc { center: Pos2 },
    Curve,
}

struct TestSurface {
    width: f32,
    height: f32,
    calls: Vec<Call>,
}

impl TestSurface {
    fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    fn count(&self, wanted: fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| wanted(c)).count()
    }
}

impl RenderSurface for TestSurface {
    fn logical_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn pixel_ratio(&self) -> f32 {
        1.0
    }

    fn set_pixel_scale(&mut self, _factor: f32) {
        self.calls.push(Call::PixelScale);
    }

    fn fade(&mut self, _alpha: f32) {
        self.calls.push(Call::Fade);
    }

    fn fill_circle(&mut self, _center: Pos2, _radius: f32, _color: Hsla) {
        self.calls.push(Call::Circle);
    }

    fn stroke_arc(&mut self, center: Pos2, _radius: f32, _color: Hsla, _width: f32) {
        self.calls.push(Call::Arc { center });
    }

    fn stroke_curve_through(&mut self, _points: &[Pos2], _gradient: &LinearGradient, _width: f32) {
        self.calls.push(Call::Curve);
    }
}

struct ScriptedSource {
    bins: usize,
    frame: Vec<u8>,
}

impl SpectrumSource for ScriptedSource {
    fn sample_count(&self) -> usize {
        self.bins
    }

    fn read_magnitudes(&mut self) -> Vec<u8> {
        self.frame.clone()
    }
}

fn bass_heavy_frame() -> Vec<u8> {
    let mut frame = vec![0u8; BINS];
    frame[..5].fill(255);
    frame
}

fn favorable_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

fn started_engine(width: f32, height: f32, frame: Vec<u8>) -> (FrameScheduler, TestSurface, ScriptedSource) {
    let mut scheduler = FrameScheduler::new(VisualConfig::default());
    let mut surface = TestSurface::new(width, height);
    let source = ScriptedSource { bins: BINS, frame };
    scheduler
        .start(&mut surface, &source)
        .expect("engine should start");
    (scheduler, surface, source)
}

#[test]
fn start_fails_fast_on_a_degenerate_surface() {
    let mut scheduler = FrameScheduler::new(VisualConfig::default());
    let mut surface = TestSurface::new(0.0, 0.0);
    let source = ScriptedSource {
        bins: BINS,
        frame: vec![0; BINS],
    };
    assert!(matches!(
        scheduler.start(&mut surface, &source),
        Err(EngineError::UnsupportedSurface { .. })
    ));
}

#[test]
fn start_fails_fast_on_an_empty_spectrum_source() {
    let mut scheduler = FrameScheduler::new(VisualConfig::default());
    let mut surface = TestSurface::new(800.0, 600.0);
    let source = ScriptedSource {
        bins: 0,
        frame: Vec::new(),
    };
    assert!(matches!(
        scheduler.start(&mut surface, &source),
        Err(EngineError::EmptySpectrum)
    ));
}

#[test]
fn bass_burst_swells_bass_particles_and_fires_a_shockwave() {
    let (mut scheduler, mut surface, mut source) = started_engine(800.0, 600.0, bass_heavy_frame());
    let mut rng = favorable_rng();

    for _ in 0..200 {
        assert_eq!(
            scheduler.tick(&mut surface, &mut source, &mut rng),
            TickOutcome::Continue
        );
    }

    // Maxed bass with a favorable draw must have produced shockwave rings,
    // all anchored at the surface center.
    assert!(surface.count(|c| matches!(c, Call::Arc { .. })) > 0);
    for call in &surface.calls {
        if let Call::Arc { center } = call {
            assert_eq!(*center, pos2(400.0, 300.0));
        }
    }

    let state = scheduler.state().expect("running engine has state");
    let base = 300.0 * 0.4;
    let swollen = base + 300.0 * 0.7;

    // Particle 0 reads bin 0 (maxed) and converges on the swollen target.
    let p0 = &state.field.particles()[0];
    assert!(
        (p0.radius - swollen).abs() < 0.5,
        "bass particle at {}, expected ~{swollen}",
        p0.radius
    );

    // A particle mapped far into the silent bins stays at rest.
    let far = &state.field.particles()[128];
    assert!((far.radius - base).abs() < 1e-3);
}

#[test]
fn silent_spectrum_converges_to_the_resting_ring_without_shockwaves() {
    let (mut scheduler, mut surface, mut source) = started_engine(800.0, 800.0, bass_heavy_frame());
    let mut rng = favorable_rng();

    // Excite the ring first, then go silent.
    for _ in 0..50 {
        scheduler.tick(&mut surface, &mut source, &mut rng);
    }
    source.frame = vec![0; BINS];
    surface.calls.clear();

    for _ in 0..100 {
        assert_eq!(
            scheduler.tick(&mut surface, &mut source, &mut rng),
            TickOutcome::Continue
        );
    }

    let state = scheduler.state().unwrap();
    for p in state.field.particles() {
        assert!(
            (p.radius - p.base_radius).abs() < 0.01,
            "particle should settle at its base radius"
        );
    }

    // Silence spawns nothing new, and rings spawned before the cut live
    // at most 50 ticks, so a 100-tick silent window drains the queue.
    assert!(state.shockwaves.is_empty());
}

#[test]
fn all_zero_run_never_spawns_even_with_a_favorable_gate() {
    let (mut scheduler, mut surface, mut source) = started_engine(400.0, 400.0, vec![0; BINS]);
    let mut rng = favorable_rng();

    for _ in 0..100 {
        scheduler.tick(&mut surface, &mut source, &mut rng);
    }

    assert_eq!(surface.count(|c| matches!(c, Call::Arc { .. })), 0);
    let state = scheduler.state().unwrap();
    for p in state.field.particles() {
        assert_eq!(p.radius, p.base_radius);
    }
}

#[test]
fn empty_magnitude_array_degrades_to_a_static_ring() {
    let (mut scheduler, mut surface, mut source) = started_engine(400.0, 400.0, Vec::new());
    let mut rng = favorable_rng();

    for _ in 0..10 {
        assert_eq!(
            scheduler.tick(&mut surface, &mut source, &mut rng),
            TickOutcome::Continue
        );
    }

    // Every frame still fades and draws the full ring plus the curve.
    assert_eq!(surface.count(|c| matches!(c, Call::Fade)), 10);
    assert_eq!(surface.count(|c| matches!(c, Call::Circle)), 10 * 256);
    assert_eq!(surface.count(|c| matches!(c, Call::Curve)), 10);
    assert_eq!(surface.count(|c| matches!(c, Call::Arc { .. })), 0);
}

#[test]
fn stop_is_idempotent_and_no_tick_runs_afterwards() {
    let (mut scheduler, mut surface, mut source) = started_engine(400.0, 400.0, bass_heavy_frame());
    let mut rng = favorable_rng();

    scheduler.tick(&mut surface, &mut source, &mut rng);
    scheduler.stop();
    scheduler.stop();

    surface.calls.clear();
    assert_eq!(
        scheduler.tick(&mut surface, &mut source, &mut rng),
        TickOutcome::Stopped
    );
    assert!(surface.calls.is_empty());
    assert!(scheduler.state().is_none());
}

#[test]
fn resize_mid_run_rebuilds_the_ring_for_the_new_extent() {
    let (mut scheduler, mut surface, mut source) = started_engine(400.0, 400.0, vec![0; BINS]);
    let mut rng = favorable_rng();

    scheduler.tick(&mut surface, &mut source, &mut rng);

    surface.width = 1000.0;
    surface.height = 500.0;
    assert_eq!(
        scheduler.tick(&mut surface, &mut source, &mut rng),
        TickOutcome::Continue
    );

    let state = scheduler.state().unwrap();
    assert_eq!(state.field.len(), 256);
    let base = 250.0 * 0.4;
    for p in state.field.particles() {
        assert!((p.base_radius - base).abs() < 1e-3);
        assert_eq!(p.radius, p.base_radius);
    }
}
