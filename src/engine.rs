pub mod particles;
pub mod scene;
pub mod scheduler;
pub mod shockwave;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_support;

pub use particles::{Particle, ParticleField};
pub use scheduler::{EngineError, EngineState, FrameScheduler, SpectrumSource, TickOutcome};
pub use shockwave::{Shockwave, ShockwaveQueue};
pub use surface::{Hsla, LinearGradient, RenderSurface};
