pub mod analyzer;
pub mod audio_stream;

pub use analyzer::{SharedSpectrum, SpectrumAnalyzer};
pub use audio_stream::{AudioStream, create_audio_stream};
