//! rhythmfx - an audio-reactive particle visualizer.
//!
//! Captured audio is transformed into a byte frequency spectrum, which
//! drives a ring of particles, a connective gradient curve, and
//! bass-triggered shockwave rings.

pub mod audio;
pub mod config;
pub mod engine;
pub mod gui;
pub mod visual;
