//! Interactive 2D wave-field simulation engine.
//!
//! A discretized scalar field evolves under a damped wave equation, driven
//! by an oscillating two-tone line source and pointer perturbations, with
//! static wall rectangles acting as hard zero sinks. This crate is the
//! numerical core only: a render/input layer feeds it discrete commands
//! plus a per-frame elapsed time, and reads the amplitude buffer back once
//! per frame to rasterize it. Constants are tuning parameters, not
//! physical ones.
//!
//! # Frame model
//!
//! Single-threaded and frame-driven: one driver calls
//! [`WaveSimulation::update`] once per frame and nothing else touches the
//! grid concurrently. Within a frame the ordering is fixed (queued
//! commands, pointer paint, source injection, stencil integration, buffer
//! swap), so injected values participate in the same frame's Laplacian.
//! The integration pass itself fans out over rows with Rayon, which is
//! invisible to the caller.

pub mod config;
pub mod error;
pub mod grid;
pub mod obstacles;
pub mod simulation;
pub mod solver;
pub mod source;

// Re-export the public surface
pub use config::{AmplitudeRange, DampingConfig, GammaConfig, OscillatorConfig, SimConfig};
pub use error::SimError;
pub use grid::WaveField;
pub use obstacles::{Obstacle, ObstacleSet};
pub use simulation::{InputQueue, PaintPolarity, SimCommand, SimulationStats, WaveSimulation};
pub use solver::{step_wave_cpu, WaveStepParams};
pub use source::Oscillator;
