//! Field integration.
//!
//! One call to [`step_wave_cpu`] advances the whole grid by one time step:
//! stencil computation, velocity update with damping, amplitude update with
//! clamping, and obstacle suppression. The pass reads only the previous
//! state, so the caller publishes the result with a buffer swap afterwards.

mod wave;

pub use wave::{step_wave_cpu, WaveStepParams};
