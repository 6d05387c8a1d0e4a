//! Discretized simulation domain.

mod wave_field;

pub use wave_field::WaveField;
