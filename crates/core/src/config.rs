//! Simulation configuration.
//!
//! Every tuning constant of the engine lives here rather than being
//! hard-wired: grid geometry (derived from a display extent and a per-cell
//! pixel resolution), the wave-speed constant, damping and amplitude
//! bounds, oscillator defaults, and the wall layout. The defaults reproduce
//! the reference scene: a 1000x800 display at 5 px per cell (200x160
//! cells), a two-tone line source on the right edge, and a vertical barrier
//! with two gaps. None of the constants are physically calibrated; they are
//! tuning parameters.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::obstacles::Obstacle;

/// Closed amplitude range the integrator clamps into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmplitudeRange {
    /// Lower clamp bound.
    pub min: f32,
    /// Upper clamp bound.
    pub max: f32,
}

/// Per-step velocity attenuation factor and the range it may be nudged
/// within. Values at the bounds saturate instead of erroring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DampingConfig {
    /// Starting factor, clamped into `[min, max]` at construction.
    pub initial: f32,
    /// Lowest factor a nudge can reach.
    pub min: f32,
    /// Highest factor a nudge can reach (1.0 = lossless).
    pub max: f32,
    /// Step applied per raise/lower command.
    pub step: f32,
}

/// Display gamma hint. The engine stores and clamps it on behalf of the
/// render layer but never interprets it; color mapping is external.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GammaConfig {
    /// Starting value, clamped into `[min, max]` at construction.
    pub initial: f32,
    /// Lowest value a nudge can reach.
    pub min: f32,
    /// Highest value a nudge can reach.
    pub max: f32,
    /// Step applied per raise/lower command.
    pub step: f32,
}

/// Oscillating line source, positioned in display (pixel) coordinates.
/// The segment is mapped into cell space through the cell resolution when
/// the simulation is built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OscillatorConfig {
    /// Whether the source starts active.
    pub enabled: bool,
    /// Waveform period in seconds.
    pub period: f32,
    /// Smallest period an adjustment can reach; keeps the phase division
    /// away from blow-up.
    pub min_period: f32,
    /// Seconds of period change per unit of scroll delta.
    pub scroll_step: f32,
    /// Horizontal pixel position of the source column.
    pub x: u32,
    /// Topmost pixel of the driven segment.
    pub y_start: u32,
    /// Bottommost pixel of the driven segment.
    pub y_end: u32,
    /// Phase offset of the second tone, in radians.
    pub detune: f32,
}

/// Complete engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Display width in pixels; the grid width is derived from it.
    pub display_width: u32,
    /// Display height in pixels; the grid height is derived from it.
    pub display_height: u32,
    /// Square cell edge length in pixels.
    pub cell_resolution: u32,
    /// Tuning constant scaling the Laplacian's pull on velocity.
    pub wave_speed: f32,
    /// Amplitude clamp bounds.
    pub amplitude: AmplitudeRange,
    /// Velocity damping factor and nudge range.
    pub damping: DampingConfig,
    /// Display gamma hint and nudge range.
    pub gamma: GammaConfig,
    /// Line source configuration.
    pub oscillator: OscillatorConfig,
    /// Wall rectangles in cell coordinates.
    pub obstacles: Vec<Obstacle>,
    /// Whether walls start enabled.
    pub obstacles_enabled: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            display_width: 1000,
            display_height: 800,
            cell_resolution: 5,
            wave_speed: 100.0,
            amplitude: AmplitudeRange {
                min: -100.0,
                max: 100.0,
            },
            damping: DampingConfig {
                initial: 0.995,
                min: 0.9,
                max: 1.0,
                step: 0.005,
            },
            gamma: GammaConfig {
                initial: 0.5,
                min: 0.1,
                max: 2.0,
                step: 0.1,
            },
            oscillator: OscillatorConfig {
                enabled: true,
                period: 0.6,
                min_period: 0.1,
                scroll_step: 0.01,
                x: 999,
                y_start: 300,
                y_end: 500,
                detune: 0.1 * std::f32::consts::PI,
            },
            // Vertical barrier with two gaps, left of center.
            obstacles: vec![
                Obstacle::new(60, 0, 4, 60),
                Obstacle::new(60, 68, 4, 20),
                Obstacle::new(60, 96, 4, 76),
            ],
            obstacles_enabled: true,
        }
    }
}

impl SimConfig {
    /// Grid width in cells, by integer division of the display extent.
    pub fn cols(&self) -> usize {
        (self.display_width / self.cell_resolution) as usize
    }

    /// Grid height in cells, by integer division of the display extent.
    pub fn rows(&self) -> usize {
        (self.display_height / self.cell_resolution) as usize
    }

    /// Reject invalid parameters before the simulation is built.
    ///
    /// Saturating ranges (damping, gamma, period) are only checked for
    /// internal consistency; an out-of-range starting value is clamped at
    /// construction, not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] naming the first offending
    /// value.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.cell_resolution == 0 {
            return Err(SimError::invalid("cell_resolution", "must be positive"));
        }
        if self.cols() == 0 {
            return Err(SimError::invalid(
                "display_width",
                format!(
                    "must span at least one {} px cell, got {}",
                    self.cell_resolution, self.display_width
                ),
            ));
        }
        if self.rows() == 0 {
            return Err(SimError::invalid(
                "display_height",
                format!(
                    "must span at least one {} px cell, got {}",
                    self.cell_resolution, self.display_height
                ),
            ));
        }
        if !self.wave_speed.is_finite() || self.wave_speed <= 0.0 {
            return Err(SimError::invalid(
                "wave_speed",
                format!("must be finite and positive, got {}", self.wave_speed),
            ));
        }
        if !self.amplitude.min.is_finite()
            || !self.amplitude.max.is_finite()
            || self.amplitude.min >= self.amplitude.max
        {
            return Err(SimError::invalid(
                "amplitude",
                format!(
                    "bounds must be finite with min < max, got [{}, {}]",
                    self.amplitude.min, self.amplitude.max
                ),
            ));
        }
        Self::validate_span("damping", self.damping.min, self.damping.max, self.damping.step)?;
        Self::validate_span("gamma", self.gamma.min, self.gamma.max, self.gamma.step)?;

        let osc = &self.oscillator;
        if !osc.min_period.is_finite() || osc.min_period <= 0.0 {
            return Err(SimError::invalid(
                "oscillator.min_period",
                format!("must be finite and positive, got {}", osc.min_period),
            ));
        }
        if !osc.period.is_finite() || osc.period <= 0.0 {
            return Err(SimError::invalid(
                "oscillator.period",
                format!("must be finite and positive, got {}", osc.period),
            ));
        }
        if !osc.scroll_step.is_finite() || osc.scroll_step < 0.0 {
            return Err(SimError::invalid(
                "oscillator.scroll_step",
                format!("must be finite and non-negative, got {}", osc.scroll_step),
            ));
        }
        if !osc.detune.is_finite() {
            return Err(SimError::invalid(
                "oscillator.detune",
                format!("must be finite, got {}", osc.detune),
            ));
        }
        if osc.y_start > osc.y_end {
            return Err(SimError::invalid(
                "oscillator.y_start",
                format!("must not exceed y_end, got {} > {}", osc.y_start, osc.y_end),
            ));
        }
        Ok(())
    }

    fn validate_span(
        name: &'static str,
        min: f32,
        max: f32,
        step: f32,
    ) -> Result<(), SimError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(SimError::invalid(
                name,
                format!("bounds must be finite with min <= max, got [{min}, {max}]"),
            ));
        }
        if !step.is_finite() || step < 0.0 {
            return Err(SimError::invalid(
                name,
                format!("step must be finite and non-negative, got {step}"),
            ));
        }
        Ok(())
    }
}
