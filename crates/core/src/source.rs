//! Field drivers: the oscillating line source and pointer painting.
//!
//! Sources write directly into the display-ready amplitude buffer before
//! the integrator runs, so injected values participate in the same frame's
//! stencil. Driven cells are forced, not excited: the waveform overwrites
//! whatever the wave dynamics left there.

use std::f32::consts::TAU;

use tracing::debug;

use crate::config::OscillatorConfig;
use crate::grid::WaveField;

/// Scripted line source forcing a vertical run of cells to a time-varying
/// value every frame.
///
/// The waveform is two detuned sine tones sharing one phase accumulator, so
/// its raw value reaches twice the peak; the integrator's clamp bounds the
/// published field.
#[derive(Debug, Clone)]
pub struct Oscillator {
    enabled: bool,
    amplitude: f32,
    period: f32,
    timer: f32,
    min_period: f32,
    scroll_step: f32,
    detune: f32,
    peak: f32,
    column: usize,
    row_start: usize,
    row_end: usize,
}

impl Oscillator {
    /// Build from configuration, mapping the pixel-space segment into cell
    /// space through the cell resolution and clamping it to the grid.
    pub fn from_config(
        config: &OscillatorConfig,
        cell_resolution: u32,
        cols: usize,
        rows: usize,
    ) -> Self {
        let res = cell_resolution as usize;
        Self {
            enabled: config.enabled,
            amplitude: 0.0,
            period: config.period.max(config.min_period),
            timer: 0.0,
            min_period: config.min_period,
            scroll_step: config.scroll_step,
            detune: config.detune,
            peak: 0.0,
            column: (config.x as usize / res).min(cols - 1),
            row_start: (config.y_start as usize / res).min(rows - 1),
            row_end: (config.y_end as usize / res).min(rows - 1),
        }
    }

    /// Set the per-tone peak value (the configured amplitude maximum).
    pub fn with_peak(mut self, peak: f32) -> Self {
        self.peak = peak;
        self
    }

    /// Advance the phase accumulator by `dt` and force the source cells.
    /// No-op while disabled; the timer does not accumulate either.
    ///
    /// The wrap subtracts the period at most once per call: a `dt` larger
    /// than the period leaves the timer above it for this frame. This
    /// single-subtraction policy is deliberate and pinned by a test.
    pub fn advance(&mut self, dt: f32, field: &mut WaveField) {
        if !self.enabled {
            return;
        }

        self.timer += dt;
        if self.timer >= self.period {
            self.timer -= self.period;
        }

        let phase = TAU * self.timer / self.period;
        self.amplitude = self.peak * phase.sin() + self.peak * (phase - self.detune).sin();

        for row in self.row_start..=self.row_end {
            field.set_value(self.column, row, self.amplitude);
        }
    }

    /// Nudge the period by a scroll-like delta, saturating at the minimum.
    pub fn adjust_period(&mut self, delta: f32) {
        self.period = (self.period + self.scroll_step * delta).max(self.min_period);
        debug!(period = self.period, "oscillator period adjusted");
    }

    /// Flip the enable flag.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Whether the source is currently driving cells.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Current waveform period in seconds.
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Value written into the source cells on the most recent advance.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    #[cfg(test)]
    fn timer(&self) -> f32 {
        self.timer
    }
}

/// Single-cell pointer perturbation.
///
/// Bypasses damping and integration for the frame it lands in; out-of-range
/// coordinates are ignored, as with [`WaveField::set_value`].
pub fn paint_at(field: &mut WaveField, col: usize, row: usize, value: f32) {
    field.set_value(col, row, value);
}
