//! Discrete input commands from the external driver.
//!
//! The render/input collaborator translates key presses, wheel motion, and
//! pointer state into these commands and submits them ahead of each frame;
//! the controller drains the queue at the start of `update`. Commands are
//! plain data so a driver can also script them (the headless demo does).

/// Sign of a pointer perturbation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintPolarity {
    /// Force the cell to the maximum amplitude.
    Crest,
    /// Force the cell to the minimum amplitude.
    Trough,
}

/// One discrete external event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimCommand {
    /// Toggle the pause flag.
    TogglePause,
    /// Zero amplitude and velocity across the whole field.
    ResetField,
    /// Toggle the oscillating line source.
    ToggleOscillator,
    /// Toggle whether walls affect the integrator.
    ToggleObstacles,
    /// Toggle the overlay-visibility hint (display-only state).
    ToggleOverlay,
    /// Raise damping by one configured step, saturating at the maximum.
    RaiseDamping,
    /// Lower damping by one configured step, saturating at the minimum.
    LowerDamping,
    /// Raise the gamma hint by one configured step.
    RaiseGamma,
    /// Lower the gamma hint by one configured step.
    LowerGamma,
    /// Nudge the oscillator period by a scroll-like delta.
    AdjustPeriod(f32),
    /// Force a single cell to a signed extreme value.
    Paint {
        /// Target column in cell coordinates.
        col: usize,
        /// Target row in cell coordinates.
        row: usize,
        /// Which extreme to write.
        polarity: PaintPolarity,
    },
}

/// Commands pending for the next frame, drained in submission order.
#[derive(Debug)]
pub struct InputQueue {
    pending: Vec<SimCommand>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(8),
        }
    }

    /// Queue a command for the next `update`.
    pub fn submit(&mut self, command: SimCommand) {
        self.pending.push(command);
    }

    /// Commands not yet drained.
    pub fn pending(&self) -> &[SimCommand] {
        &self.pending
    }

    /// Drain all pending commands in submission order.
    pub fn take_pending(&mut self) -> Vec<SimCommand> {
        std::mem::take(&mut self.pending)
    }
}
