//! Engine error types.
//!
//! The engine has exactly two failure points, both at construction time:
//! field buffer allocation and configuration validation. Per-step numeric
//! work is total over floats and has no error path.

use std::error::Error;
use std::fmt;

/// Errors surfaced while building or configuring a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A field buffer could not be allocated. Fatal: no partially
    /// constructed simulation exists, and callers are expected to terminate
    /// with a non-zero status rather than retry.
    AllocationFailed {
        /// Number of cells the failed buffer was sized for.
        cells: usize,
    },

    /// A configuration value was rejected before simulation start.
    /// Saturating adjustments (damping and period clamps) are not errors;
    /// this covers values no clamp is specified for, such as zero grid
    /// dimensions or a non-positive oscillator period.
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::AllocationFailed { cells } => {
                write!(f, "failed to allocate field buffer of {cells} cells")
            }
            SimError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
        }
    }
}

impl Error for SimError {}
