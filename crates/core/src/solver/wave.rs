//! Damped wave-equation stencil pass.
//!
//! Velocity-form time integration over a weighted 8-neighbor discrete
//! Laplacian:
//!
//! ```text
//! lap  = (N + S + E + W) - 4*center + 0.5 * ((NE + NW + SE + SW) - 4*center)
//! vel += wave_speed * lap * dt;  vel *= damping
//! next = clamp(center + vel * dt, min, max)
//! ```
//!
//! Diagonal neighbors carry half weight to correct for their sqrt(2)
//! greater distance, approximating an isotropic Laplacian on a square grid.
//! A missing neighbor at the domain edge takes the cell's own value
//! (zero-gradient boundary): the field flattens toward edges instead of
//! wrapping or reflecting. Cells inside an enabled wall are hard zero
//! sinks, with amplitude and velocity forced to zero every step.
//!
//! Damping applies every step whether or not a source is active; it is what
//! keeps energy bounded and lets an undriven field decay to rest. Clamping
//! the amplitude but not the velocity is a deliberate saturation
//! nonlinearity: velocity can still carry energy past the clamp boundary.

use rayon::prelude::*;

use crate::obstacles::ObstacleSet;

/// Parameters for one integration pass.
#[derive(Debug, Clone, Copy)]
pub struct WaveStepParams {
    /// Timestep in seconds (wall-clock elapsed time from the driver).
    pub dt: f32,
    /// Tuning constant scaling the Laplacian's pull on velocity.
    pub wave_speed: f32,
    /// Per-step multiplicative velocity attenuation.
    pub damping: f32,
    /// Lower amplitude clamp bound.
    pub min_amplitude: f32,
    /// Upper amplitude clamp bound.
    pub max_amplitude: f32,
}

/// Advance the field by one step.
///
/// Reads only `current` and the previous `velocity`, writes `velocity` and
/// `next`; the caller swaps buffers afterwards. Keeping the pass free of
/// in-place amplitude mutation keeps the stencil order-independent, which
/// is also what makes the row-parallel split below safe.
///
/// Purely deterministic numeric code with no error path; the slices must
/// all be `width * height` long.
#[allow(clippy::too_many_arguments)]
pub fn step_wave_cpu(
    current: &[f32],
    velocity: &mut [f32],
    next: &mut [f32],
    obstacles: &ObstacleSet,
    width: usize,
    height: usize,
    params: WaveStepParams,
) {
    debug_assert_eq!(current.len(), width * height);
    debug_assert_eq!(velocity.len(), current.len());
    debug_assert_eq!(next.len(), current.len());

    next.par_chunks_mut(width)
        .zip(velocity.par_chunks_mut(width))
        .enumerate()
        .for_each(|(row, (next_row, vel_row))| {
            for col in 0..width {
                if obstacles.contains(col, row) {
                    vel_row[col] = 0.0;
                    next_row[col] = 0.0;
                    continue;
                }

                let idx = row * width + col;
                let center = current[idx];

                let n = if row > 0 { current[idx - width] } else { center };
                let s = if row < height - 1 { current[idx + width] } else { center };
                let e = if col < width - 1 { current[idx + 1] } else { center };
                let w = if col > 0 { current[idx - 1] } else { center };

                let ne = if col < width - 1 && row > 0 {
                    current[idx - width + 1]
                } else {
                    center
                };
                let nw = if col > 0 && row > 0 {
                    current[idx - width - 1]
                } else {
                    center
                };
                let se = if col < width - 1 && row < height - 1 {
                    current[idx + width + 1]
                } else {
                    center
                };
                let sw = if col > 0 && row < height - 1 {
                    current[idx + width - 1]
                } else {
                    center
                };

                // Half-weight diagonals: they sit sqrt(2) further out.
                let mut laplacian = (n + s + e + w) - 4.0 * center;
                laplacian += 0.5 * ((ne + nw + se + sw) - 4.0 * center);

                let mut vel = vel_row[col];
                vel += params.wave_speed * laplacian * params.dt;
                vel *= params.damping;
                vel_row[col] = vel;

                next_row[col] =
                    (center + vel * params.dt).clamp(params.min_amplitude, params.max_amplitude);
            }
        });
}
