//! Simulation controller.
//!
//! [`WaveSimulation`] owns the field, the line source, the wall set, and
//! every tunable, and is the single mutator of the grid: the external
//! driver submits commands, calls [`WaveSimulation::update`] once per frame
//! with the elapsed wall-clock time, and reads the amplitude view back
//! after the call returns. `update` mutates `velocity` and the scratch
//! buffer internally, so readers must never sample mid-call; from the
//! caller's side the buffer swap makes each frame atomic.

pub mod input_queue;

pub use input_queue::{InputQueue, PaintPolarity, SimCommand};

use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::grid::WaveField;
use crate::obstacles::ObstacleSet;
use crate::solver::{step_wave_cpu, WaveStepParams};
use crate::source::{self, Oscillator};

/// Snapshot of controller state for overlays and logging.
#[derive(Debug, Clone, Copy)]
pub struct SimulationStats {
    /// Accumulated simulated time in seconds.
    pub simulation_time: f32,
    /// Number of integrated frames.
    pub frame_number: u64,
    /// Whether the simulation is paused.
    pub paused: bool,
    /// Current velocity damping factor.
    pub damping: f32,
    /// Current display gamma hint.
    pub gamma: f32,
    /// Current oscillator period in seconds.
    pub oscillator_period: f32,
    /// Whether the line source is driving cells.
    pub oscillator_enabled: bool,
    /// Whether walls affect the integrator.
    pub obstacles_enabled: bool,
    /// Overlay-visibility hint for the render layer.
    pub overlay_visible: bool,
    /// Sum of absolute cell amplitudes, a cheap energy proxy.
    pub total_amplitude: f32,
}

/// The simulation engine: grid, sources, walls, tunables, and pause state.
pub struct WaveSimulation {
    field: WaveField,
    oscillator: Oscillator,
    obstacles: ObstacleSet,
    queue: InputQueue,
    config: SimConfig,
    damping: f32,
    gamma: f32,
    paused: bool,
    overlay_visible: bool,
    simulation_time: f32,
    frame_number: u64,
}

impl WaveSimulation {
    /// Build a simulation from a configuration.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidParameter`] if the configuration is rejected and
    /// [`SimError::AllocationFailed`] if the field buffers cannot be
    /// allocated. Both are fatal: callers should terminate with a non-zero
    /// status rather than retry.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let field = WaveField::new(config.cols(), config.rows())?;
        let oscillator =
            Oscillator::from_config(&config.oscillator, config.cell_resolution, config.cols(), config.rows())
                .with_peak(config.amplitude.max);
        let obstacles = ObstacleSet::new(config.obstacles.clone(), config.obstacles_enabled);
        let damping = config.damping.initial.clamp(config.damping.min, config.damping.max);
        let gamma = config.gamma.initial.clamp(config.gamma.min, config.gamma.max);

        info!(
            cols = field.width(),
            rows = field.height(),
            wave_speed = config.wave_speed,
            damping,
            walls = obstacles.rects().len(),
            "wave simulation initialized"
        );

        Ok(Self {
            field,
            oscillator,
            obstacles,
            queue: InputQueue::new(),
            config,
            damping,
            gamma,
            paused: false,
            overlay_visible: true,
            simulation_time: 0.0,
            frame_number: 0,
        })
    }

    /// Queue a command for the next frame.
    pub fn submit(&mut self, command: SimCommand) {
        self.queue.submit(command);
    }

    /// Advance one frame.
    ///
    /// Ordering within the frame is fixed: command drain, pointer paint,
    /// source injection, stencil integration, buffer swap. Injection runs
    /// strictly before integration so injected values participate in this
    /// frame's Laplacian.
    ///
    /// State commands (toggles, nudges, reset) always apply. If the
    /// simulation is paused once they have been applied, the frame ends
    /// there: paint commands are dropped and the grid is untouched.
    pub fn update(&mut self, dt: f32) {
        let mut paints = Vec::new();
        for command in self.queue.take_pending() {
            if let SimCommand::Paint { col, row, polarity } = command {
                paints.push((col, row, polarity));
            } else {
                self.apply_state_command(command);
            }
        }

        if self.paused {
            return;
        }

        for (col, row, polarity) in paints {
            let value = match polarity {
                PaintPolarity::Crest => self.config.amplitude.max,
                PaintPolarity::Trough => self.config.amplitude.min,
            };
            source::paint_at(&mut self.field, col, row, value);
        }

        self.oscillator.advance(dt, &mut self.field);

        let step = WaveStepParams {
            dt,
            wave_speed: self.config.wave_speed,
            damping: self.damping,
            min_amplitude: self.config.amplitude.min,
            max_amplitude: self.config.amplitude.max,
        };
        let width = self.field.width();
        let height = self.field.height();
        let (current, velocity, next) = self.field.step_buffers();
        step_wave_cpu(current, velocity, next, &self.obstacles, width, height, step);
        self.field.swap_buffers();

        self.simulation_time += dt;
        self.frame_number += 1;
        debug!(
            t = self.simulation_time,
            frame = self.frame_number,
            "frame integrated"
        );
    }

    fn apply_state_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::TogglePause => {
                self.paused = !self.paused;
                debug!(paused = self.paused, "pause toggled");
            }
            SimCommand::ResetField => {
                self.field.reset();
                debug!("field reset");
            }
            SimCommand::ToggleOscillator => self.oscillator.toggle(),
            SimCommand::ToggleObstacles => self.obstacles.toggle(),
            SimCommand::ToggleOverlay => self.overlay_visible = !self.overlay_visible,
            SimCommand::RaiseDamping => self.set_damping(self.damping + self.config.damping.step),
            SimCommand::LowerDamping => self.set_damping(self.damping - self.config.damping.step),
            SimCommand::RaiseGamma => self.set_gamma(self.gamma + self.config.gamma.step),
            SimCommand::LowerGamma => self.set_gamma(self.gamma - self.config.gamma.step),
            SimCommand::AdjustPeriod(delta) => self.oscillator.adjust_period(delta),
            // Handled by the frame drain in `update`.
            SimCommand::Paint { .. } => {}
        }
    }

    /// Set the damping factor, clamped to the configured range. Values at
    /// the bounds saturate; this is intentional, not an error.
    pub fn set_damping(&mut self, value: f32) {
        self.damping = value.clamp(self.config.damping.min, self.config.damping.max);
    }

    /// Set the gamma hint, clamped to the configured range.
    pub fn set_gamma(&mut self, value: f32) {
        self.gamma = value.clamp(self.config.gamma.min, self.config.gamma.max);
    }

    /// Current velocity damping factor.
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Current display gamma hint.
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Whether the simulation is paused.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// The field, for cell-level reads.
    pub fn field(&self) -> &WaveField {
        &self.field
    }

    /// Read-only row-major view of the display-ready amplitude buffer.
    /// Values lie within the configured amplitude range after every
    /// `update`.
    pub fn amplitudes(&self) -> &[f32] {
        self.field.amplitudes()
    }

    /// The line source.
    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }

    /// The wall set.
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// The configuration the simulation was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Snapshot the controller state.
    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            simulation_time: self.simulation_time,
            frame_number: self.frame_number,
            paused: self.paused,
            damping: self.damping,
            gamma: self.gamma,
            oscillator_period: self.oscillator.period(),
            oscillator_enabled: self.oscillator.enabled(),
            obstacles_enabled: self.obstacles.enabled(),
            overlay_visible: self.overlay_visible,
            total_amplitude: self.field.amplitudes().iter().map(|v| v.abs()).sum(),
        }
    }
}
