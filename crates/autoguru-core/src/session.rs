//! Simulation session
//!
//! Wraps the drivetrain model with the start/stop lifecycle a front end
//! drives: a running flag, the simulated clock, gear requests that only count
//! while running, and a reset to idle on stop.

use crate::config::{EngineConfig, TransmissionKind};
use crate::curve::CurvePoint;
use crate::drivetrain::DrivetrainStateMachine;
use crate::noise::{NoiseSource, RandomNoise};
use crate::power::horsepower;
use crate::settings::SimulationSettings;
use crate::state::SimulationState;
use crate::telemetry::Telemetry;

/// One simulator run
pub struct Session<T = RandomNoise, J = RandomNoise> {
    settings: SimulationSettings,
    machine: DrivetrainStateMachine<T, J>,
    state: SimulationState,
    running: bool,
    /// Simulated seconds since start
    sim_time: f64,
}

impl Session {
    /// Session using the settings' seed, or entropy when none is set
    pub fn new(settings: SimulationSettings) -> Self {
        let machine = match settings.seed {
            Some(seed) => DrivetrainStateMachine::seeded(seed),
            None => DrivetrainStateMachine::new(),
        };
        Self::with_machine(settings, machine)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SimulationSettings::default())
    }
}

impl<T: NoiseSource, J: NoiseSource> Session<T, J> {
    /// Session around an existing machine
    pub fn with_machine(settings: SimulationSettings, machine: DrivetrainStateMachine<T, J>) -> Self {
        let settings = settings.sanitized();
        Self {
            state: SimulationState::reset(settings.engine),
            settings,
            machine,
            running: false,
            sim_time: 0.0,
        }
    }

    /// Start ticking from the current state
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.sim_time = 0.0;
        tracing::info!(
            "Simulation started: {} cc, {}",
            self.state.config.displacement_cc(),
            self.state.config.transmission()
        );
    }

    /// Stop and return the engine to idle in neutral with the throttle closed
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.state = SimulationState::reset(self.state.config);
        tracing::info!("Simulation stopped after {:.1}s", self.sim_time);
    }

    /// Whether the session is ticking
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Simulated seconds since the last start
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Current state
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Current settings, including the live engine selection
    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Advance one tick. Returns `None` while stopped.
    pub fn step(&mut self) -> Option<Telemetry> {
        if !self.running {
            return None;
        }
        let dt = self.settings.tick_seconds();
        self.sim_time += dt;
        self.state = self
            .machine
            .tick(self.state, self.state.throttle as i32, dt);
        Some(self.telemetry())
    }

    /// Shift up one gear. Ignored while stopped or in top gear.
    pub fn gear_up(&mut self) -> bool {
        self.apply_gear_request(SimulationState::gear_up)
    }

    /// Shift down one gear. Ignored while stopped or in neutral.
    pub fn gear_down(&mut self) -> bool {
        self.apply_gear_request(SimulationState::gear_down)
    }

    fn apply_gear_request(&mut self, request: fn(SimulationState) -> SimulationState) -> bool {
        if !self.running {
            return false;
        }
        let before = self.state.gear;
        self.state = request(self.state);
        self.state.gear != before
    }

    /// Set throttle opening (0-100, clamped)
    pub fn set_throttle(&mut self, value: i32) {
        self.state = self.state.set_throttle(value);
    }

    /// Select an engine size; unsupported sizes fall back to 1200 cc
    pub fn set_displacement(&mut self, displacement_cc: u32) {
        self.set_config(self.state.config.with_displacement(displacement_cc));
    }

    /// Select a transmission
    pub fn set_transmission(&mut self, transmission: TransmissionKind) {
        self.set_config(self.state.config.with_transmission(transmission));
    }

    /// Replace the engine selection; takes effect on the next tick
    pub fn set_config(&mut self, config: EngineConfig) {
        self.state = self.state.set_config(config);
        self.settings.engine = config;
    }

    /// Snapshot of the current state with torque and horsepower at the current RPM
    pub fn telemetry(&mut self) -> Telemetry {
        let state = self.state;
        let torque = self
            .machine
            .torque_at(state.rpm, &state.config, state.throttle);
        Telemetry {
            sim_time: self.sim_time,
            rpm: state.rpm,
            torque,
            horsepower: horsepower(torque, state.rpm),
            gear: state.gear,
            gear_label: state.gear_label(),
            throttle: state.throttle,
            transmission: state.config.transmission(),
            displacement_cc: state.config.displacement_cc(),
            shifting: state.is_shifting(),
            vehicle_speed: state.vehicle_speed(),
        }
    }

    /// Torque/horsepower curve for the current engine and throttle
    pub fn power_curve(&mut self) -> Vec<CurvePoint> {
        let grid = self.settings.curve;
        self.machine
            .sample_curve(&self.state.config, self.state.throttle, &grid)
    }
}
