//! Simulation state and the control operations applied between ticks

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, TransmissionKind};
use crate::gearbox::{self, TOP_GEAR};

/// Engine idle speed, also the lower RPM limit
pub const IDLE_RPM: f64 = 800.0;

/// Rev limit
pub const REDLINE_RPM: f64 = 8000.0;

/// CVT ratio band
pub const CVT_RATIO_MIN: f64 = 0.5;
/// CVT ratio band
pub const CVT_RATIO_MAX: f64 = 2.5;

const CVT_RATIO_INITIAL: f64 = 2.0;

/// Engine and gearbox state at one instant.
///
/// A plain value: every operation consumes a state and returns the next one.
/// Deserialized states are passed through [`SimulationState::sanitized`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSimulationState")]
pub struct SimulationState {
    /// Engine speed, kept within [`IDLE_RPM`]..=[`REDLINE_RPM`]
    pub rpm: f64,
    /// Selected gear, 0 is neutral
    pub gear: u8,
    /// Throttle opening 0-100
    pub throttle: u8,
    /// Seconds left in an automatic shift
    pub shift_delay_remaining: f64,
    /// Current CVT ratio, only meaningful for [`TransmissionKind::Cvt`]
    pub cvt_ratio: f64,
    /// Active engine selection
    pub config: EngineConfig,
}

#[derive(Deserialize)]
struct RawSimulationState {
    rpm: f64,
    gear: u8,
    throttle: u8,
    #[serde(default)]
    shift_delay_remaining: f64,
    #[serde(default = "default_cvt_ratio")]
    cvt_ratio: f64,
    #[serde(default)]
    config: EngineConfig,
}

fn default_cvt_ratio() -> f64 {
    CVT_RATIO_INITIAL
}

impl From<RawSimulationState> for SimulationState {
    fn from(raw: RawSimulationState) -> Self {
        SimulationState {
            rpm: raw.rpm,
            gear: raw.gear,
            throttle: raw.throttle,
            shift_delay_remaining: raw.shift_delay_remaining,
            cvt_ratio: raw.cvt_ratio,
            config: raw.config,
        }
        .sanitized()
    }
}

impl SimulationState {
    /// Idle state for `config`: 800 rpm, neutral, throttle closed
    pub fn reset(config: EngineConfig) -> Self {
        Self {
            rpm: IDLE_RPM,
            gear: 0,
            throttle: 0,
            shift_delay_remaining: 0.0,
            cvt_ratio: CVT_RATIO_INITIAL,
            config,
        }
    }

    /// Pull every field back inside its invariant range.
    ///
    /// Non-finite values fall back to the idle defaults.
    pub fn sanitized(self) -> Self {
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            rpm: clamp_rpm(finite_or(self.rpm, IDLE_RPM)),
            gear: self.gear.min(TOP_GEAR),
            throttle: self.throttle.min(100),
            shift_delay_remaining: finite_or(self.shift_delay_remaining, 0.0).max(0.0),
            cvt_ratio: clamp_cvt_ratio(finite_or(self.cvt_ratio, CVT_RATIO_INITIAL)),
            config: self.config,
        }
    }

    /// Whether an automatic shift is in flight
    pub fn is_shifting(&self) -> bool {
        self.shift_delay_remaining > 0.0
    }

    /// Whether the gearbox is in neutral
    pub fn is_neutral(&self) -> bool {
        self.gear == 0
    }

    /// Transmission of the active config
    pub fn transmission(&self) -> TransmissionKind {
        self.config.transmission()
    }

    /// Gear as displayed: "N" or the gear number
    pub fn gear_label(&self) -> String {
        gearbox::gear_label(self.gear)
    }

    /// Estimated road speed (arbitrary units)
    pub fn vehicle_speed(&self) -> f64 {
        gearbox::vehicle_speed(self.rpm, self.gear)
    }

    /// Select the next gear up; no-op in top gear
    pub fn gear_up(self) -> Self {
        if self.gear >= TOP_GEAR {
            return self;
        }
        Self {
            gear: self.gear + 1,
            ..self
        }
    }

    /// Select the next gear down; no-op in neutral
    pub fn gear_down(self) -> Self {
        if self.gear == 0 {
            return self;
        }
        Self {
            gear: self.gear - 1,
            ..self
        }
    }

    /// Set throttle opening, clamped to 0-100
    pub fn set_throttle(self, value: i32) -> Self {
        Self {
            throttle: clamp_throttle(value),
            ..self
        }
    }

    /// Swap the engine selection.
    ///
    /// Nothing else is reset: a shift in flight keeps counting down and the
    /// CVT ratio is kept.
    pub fn set_config(self, config: EngineConfig) -> Self {
        if config.transmission() != self.config.transmission() && self.is_shifting() {
            tracing::debug!(
                "Transmission changed {} -> {} with {:.2}s of shift remaining",
                self.config.transmission(),
                config.transmission(),
                self.shift_delay_remaining
            );
        }
        Self { config, ..self }
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::reset(EngineConfig::default())
    }
}

/// Clamp an external throttle request to 0-100
pub fn clamp_throttle(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

/// Clamp RPM into the engine's operating range
pub fn clamp_rpm(rpm: f64) -> f64 {
    rpm.clamp(IDLE_RPM, REDLINE_RPM)
}

/// Clamp a CVT ratio into its band
pub fn clamp_cvt_ratio(ratio: f64) -> f64 {
    ratio.clamp(CVT_RATIO_MIN, CVT_RATIO_MAX)
}
