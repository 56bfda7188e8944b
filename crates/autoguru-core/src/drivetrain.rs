//! Drivetrain state machine
//!
//! Advances [`SimulationState`] by one time step. Each tick:
//! 1. automatic boxes may start a shift,
//! 2. a shift in flight suppresses the normal RPM model,
//! 3. otherwise RPM moves according to the drivetrain mode (neutral, CVT or
//!    fixed ratio),
//! 4. mechanical jitter is added and RPM is clamped to the operating range.

use crate::config::{EngineConfig, TransmissionKind};
use crate::curve::{self, CurveGrid, CurvePoint};
use crate::gearbox::{gear_ratio, resync_rpm};
use crate::noise::{NoiseSource, RandomNoise};
use crate::shift;
use crate::state::{clamp_cvt_ratio, clamp_rpm, SimulationState, IDLE_RPM, REDLINE_RPM};
use crate::torque::torque;

/// Neutral revs respond this many times faster than a CVT
const NEUTRAL_RESPONSE: f64 = 2.0;

/// CVT holds the engine between these speeds depending on throttle
const CVT_BASE_RPM: f64 = 1500.0;
const CVT_BAND_RPM: f64 = 2500.0;

/// Converts the acceleration term into RPM per second
const ACCEL_GAIN: f64 = 5000.0;

/// Below this throttle the engine brakes
const ENGINE_BRAKE_THROTTLE: u8 = 10;
const ENGINE_BRAKE_RATE: f64 = 10.0;

/// RPM drop per second while an AMT/IMT is between gears
const SHIFT_RPM_DECAY: f64 = 500.0;

/// Shift timers below this are finished
const SHIFT_SETTLE_EPSILON: f64 = 1e-9;

/// Peak-to-peak random RPM wobble per tick
const JITTER_SPAN_RPM: f64 = 50.0;

/// Steps the engine/gearbox model.
///
/// Holds the two noise sources: one for torque, one for RPM jitter. The state
/// itself is passed in and returned so the caller decides who owns it.
#[derive(Debug, Clone)]
pub struct DrivetrainStateMachine<T = RandomNoise, J = RandomNoise> {
    torque_noise: T,
    jitter_noise: J,
}

impl DrivetrainStateMachine {
    /// Machine with entropy-seeded noise
    pub fn new() -> Self {
        Self::with_noise(RandomNoise::from_entropy(), RandomNoise::from_entropy())
    }

    /// Machine with reproducible noise
    pub fn seeded(seed: u64) -> Self {
        Self::with_noise(
            RandomNoise::seeded(seed),
            RandomNoise::seeded(seed.wrapping_add(1)),
        )
    }
}

impl Default for DrivetrainStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NoiseSource, J: NoiseSource> DrivetrainStateMachine<T, J> {
    /// Machine with caller-supplied noise sources
    pub fn with_noise(torque_noise: T, jitter_noise: J) -> Self {
        Self {
            torque_noise,
            jitter_noise,
        }
    }

    /// Torque at `rpm`, drawing from this machine's torque noise
    pub fn torque_at(&mut self, rpm: f64, config: &EngineConfig, throttle: u8) -> f64 {
        torque(rpm, config.displacement_cc(), throttle, &mut self.torque_noise)
    }

    /// Sample the torque/horsepower curve, drawing from the torque noise
    pub fn sample_curve(
        &mut self,
        config: &EngineConfig,
        throttle: u8,
        grid: &CurveGrid,
    ) -> Vec<CurvePoint> {
        curve::sample_curve(config, throttle, grid, &mut self.torque_noise)
    }

    /// Advance `state` by `dt` seconds with `throttle` (0-100, clamped).
    ///
    /// The incoming state is sanitized first and the throttle is stored in the
    /// returned state. A negative or non-finite `dt` advances nothing but
    /// jitter.
    pub fn tick(&mut self, state: SimulationState, throttle: i32, dt: f64) -> SimulationState {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let mut next = state.sanitized().set_throttle(throttle);

        if next.transmission().is_automatic() && next.gear > 0 {
            next = shift::maybe_shift(next);
        }

        if next.is_shifting() {
            return advance_shift(next, dt);
        }

        next = match (next.gear, next.transmission()) {
            (0, _) => neutral(next, dt),
            (_, TransmissionKind::Cvt) => cvt(next, dt),
            _ => self.fixed_ratio(next, dt),
        };

        next.rpm += self.jitter_noise.centered() * JITTER_SPAN_RPM;
        next.rpm = clamp_rpm(next.rpm);
        next
    }

    /// In gear with a fixed ratio: throttle accelerates through the torque
    /// curve, a closed throttle engine-brakes.
    fn fixed_ratio(&mut self, state: SimulationState, dt: f64) -> SimulationState {
        let ratio = gear_ratio(state.gear);
        let torque = self.torque_at(state.rpm, &state.config, state.throttle);
        let accel = (state.throttle as f64 / 100.0) * torque / (1000.0 * ratio);
        let mut delta = accel * ACCEL_GAIN * dt;

        if state.throttle < ENGINE_BRAKE_THROTTLE {
            delta -= (ENGINE_BRAKE_THROTTLE - state.throttle) as f64 * ENGINE_BRAKE_RATE * dt;
        }

        SimulationState {
            rpm: (state.rpm + delta).max(IDLE_RPM),
            ..state
        }
    }
}

/// No load: revs chase a throttle-proportional target quickly
fn neutral(state: SimulationState, dt: f64) -> SimulationState {
    let throttle = state.throttle as f64 / 100.0;
    let target = IDLE_RPM + throttle * (REDLINE_RPM - IDLE_RPM);
    SimulationState {
        rpm: state.rpm + (target - state.rpm) * NEUTRAL_RESPONSE * dt,
        ..state
    }
}

/// CVT holds revs in a throttle-dependent band regardless of road speed
fn cvt(state: SimulationState, dt: f64) -> SimulationState {
    let throttle = state.throttle as f64 / 100.0;
    let target = CVT_BASE_RPM + throttle * CVT_BAND_RPM;
    SimulationState {
        rpm: state.rpm + (target - state.rpm) * dt,
        cvt_ratio: clamp_cvt_ratio(state.cvt_ratio),
        ..state
    }
}

/// Count down a shift in flight. DCT re-syncs instantly from road speed,
/// AMT/IMT let the revs sag toward idle.
fn advance_shift(state: SimulationState, dt: f64) -> SimulationState {
    let mut remaining = state.shift_delay_remaining - dt;
    if remaining < SHIFT_SETTLE_EPSILON {
        remaining = 0.0;
    }

    let rpm = match state.transmission() {
        TransmissionKind::Dct => resync_rpm(state.rpm, state.gear),
        TransmissionKind::Amt | TransmissionKind::Imt => {
            (state.rpm - SHIFT_RPM_DECAY * dt).max(IDLE_RPM)
        }
        // Only reachable when the transmission was swapped mid-shift
        TransmissionKind::Manual | TransmissionKind::Cvt => state.rpm,
    };

    SimulationState {
        rpm,
        shift_delay_remaining: remaining,
        ..state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FixedNoise;

    fn quiet() -> DrivetrainStateMachine<FixedNoise, FixedNoise> {
        DrivetrainStateMachine::with_noise(FixedNoise::centered(), FixedNoise::centered())
    }

    fn state(kind: TransmissionKind, gear: u8, rpm: f64) -> SimulationState {
        SimulationState {
            gear,
            rpm,
            ..SimulationState::reset(EngineConfig::new(1200, kind))
        }
    }

    #[test]
    fn test_neutral_revs_toward_throttle_target() {
        let mut machine = quiet();
        let next = machine.tick(state(TransmissionKind::Manual, 0, 800.0), 50, 0.1);
        // target 4400, 20% of the gap closed
        assert!((next.rpm - 1520.0).abs() < 1e-9, "rpm {}", next.rpm);
        assert_eq!(next.throttle, 50);
    }

    #[test]
    fn test_engine_braking() {
        let mut machine = quiet();
        let next = machine.tick(state(TransmissionKind::Manual, 1, 2000.0), 0, 0.1);
        assert!((next.rpm - 1990.0).abs() < 1e-9, "rpm {}", next.rpm);
    }

    #[test]
    fn test_fixed_ratio_accelerates() {
        let mut machine = quiet();
        let start = state(TransmissionKind::Manual, 1, 3000.0);
        let expected_torque = torque(3000.0, 1200, 100, &mut FixedNoise::centered());
        let expected = 3000.0 + expected_torque / (1000.0 * 3.909) * 5000.0 * 0.1;

        let next = machine.tick(start, 100, 0.1);
        assert!((next.rpm - expected).abs() < 1e-9);
    }

    #[test]
    fn test_amt_shift_sags_revs() {
        let mut machine = quiet();
        let next = machine.tick(state(TransmissionKind::Amt, 1, 2600.0), 100, 0.1);
        assert_eq!(next.gear, 2);
        assert!((next.shift_delay_remaining - 0.4).abs() < 1e-12);
        assert!((next.rpm - 2550.0).abs() < 1e-9);

        // The shift lasts five ticks in total
        let mut s = next;
        for _ in 0..4 {
            assert!(s.is_shifting());
            s = machine.tick(s, 100, 0.1);
        }
        assert!(!s.is_shifting());
        assert_eq!(s.shift_delay_remaining, 0.0);
    }

    #[test]
    fn test_light_throttle_engine_braking() {
        let mut machine = quiet();
        let expected_torque = torque(2000.0, 1200, 5, &mut FixedNoise::centered());
        let accel = 0.05 * expected_torque / (1000.0 * 3.909) * 5000.0 * 0.1;
        // (10 - 5) * 10 rpm/s over 0.1 s
        let expected = 2000.0 + accel - 5.0;

        let next = machine.tick(state(TransmissionKind::Manual, 1, 2000.0), 5, 0.1);
        assert!((next.rpm - expected).abs() < 1e-9, "rpm {}", next.rpm);
        assert!(next.rpm < 2000.0);
    }

    #[test]
    fn test_imt_shift_lasts_three_ticks() {
        let mut machine = quiet();
        let mut s = machine.tick(state(TransmissionKind::Imt, 2, 3100.0), 100, 0.1);
        assert_eq!(s.gear, 3);
        assert!((s.shift_delay_remaining - 0.2).abs() < 1e-12);
        assert!((s.rpm - 3050.0).abs() < 1e-9);

        for _ in 0..2 {
            assert!(s.is_shifting());
            s = machine.tick(s, 100, 0.1);
        }
        assert!(!s.is_shifting());
        assert_eq!(s.gear, 3);
        assert!((s.rpm - 2950.0).abs() < 1e-9, "rpm {}", s.rpm);
    }

    #[test]
    fn test_out_of_range_state_is_clamped() {
        let mut machine = quiet();
        let wild = SimulationState {
            gear: 9,
            rpm: 9000.0,
            shift_delay_remaining: 0.5,
            ..state(TransmissionKind::Amt, 0, 800.0)
        };
        let next = machine.tick(wild, 50, 0.1);
        assert!(next.gear <= 6);
        assert!((800.0..=8000.0).contains(&next.rpm), "rpm {}", next.rpm);
    }

    #[test]
    fn test_dct_shift_resyncs() {
        let mut machine = quiet();
        let next = machine.tick(state(TransmissionKind::Dct, 2, 3100.0), 60, 0.1);
        assert_eq!(next.gear, 3);
        assert!((next.rpm - 3100.0).abs() < 1e-9);
        assert_eq!(next.shift_delay_remaining, 0.0);
    }

    #[test]
    fn test_cvt_converges_without_shifting() {
        let mut machine = quiet();
        let mut s = state(TransmissionKind::Cvt, 1, 800.0);
        for _ in 0..300 {
            s = machine.tick(s, 40, 0.1);
            assert_eq!(s.gear, 1);
        }
        assert!((s.rpm - 2500.0).abs() < 1e-3, "rpm {}", s.rpm);
        assert!((0.5..=2.5).contains(&s.cvt_ratio));
    }

    #[test]
    fn test_swapped_mid_shift_holds_revs() {
        let mut machine = quiet();
        let start = SimulationState {
            shift_delay_remaining: 0.3,
            ..state(TransmissionKind::Manual, 3, 4200.0)
        };
        let next = machine.tick(start, 80, 0.1);
        assert_eq!(next.rpm, 4200.0);
        assert!((next.shift_delay_remaining - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_bad_dt_advances_nothing() {
        let mut machine = quiet();
        let start = state(TransmissionKind::Manual, 0, 1200.0);
        assert_eq!(machine.tick(start, 100, f64::NAN).rpm, 1200.0);
        assert_eq!(machine.tick(start, 100, -1.0).rpm, 1200.0);
    }

    #[test]
    fn test_jitter_bounded() {
        let mut machine = DrivetrainStateMachine::with_noise(
            FixedNoise::centered(),
            FixedNoise::new(0.0),
        );
        let next = machine.tick(state(TransmissionKind::Manual, 0, 3000.0), 0, 0.0);
        assert_eq!(next.rpm, 2975.0);
    }

    #[test]
    fn test_rpm_clamped_at_redline() {
        let mut machine = quiet();
        // Oversized step overshoots the neutral target
        let next = machine.tick(state(TransmissionKind::Manual, 0, 800.0), 100, 1.0);
        assert_eq!(next.rpm, REDLINE_RPM);
    }
}
