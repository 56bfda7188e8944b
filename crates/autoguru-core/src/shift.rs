//! Automatic shift controller for AMT, IMT and DCT gearboxes

use crate::gearbox::{downshift_rpm, upshift_rpm, TOP_GEAR};
use crate::state::SimulationState;

/// Direction of an automatic gear change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    /// Moved to a higher gear
    Up,
    /// Moved to a lower gear
    Down,
}

/// Decide whether an automatic gearbox changes gear this tick.
///
/// Only AMT, IMT and DCT boxes in gear are considered, and never while a
/// previous shift is still in flight. A shift starts the transmission's shift
/// timer.
pub fn maybe_shift(state: SimulationState) -> SimulationState {
    let Some(duration) = state.transmission().shift_duration() else {
        return state;
    };
    if state.gear == 0 || state.is_shifting() {
        return state;
    }

    let direction = if state.rpm > upshift_rpm(state.gear) && state.gear < TOP_GEAR {
        ShiftDirection::Up
    } else if state.rpm < downshift_rpm(state.gear) && state.gear > 1 {
        ShiftDirection::Down
    } else {
        return state;
    };

    let gear = match direction {
        ShiftDirection::Up => state.gear + 1,
        ShiftDirection::Down => state.gear - 1,
    };
    tracing::debug!(
        "{} {:?}shift {} -> {} at {:.0} rpm",
        state.transmission(),
        direction,
        state.gear,
        gear,
        state.rpm
    );

    SimulationState {
        gear,
        shift_delay_remaining: duration,
        ..state
    }
}
