//! Gear ratio and shift point tables
//!
//! All tables are indexed by gear, with index 0 being neutral.

/// Highest selectable gear
pub const TOP_GEAR: u8 = 6;

/// Gear ratios (simplified, no final drive)
pub const GEAR_RATIOS: [f64; 7] = [0.0, 3.909, 2.056, 1.269, 0.906, 0.779, 0.651];

/// RPM above which an automatic box moves up from this gear
pub const UPSHIFT_RPM: [f64; 7] = [0.0, 2500.0, 3000.0, 3500.0, 4000.0, 4500.0, 5000.0];

/// RPM below which an automatic box moves down from this gear
pub const DOWNSHIFT_RPM: [f64; 7] = [0.0, 800.0, 1200.0, 1500.0, 1800.0, 2000.0, 2200.0];

/// Multiplier between gear ratio and the arbitrary speed unit
const SPEED_SCALE: f64 = 100.0;

fn index(gear: u8) -> usize {
    gear.min(TOP_GEAR) as usize
}

/// Ratio for `gear`; neutral is 0
pub fn gear_ratio(gear: u8) -> f64 {
    GEAR_RATIOS[index(gear)]
}

/// Upshift point for `gear`
pub fn upshift_rpm(gear: u8) -> f64 {
    UPSHIFT_RPM[index(gear)]
}

/// Downshift point for `gear`
pub fn downshift_rpm(gear: u8) -> f64 {
    DOWNSHIFT_RPM[index(gear)]
}

/// Estimated road speed (arbitrary units) for `rpm` in `gear`.
///
/// Neutral has no link between engine and wheels, so speed is reported as 0.
pub fn vehicle_speed(rpm: f64, gear: u8) -> f64 {
    let ratio = gear_ratio(gear);
    if ratio > 0.0 {
        rpm / (ratio * SPEED_SCALE)
    } else {
        0.0
    }
}

/// Engine RPM implied by road `speed` in `gear`
pub fn rpm_at_speed(speed: f64, gear: u8) -> f64 {
    speed * gear_ratio(gear) * SPEED_SCALE
}

/// Re-derive engine RPM from the current road speed.
///
/// Used to re-sync the engine after a fast shift. Returns `rpm` unchanged in
/// neutral.
pub fn resync_rpm(rpm: f64, gear: u8) -> f64 {
    if gear == 0 {
        return rpm;
    }
    rpm_at_speed(vehicle_speed(rpm, gear), gear)
}

/// Text shown for a gear: "N" for neutral, otherwise the number
pub fn gear_label(gear: u8) -> String {
    if gear == 0 {
        "N".to_string()
    } else {
        gear.to_string()
    }
}
