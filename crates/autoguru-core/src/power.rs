//! Horsepower from torque and RPM

/// Constant relating torque and RPM to horsepower
pub const HP_CONSTANT: f64 = 5252.0;

/// Horsepower produced at `rpm` with `torque`
pub fn horsepower(torque: f64, rpm: f64) -> f64 {
    torque * rpm / HP_CONSTANT
}
