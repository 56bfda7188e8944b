//! Torque curve model
//!
//! Torque is a skewed parabola over normalized RPM, scaled by engine size and
//! throttle. Larger engines get a taller curve that peaks later.

use crate::noise::NoiseSource;

/// RPM the curve is normalized against
pub const CURVE_RPM_SPAN: f64 = 8000.0;

/// Peak-to-peak noise applied to torque (±2%)
const TORQUE_NOISE_SPAN: f64 = 0.04;

/// Torque available at zero throttle, as a fraction of full throttle
const THROTTLE_FLOOR: f64 = 0.2;

/// Shape coefficients for `k * x * (1 - x) * (1 + s * x)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveShape {
    /// Overall height
    pub k: f64,
    /// Skew toward high RPM
    pub s: f64,
}

/// Curve shapes keyed by displacement (cc)
const CURVE_SHAPES: [(u32, CurveShape); 5] = [
    (800, CurveShape { k: 4.0, s: 0.2 }),
    (1000, CurveShape { k: 4.1, s: 0.3 }),
    (1200, CurveShape { k: 4.2, s: 0.4 }),
    (1500, CurveShape { k: 4.3, s: 0.5 }),
    (2000, CurveShape { k: 4.4, s: 0.6 }),
];

/// Shape used for displacements without a tabulated curve: a plain parabola
pub const DEFAULT_CURVE_SHAPE: CurveShape = CurveShape { k: 4.0, s: 0.0 };

/// Look up the curve shape for a displacement
pub fn curve_shape(displacement_cc: u32) -> CurveShape {
    CURVE_SHAPES
        .iter()
        .find(|(cc, _)| *cc == displacement_cc)
        .map(|(_, shape)| *shape)
        .unwrap_or(DEFAULT_CURVE_SHAPE)
}

/// Noise-free, full-throttle curve factor at `rpm`
pub fn curve_factor(rpm: f64, displacement_cc: u32) -> f64 {
    let x = rpm / CURVE_RPM_SPAN;
    let CurveShape { k, s } = curve_shape(displacement_cc);
    k * x * (1.0 - x) * (1.0 + s * x)
}

/// Instantaneous engine torque (Nm, arbitrary scale)
///
/// # Arguments
/// * `rpm` - Engine speed
/// * `displacement_cc` - Engine size; unsupported sizes use [`DEFAULT_CURVE_SHAPE`]
/// * `throttle` - Throttle opening 0-100, clamped
/// * `noise` - Source for the ±2% realism noise
///
/// # Returns
/// Torque, never negative
pub fn torque<N: NoiseSource + ?Sized>(
    rpm: f64,
    displacement_cc: u32,
    throttle: u8,
    noise: &mut N,
) -> f64 {
    let base_torque = displacement_cc as f64 / 1000.0 * 100.0;
    let mut torque = base_torque * curve_factor(rpm, displacement_cc);

    torque *= 1.0 + noise.centered() * TORQUE_NOISE_SPAN;

    let throttle = throttle.min(100) as f64 / 100.0;
    torque *= THROTTLE_FLOOR + (1.0 - THROTTLE_FLOOR) * throttle;

    torque.max(0.0)
}
