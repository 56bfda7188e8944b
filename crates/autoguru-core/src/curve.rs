//! Torque/horsepower curve queries
//!
//! Read-only lookups that do not touch the live simulation, used to draw a
//! full torque and horsepower vs RPM chart.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::noise::NoiseSource;
use crate::power::horsepower;
use crate::torque::torque;

/// One sample of the torque/horsepower curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Engine speed of the sample
    pub rpm: f64,
    /// Torque at `rpm`
    pub torque: f64,
    /// Horsepower at `rpm`
    pub horsepower: f64,
}

/// RPM grid the curve is sampled on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveGrid {
    /// First sampled RPM
    pub min_rpm: u32,
    /// Last sampled RPM, inclusive
    pub max_rpm: u32,
    /// Spacing between samples
    pub step_rpm: u32,
}

impl Default for CurveGrid {
    fn default() -> Self {
        Self {
            min_rpm: 800,
            max_rpm: 8000,
            step_rpm: 200,
        }
    }
}

impl CurveGrid {
    /// RPM values on the grid, `max_rpm` included when it falls on a step
    pub fn rpms(&self) -> impl Iterator<Item = u32> {
        let step = self.step_rpm.max(1) as usize;
        (self.min_rpm..=self.max_rpm).step_by(step)
    }
}

/// Torque for `config` at `rpm` and `throttle`
pub fn torque_at<N: NoiseSource + ?Sized>(
    rpm: f64,
    config: &EngineConfig,
    throttle: u8,
    noise: &mut N,
) -> f64 {
    torque(rpm, config.displacement_cc(), throttle, noise)
}

/// Horsepower for `torque` produced at `rpm`
pub fn horsepower_at(rpm: f64, torque: f64) -> f64 {
    horsepower(torque, rpm)
}

/// Sample the torque and horsepower curve across `grid`
pub fn sample_curve<N: NoiseSource + ?Sized>(
    config: &EngineConfig,
    throttle: u8,
    grid: &CurveGrid,
    noise: &mut N,
) -> Vec<CurvePoint> {
    grid.rpms()
        .map(|rpm| {
            let rpm = rpm as f64;
            let torque = torque_at(rpm, config, throttle, noise);
            CurvePoint {
                rpm,
                torque,
                horsepower: horsepower_at(rpm, torque),
            }
        })
        .collect()
}

/// Point with the highest torque
pub fn peak_torque(points: &[CurvePoint]) -> Option<CurvePoint> {
    points
        .iter()
        .copied()
        .max_by(|a, b| a.torque.total_cmp(&b.torque))
}

/// Point with the highest horsepower
pub fn peak_horsepower(points: &[CurvePoint]) -> Option<CurvePoint> {
    points
        .iter()
        .copied()
        .max_by(|a, b| a.horsepower.total_cmp(&b.horsepower))
}
