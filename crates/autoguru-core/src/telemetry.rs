//! Telemetry snapshots handed to the display layer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::TransmissionKind;

/// What the display reads back after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Simulated seconds since the session started
    pub sim_time: f64,
    /// Engine speed
    pub rpm: f64,
    /// Torque at the current RPM and throttle
    pub torque: f64,
    /// Horsepower at the current RPM
    pub horsepower: f64,
    /// Selected gear, 0 is neutral
    pub gear: u8,
    /// "N" or the gear number
    pub gear_label: String,
    /// Throttle opening 0-100
    pub throttle: u8,
    /// Active transmission
    pub transmission: TransmissionKind,
    /// Engine size in cc
    pub displacement_cc: u32,
    /// An automatic shift is in flight
    pub shifting: bool,
    /// Estimated road speed, arbitrary units
    pub vehicle_speed: f64,
}

impl Telemetry {
    /// Flatten into named channels, the shape realtime consumers expect
    pub fn to_channels(&self) -> HashMap<String, f64> {
        let mut data = HashMap::new();

        data.insert("simTime".to_string(), self.sim_time);
        data.insert("rpm".to_string(), self.rpm);
        data.insert("torque".to_string(), self.torque);
        data.insert("horsepower".to_string(), self.horsepower);
        data.insert("gear".to_string(), self.gear as f64);
        data.insert("throttle".to_string(), self.throttle as f64);
        data.insert("vehicleSpeed".to_string(), self.vehicle_speed);
        data.insert("shifting".to_string(), if self.shifting { 1.0 } else { 0.0 });
        data.insert("displacement".to_string(), self.displacement_cc as f64);

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let telemetry = Telemetry {
            sim_time: 1.5,
            rpm: 3200.0,
            torque: 140.0,
            horsepower: 140.0 * 3200.0 / 5252.0,
            gear: 3,
            gear_label: "3".to_string(),
            throttle: 65,
            transmission: TransmissionKind::Imt,
            displacement_cc: 1500,
            shifting: true,
            vehicle_speed: 25.2,
        };
        let channels = telemetry.to_channels();
        assert_eq!(channels.get("rpm"), Some(&3200.0));
        assert_eq!(channels.get("gear"), Some(&3.0));
        assert_eq!(channels.get("shifting"), Some(&1.0));
        assert_eq!(channels.get("displacement"), Some(&1500.0));

        let json = serde_json::to_value(&telemetry).unwrap();
        assert_eq!(json["transmission"], "IMT");
    }
}
