//! Engine and transmission selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// Engine sizes the simulator has torque curves for, in cc
pub const SUPPORTED_DISPLACEMENTS: [u32; 5] = [800, 1000, 1200, 1500, 2000];

/// Displacement substituted for unsupported values
pub const DEFAULT_DISPLACEMENT_CC: u32 = 1200;

/// Transmission type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransmissionKind {
    /// Driver-selected gears
    #[default]
    Manual,
    /// Automated manual
    Amt,
    /// Intelligent manual
    Imt,
    /// Continuously variable
    Cvt,
    /// Dual clutch
    Dct,
}

impl TransmissionKind {
    /// All kinds, in selector order
    pub const ALL: [TransmissionKind; 5] = [
        TransmissionKind::Manual,
        TransmissionKind::Amt,
        TransmissionKind::Imt,
        TransmissionKind::Cvt,
        TransmissionKind::Dct,
    ];

    /// Display name as shown in the transmission selector
    pub fn name(&self) -> &'static str {
        match self {
            TransmissionKind::Manual => "Manual",
            TransmissionKind::Amt => "AMT",
            TransmissionKind::Imt => "IMT",
            TransmissionKind::Cvt => "CVT",
            TransmissionKind::Dct => "DCT",
        }
    }

    /// Time spent between gears during an automatic shift, in seconds.
    ///
    /// `None` for kinds the automatic shift controller never drives.
    pub fn shift_duration(&self) -> Option<f64> {
        match self {
            TransmissionKind::Dct => Some(0.1),
            TransmissionKind::Amt => Some(0.5),
            TransmissionKind::Imt => Some(0.3),
            TransmissionKind::Manual | TransmissionKind::Cvt => None,
        }
    }

    /// Whether gears change without driver input
    pub fn is_automatic(&self) -> bool {
        !matches!(self, TransmissionKind::Manual)
    }

    /// Lenient parse: unknown names fall back to `Manual`
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown transmission '{s}', falling back to Manual");
            TransmissionKind::Manual
        })
    }
}

impl FromStr for TransmissionKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MANUAL" => Ok(TransmissionKind::Manual),
            "AMT" => Ok(TransmissionKind::Amt),
            "IMT" => Ok(TransmissionKind::Imt),
            "CVT" => Ok(TransmissionKind::Cvt),
            "DCT" => Ok(TransmissionKind::Dct),
            _ => Err(SimError::UnknownTransmission(s.to_string())),
        }
    }
}

impl From<String> for TransmissionKind {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl From<TransmissionKind> for String {
    fn from(kind: TransmissionKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for TransmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Engine displacement and transmission selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEngineConfig")]
pub struct EngineConfig {
    displacement_cc: u32,
    transmission: TransmissionKind,
}

#[derive(Deserialize)]
struct RawEngineConfig {
    displacement_cc: u32,
    #[serde(default)]
    transmission: TransmissionKind,
}

impl From<RawEngineConfig> for EngineConfig {
    fn from(raw: RawEngineConfig) -> Self {
        EngineConfig::new(raw.displacement_cc, raw.transmission)
    }
}

impl EngineConfig {
    /// Build a config, substituting the default displacement for unsupported sizes
    pub fn new(displacement_cc: u32, transmission: TransmissionKind) -> Self {
        let displacement_cc = if is_supported_displacement(displacement_cc) {
            displacement_cc
        } else {
            tracing::warn!(
                "Unsupported displacement {displacement_cc} cc, using {DEFAULT_DISPLACEMENT_CC} cc"
            );
            DEFAULT_DISPLACEMENT_CC
        };
        Self {
            displacement_cc,
            transmission,
        }
    }

    /// Build a config, rejecting unsupported displacements
    pub fn try_new(displacement_cc: u32, transmission: TransmissionKind) -> Result<Self, SimError> {
        if !is_supported_displacement(displacement_cc) {
            return Err(SimError::UnsupportedDisplacement(displacement_cc));
        }
        Ok(Self {
            displacement_cc,
            transmission,
        })
    }

    /// Engine displacement in cc
    pub fn displacement_cc(&self) -> u32 {
        self.displacement_cc
    }

    /// Transmission type
    pub fn transmission(&self) -> TransmissionKind {
        self.transmission
    }

    /// Same engine with a different displacement (substituted if unsupported)
    pub fn with_displacement(self, displacement_cc: u32) -> Self {
        Self::new(displacement_cc, self.transmission)
    }

    /// Same engine with a different transmission
    pub fn with_transmission(self, transmission: TransmissionKind) -> Self {
        Self {
            transmission,
            ..self
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            displacement_cc: DEFAULT_DISPLACEMENT_CC,
            transmission: TransmissionKind::Manual,
        }
    }
}

/// Whether a torque curve exists for this displacement
pub fn is_supported_displacement(displacement_cc: u32) -> bool {
    SUPPORTED_DISPLACEMENTS.contains(&displacement_cc)
}
