//! # AutoGuru Core Library
//!
//! Engine and transmission simulation for the AutoGuru simulator.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Torque curve and horsepower models for 800-2000 cc engines
//! - A tick-based drivetrain model with manual, AMT, IMT, CVT and DCT gearboxes
//! - A start/stop simulation session and a fixed-cadence async runner
//! - JSON settings for engine selection, tick rate and chart sampling
//!
//! ## Example
//!
//! ```rust
//! use autoguru_core::prelude::*;
//!
//! let mut session = Session::new(SimulationSettings::default());
//! session.set_transmission(TransmissionKind::Dct);
//! session.start();
//! session.set_throttle(60);
//! session.gear_up();
//!
//! for _ in 0..20 {
//!     if let Some(t) = session.step() {
//!         println!("{:.0} rpm, {:.1} Nm, {:.1} HP, gear {}", t.rpm, t.torque, t.horsepower, t.gear_label);
//!     }
//! }
//! ```

pub mod config;
pub mod curve;
pub mod drivetrain;
pub mod error;
pub mod gearbox;
pub mod noise;
pub mod power;
pub mod runner;
pub mod session;
pub mod settings;
pub mod shift;
pub mod state;
pub mod telemetry;
pub mod torque;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{EngineConfig, TransmissionKind};
    pub use crate::curve::{horsepower_at, sample_curve, torque_at, CurveGrid, CurvePoint};
    pub use crate::drivetrain::DrivetrainStateMachine;
    pub use crate::error::SimError;
    pub use crate::noise::{FixedNoise, NoiseSource, RandomNoise};
    pub use crate::runner::SimulationRunner;
    pub use crate::session::Session;
    pub use crate::settings::SimulationSettings;
    pub use crate::state::SimulationState;
    pub use crate::telemetry::Telemetry;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
