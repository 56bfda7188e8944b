//! Simulator settings stored in settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::EngineConfig;
use crate::curve::CurveGrid;
use crate::error::SimError;

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Simulator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Engine and transmission selection
    pub engine: EngineConfig,

    /// Time between ticks in milliseconds; also the simulated step
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// RPM grid for the torque/horsepower chart
    pub curve: CurveGrid,

    /// Seed for torque noise and RPM jitter; `None` draws from entropy
    pub seed: Option<u64>,
}

fn default_tick_interval_ms() -> u64 {
    100
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            tick_interval_ms: default_tick_interval_ms(),
            curve: CurveGrid::default(),
            seed: None,
        }
    }
}

impl SimulationSettings {
    /// Default settings location under the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("AutoGuru").join(SETTINGS_FILE))
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let content = fs::read_to_string(path)?;
        let settings: SimulationSettings = serde_json::from_str(&content)?;
        Ok(settings.sanitized())
    }

    /// Load settings, or defaults when the file does not exist yet
    pub fn load_or_default(path: &Path) -> Result<Self, SimError> {
        if !path.exists() {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), SimError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Tick interval as a duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Simulated seconds advanced per tick
    pub fn tick_seconds(&self) -> f64 {
        self.tick_interval_ms as f64 / 1000.0
    }

    /// Replace values the simulator cannot run with
    pub fn sanitized(mut self) -> Self {
        if self.tick_interval_ms == 0 {
            tracing::warn!(
                "Tick interval of 0 ms is not usable, using {} ms",
                default_tick_interval_ms()
            );
            self.tick_interval_ms = default_tick_interval_ms();
        }
        if self.curve.step_rpm == 0 || self.curve.min_rpm > self.curve.max_rpm {
            tracing::warn!("Invalid curve grid {:?}, using defaults", self.curve);
            self.curve = CurveGrid::default();
        }
        self
    }
}
