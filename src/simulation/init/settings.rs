use serde::{Deserialize, Serialize};

use crate::domain::errors::LoadError;

use super::perf_stats::PerfStats;
use super::SimulationCore;

/// Simulation configuration, loadable from JSON. Missing fields take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimSettings {
    /// Steps per simulated second
    pub tick_rate: f64,
    /// Applied to the managers of every spawned contraption
    pub default_sensitivity: f64,
    pub default_dampeners: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            default_sensitivity: 1.0,
            default_dampeners: true,
        }
    }
}

impl SimSettings {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let settings: SimSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(LoadError::Validation(format!(
                "tickRate must be positive, got {}",
                self.tick_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.default_sensitivity) {
            return Err(LoadError::Validation(format!(
                "defaultSensitivity must be within 0..=1, got {}",
                self.default_sensitivity
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn tick(&self) -> f64 {
        1.0 / self.tick_rate
    }
}

pub(super) fn enable_perf_metrics(sim: &mut SimulationCore, enabled: bool) {
    sim.perf_enabled = enabled;
    if !enabled {
        sim.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(sim: &SimulationCore) -> PerfStats {
    sim.perf_stats.clone()
}
