//! Simulation - fixed-step orchestration of every contraption
//!
//! `SimulationCore` owns the contraption arena and the gravity field and only
//! orchestrates; the work lives in systems/. Each step runs three phases over
//! all crafts:
//! - gravity: accumulate field acceleration on every body
//! - control: every active thrust/gyro manager consumes its craft's input
//! - integrate: advance every body by one tick
//!
//! All control updates finish before any body is integrated.

use glam::{DQuat, DVec3};

use crate::domain::component::ComponentData;
use crate::domain::errors::LoadError;
use crate::domain::ids::{ComponentId, ContraptionId};
use crate::domain::save::ContraptionData;
use crate::systems::contraption_system::{ContraptionSystem, SpawnResult};
use crate::systems::control::ControlInput;
use crate::systems::gravity::{GravityField, GravitySource};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::Simulation;
pub use perf_stats::PerfStats;
pub use settings::SimSettings;

use perf_timer::PerfTimer;

/// The simulation world
pub struct SimulationCore {
    systems: ContraptionSystem,
    gravity: GravityField,
    settings: SimSettings,

    // State
    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SimulationCore {
    pub fn new() -> Self {
        init::create_simulation_core(SimSettings::default())
    }

    pub fn with_settings(settings: SimSettings) -> Self {
        init::create_simulation_core(settings)
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    /// Seconds advanced by one `step`
    pub fn tick(&self) -> f64 {
        self.settings.tick()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn contraptions(&self) -> &ContraptionSystem {
        &self.systems
    }

    pub fn contraptions_mut(&mut self) -> &mut ContraptionSystem {
        &mut self.systems
    }

    pub fn gravity(&self) -> &GravityField {
        &self.gravity
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    /// Spawn a contraption from save data at the given pose
    pub fn spawn_contraption(
        &mut self,
        data: &ContraptionData,
        position: DVec3,
        quaternion: DQuat,
    ) -> Result<SpawnResult, LoadError> {
        commands::spawn_contraption(self, data, position, quaternion)
    }

    pub fn add_component(
        &mut self,
        id: ContraptionId,
        data: &ComponentData,
    ) -> Result<ComponentId, LoadError> {
        commands::add_component(self, id, data)
    }

    pub fn remove_contraption(&mut self, id: ContraptionId) -> bool {
        commands::remove_contraption(self, id)
    }

    pub fn bind_seat(&mut self, id: ContraptionId, hostname: &str) -> Result<(), LoadError> {
        commands::bind_seat(self, id, hostname)
    }

    pub fn detach_seat(&mut self, id: ContraptionId) -> Result<Option<String>, LoadError> {
        commands::detach_seat(self, id)
    }

    pub fn set_input(&mut self, id: ContraptionId, input: ControlInput) -> bool {
        commands::set_input(self, id, input)
    }

    pub fn set_dampeners(&mut self, id: ContraptionId, enabled: bool) -> bool {
        commands::set_dampeners(self, id, enabled)
    }

    pub fn set_sensitivity(&mut self, id: ContraptionId, sensitivity: f64) -> bool {
        commands::set_sensitivity(self, id, sensitivity)
    }

    pub fn add_gravity(&mut self, source: GravitySource) {
        commands::add_gravity(self, source)
    }

    pub fn clear_gravity(&mut self) {
        commands::clear_gravity(self)
    }

    pub fn serialize_contraption(&self, id: ContraptionId) -> Option<ContraptionData> {
        self.systems.serialize(id)
    }

    /// Remove every contraption and gravity source
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    /// Step the simulation forward by one tick
    pub fn step(&mut self) {
        step::step(self);
    }
}

impl Default for SimulationCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
