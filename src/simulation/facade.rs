use glam::{DQuat, DVec3};
use wasm_bindgen::prelude::*;

use crate::domain::component::ComponentData;
use crate::domain::save::ContraptionData;
use crate::systems::control::ControlInput;
use crate::systems::gravity::GravitySource;

use super::perf_stats::PerfStats;
use super::settings::SimSettings;
use super::SimulationCore;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct Simulation {
    core: SimulationCore,
}

#[wasm_bindgen]
impl Simulation {
    /// Create a simulation with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: SimulationCore::new(),
        }
    }

    /// Create a simulation from a `SimSettings` JSON document
    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings(json: String) -> Result<Simulation, JsValue> {
        let settings = SimSettings::from_json(&json).map_err(to_js)?;
        Ok(Self {
            core: SimulationCore::with_settings(settings),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> f64 { self.core.tick() }

    #[wasm_bindgen(getter)]
    pub fn contraption_count(&self) -> usize { self.core.contraptions().len() }

    #[wasm_bindgen(getter)]
    pub fn component_count(&self) -> usize { self.core.contraptions().component_count() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === CONTRAPTIONS ===

    /// Spawn a contraption from its save JSON. Returns the contraption id.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_contraption(
        &mut self,
        json: String,
        x: f64,
        y: f64,
        z: f64,
        qx: f64,
        qy: f64,
        qz: f64,
        qw: f64,
    ) -> Result<u32, JsValue> {
        let data = ContraptionData::from_json(&json).map_err(to_js)?;
        let spawned = self
            .core
            .spawn_contraption(&data, DVec3::new(x, y, z), DQuat::from_xyzw(qx, qy, qz, qw))
            .map_err(to_js)?;
        Ok(spawned.id)
    }

    /// Build action: add one component JSON to a contraption. Returns its id.
    pub fn add_component(&mut self, contraption: u32, json: String) -> Result<u32, JsValue> {
        let data = ComponentData::from_json(&json).map_err(to_js)?;
        self.core.add_component(contraption, &data).map_err(to_js)
    }

    pub fn remove_contraption(&mut self, contraption: u32) -> bool {
        self.core.remove_contraption(contraption)
    }

    pub fn serialize_contraption(&self, contraption: u32) -> Option<String> {
        self.core
            .serialize_contraption(contraption)
            .map(|data| data.to_json())
    }

    // === PILOTING ===

    pub fn bind_seat(&mut self, contraption: u32, hostname: String) -> Result<(), JsValue> {
        self.core.bind_seat(contraption, &hostname).map_err(to_js)
    }

    /// Returns the hostname of the seat that was bound, if any
    pub fn detach_seat(&mut self, contraption: u32) -> Result<Option<String>, JsValue> {
        self.core.detach_seat(contraption).map_err(to_js)
    }

    /// Input in the contraption frame, each axis in [-1, 1]
    #[allow(clippy::too_many_arguments)]
    pub fn set_input(
        &mut self,
        contraption: u32,
        lx: f64,
        ly: f64,
        lz: f64,
        ax: f64,
        ay: f64,
        az: f64,
    ) -> bool {
        let input = ControlInput::new(DVec3::new(lx, ly, lz), DVec3::new(ax, ay, az));
        self.core.set_input(contraption, input)
    }

    pub fn set_dampeners(&mut self, contraption: u32, enabled: bool) -> bool {
        self.core.set_dampeners(contraption, enabled)
    }

    pub fn set_sensitivity(&mut self, contraption: u32, sensitivity: f64) -> bool {
        self.core.set_sensitivity(contraption, sensitivity)
    }

    /// Thrust indicators `[+x, -x, +y, -y, +z, -z]`, each 0..=1
    pub fn thrust_levels(&self, contraption: u32) -> Option<Vec<f64>> {
        let craft = self.core.contraptions().get(contraption)?;
        Some(craft.contraption.thrust_levels().to_vec())
    }

    // === GRAVITY ===

    pub fn add_uniform_gravity(&mut self, x: f64, y: f64, z: f64) {
        self.core.add_gravity(GravitySource::uniform(DVec3::new(x, y, z)));
    }

    pub fn add_point_gravity(&mut self, x: f64, y: f64, z: f64, mu: f64, min_radius: f64) {
        self.core
            .add_gravity(GravitySource::point_mass(DVec3::new(x, y, z), mu, min_radius));
    }

    pub fn clear_gravity(&mut self) {
        self.core.clear_gravity();
    }

    // === STATE ===

    /// Step the simulation forward by one tick
    pub fn step(&mut self) {
        self.core.step();
    }

    /// Remove every contraption and gravity source
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Body position `[x, y, z]` (centre of mass)
    pub fn position(&self, contraption: u32) -> Option<Vec<f64>> {
        let craft = self.core.contraptions().get(contraption)?;
        Some(craft.body.position.to_array().to_vec())
    }

    pub fn velocity(&self, contraption: u32) -> Option<Vec<f64>> {
        let craft = self.core.contraptions().get(contraption)?;
        Some(craft.body.velocity.to_array().to_vec())
    }

    /// Body orientation `[x, y, z, w]`
    pub fn quaternion(&self, contraption: u32) -> Option<Vec<f64>> {
        let craft = self.core.contraptions().get(contraption)?;
        Some(craft.body.quaternion.to_array().to_vec())
    }

    pub fn angular_velocity(&self, contraption: u32) -> Option<Vec<f64>> {
        let craft = self.core.contraptions().get(contraption)?;
        Some(craft.body.angular_velocity.to_array().to_vec())
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
