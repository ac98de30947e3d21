use wasm_bindgen::prelude::*;

/// Timings and counts of the last step
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) gravity_ms: f64,
    pub(super) control_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) crafts: u32,
    pub(super) components: u32,
    pub(super) active_seats: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

impl Default for PerfStats {
    fn default() -> Self {
        PerfStats {
            step_ms: 0.0,
            gravity_ms: 0.0,
            control_ms: 0.0,
            integrate_ms: 0.0,
            crafts: 0,
            components: 0,
            active_seats: 0,
        }
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn gravity_ms(&self) -> f64 { self.gravity_ms }
    #[wasm_bindgen(getter)]
    pub fn control_ms(&self) -> f64 { self.control_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn crafts(&self) -> u32 { self.crafts }
    #[wasm_bindgen(getter)]
    pub fn components(&self) -> u32 { self.components }
    /// Crafts with a bound control seat
    #[wasm_bindgen(getter)]
    pub fn active_seats(&self) -> u32 { self.active_seats }
}
