//! Contraption Engine - spacecraft assembly and motion control in WASM
//!
//! Architecture:
//! - core/          - Logging macros, math helpers
//! - domain/        - Rotations, parts, components, hostname network, save data
//! - systems/       - Rigid bodies, gravity, contraptions, thrust/gyro control
//! - simulation/    - Fixed-step orchestration and the JS facade

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("contraption engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Parts catalog as JSON, for the builder UI
#[wasm_bindgen]
pub fn parts_manifest_json() -> String {
    domain::parts::manifest_json()
}

// Re-export main types
pub use domain::{ComponentData, ContraptionData, CubeRotation, LoadError, PartKind};
pub use simulation::{PerfStats, SimSettings, Simulation, SimulationCore};
pub use systems::contraption::Contraption;
pub use systems::control::{ControlInput, GyroManager, ThrustManager};
