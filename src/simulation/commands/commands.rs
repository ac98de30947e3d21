use glam::{DQuat, DVec3};

use crate::domain::component::ComponentData;
use crate::domain::errors::LoadError;
use crate::domain::ids::{ComponentId, ContraptionId};
use crate::domain::save::ContraptionData;
use crate::systems::contraption_system::SpawnResult;
use crate::systems::control::ControlInput;
use crate::systems::gravity::GravitySource;

use super::SimulationCore;

pub(super) fn spawn_contraption(
    sim: &mut SimulationCore,
    data: &ContraptionData,
    position: DVec3,
    quaternion: DQuat,
) -> Result<SpawnResult, LoadError> {
    let spawned = sim.systems.spawn(data, position, quaternion)?;
    if let Some(craft) = sim.systems.get_mut(spawned.id) {
        craft
            .contraption
            .set_sensitivity(sim.settings.default_sensitivity);
        craft.contraption.set_dampeners(sim.settings.default_dampeners);
    }
    Ok(spawned)
}

pub(super) fn add_component(
    sim: &mut SimulationCore,
    id: ContraptionId,
    data: &ComponentData,
) -> Result<ComponentId, LoadError> {
    sim.systems.add_component(id, data)
}

pub(super) fn remove_contraption(sim: &mut SimulationCore, id: ContraptionId) -> bool {
    sim.systems.remove(id).is_some()
}

pub(super) fn bind_seat(
    sim: &mut SimulationCore,
    id: ContraptionId,
    hostname: &str,
) -> Result<(), LoadError> {
    sim.systems.bind_seat(id, hostname)
}

pub(super) fn detach_seat(
    sim: &mut SimulationCore,
    id: ContraptionId,
) -> Result<Option<String>, LoadError> {
    sim.systems.detach_seat(id)
}

pub(super) fn set_input(sim: &mut SimulationCore, id: ContraptionId, input: ControlInput) -> bool {
    sim.systems.set_input(id, input)
}

pub(super) fn set_dampeners(sim: &mut SimulationCore, id: ContraptionId, enabled: bool) -> bool {
    let Some(craft) = sim.systems.get_mut(id) else {
        return false;
    };
    craft.contraption.set_dampeners(enabled);
    true
}

pub(super) fn set_sensitivity(sim: &mut SimulationCore, id: ContraptionId, sensitivity: f64) -> bool {
    let Some(craft) = sim.systems.get_mut(id) else {
        return false;
    };
    craft.contraption.set_sensitivity(sensitivity);
    true
}

pub(super) fn add_gravity(sim: &mut SimulationCore, source: GravitySource) {
    sim.gravity.add(source);
}

pub(super) fn clear_gravity(sim: &mut SimulationCore) {
    sim.gravity.clear();
}

pub(super) fn clear(sim: &mut SimulationCore) {
    sim.systems.clear();
    sim.gravity.clear();
    sim.frame = 0;
    sim.perf_stats.reset();
}
