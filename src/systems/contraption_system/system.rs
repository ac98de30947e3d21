use std::collections::HashMap;

use glam::{DQuat, DVec3};

use crate::domain::component::{Component, ComponentData};
use crate::domain::errors::LoadError;
use crate::domain::ids::{ComponentId, ComponentIds, ContraptionId};
use crate::domain::save::ContraptionData;
use crate::systems::contraption::Contraption;
use crate::systems::control::{ControlInput, GyroOutput, ThrustOutput};
use crate::systems::rigid_body::RigidBody;

/// A contraption, the body it is simulated as and its pilot input
#[derive(Clone, Debug)]
pub struct Craft {
    pub body: RigidBody,
    pub contraption: Contraption,
    /// Input snapshot consumed by every control tick
    pub input: ControlInput,
}

impl Craft {
    #[inline]
    pub fn id(&self) -> ContraptionId {
        self.contraption.id()
    }

    pub fn update_controls(&mut self, tick: f64) -> (ThrustOutput, GyroOutput) {
        self.contraption
            .update_controls(&mut self.body, &self.input, tick)
    }
}

pub struct SpawnResult {
    pub id: ContraptionId,
    pub components: u32,
}

/// Manages all contraptions in the simulation
pub struct ContraptionSystem {
    crafts: Vec<Craft>,
    lookup: HashMap<ContraptionId, usize>,
    next_id: ContraptionId,
    component_ids: ComponentIds,
}

impl ContraptionSystem {
    pub fn new() -> Self {
        Self {
            crafts: Vec::new(),
            lookup: HashMap::new(),
            next_id: 1,
            component_ids: ComponentIds::new(),
        }
    }

    /// Build a contraption from save data on a new body at the given pose.
    pub fn spawn(
        &mut self,
        data: &ContraptionData,
        position: DVec3,
        quaternion: DQuat,
    ) -> Result<SpawnResult, LoadError> {
        if !position.is_finite() || !quaternion.is_finite() || quaternion.length_squared() < 1e-12 {
            return Err(LoadError::Validation(format!(
                "invalid spawn pose {:?} {:?}",
                position, quaternion
            )));
        }
        let id = self.next_id;
        let mut body = RigidBody::new(position, quaternion);
        body.id = id;

        let contraption = match Contraption::from_data(id, &mut body, data, &mut self.component_ids) {
            Ok(c) => c,
            Err(err) => {
                console_warn!("rejected contraption: {}", err);
                return Err(err);
            }
        };
        self.next_id = self.next_id.saturating_add(1);

        let components = contraption.len() as u32;
        self.lookup.insert(id, self.crafts.len());
        self.crafts.push(Craft {
            body,
            contraption,
            input: ControlInput::default(),
        });
        console_log!("spawned contraption {} ({} components)", id, components);
        Ok(SpawnResult { id, components })
    }

    /// Remove a contraption by ID, releasing its component ids.
    pub fn remove(&mut self, id: ContraptionId) -> Option<Craft> {
        let idx = self.lookup.remove(&id)?;
        let craft = self.crafts.swap_remove(idx);
        if let Some(moved) = self.crafts.get(idx) {
            self.lookup.insert(moved.id(), idx);
        }
        for component in craft.contraption.components() {
            self.component_ids.release(component.id());
        }
        console_log!("removed contraption {}", id);
        Some(craft)
    }

    pub fn get(&self, id: ContraptionId) -> Option<&Craft> {
        self.lookup.get(&id).map(|&i| &self.crafts[i])
    }

    pub fn get_mut(&mut self, id: ContraptionId) -> Option<&mut Craft> {
        let idx = *self.lookup.get(&id)?;
        self.crafts.get_mut(idx)
    }

    fn require_mut(&mut self, id: ContraptionId) -> Result<&mut Craft, LoadError> {
        self.get_mut(id).ok_or(LoadError::UnknownContraption(id))
    }

    /// Resolve a component's owning contraption
    pub fn contraption_of(&self, component: &Component) -> Option<&Contraption> {
        component
            .contraption()
            .and_then(|id| self.get(id))
            .map(|craft| &craft.contraption)
    }

    /// Build action: add one component and re-centre the body.
    pub fn add_component(
        &mut self,
        id: ContraptionId,
        data: &ComponentData,
    ) -> Result<ComponentId, LoadError> {
        let idx = *self
            .lookup
            .get(&id)
            .ok_or(LoadError::UnknownContraption(id))?;
        let craft = &mut self.crafts[idx];
        let result =
            craft
                .contraption
                .load_component(&mut craft.body, data, &mut self.component_ids, true);
        if let Err(err) = &result {
            console_warn!("rejected component for contraption {}: {}", id, err);
        }
        result
    }

    pub fn set_input(&mut self, id: ContraptionId, input: ControlInput) -> bool {
        match self.get_mut(id) {
            Some(craft) => {
                craft.input = input;
                true
            }
            None => false,
        }
    }

    pub fn bind_seat(&mut self, id: ContraptionId, hostname: &str) -> Result<(), LoadError> {
        let craft = self.require_mut(id)?;
        craft.contraption.bind_seat(hostname)?;
        console_log!("contraption {} piloted from {}", id, hostname);
        Ok(())
    }

    /// Deactivate the managers and drop any input left behind.
    pub fn detach_seat(&mut self, id: ContraptionId) -> Result<Option<String>, LoadError> {
        let craft = self.require_mut(id)?;
        craft.input = ControlInput::default();
        let seat = craft.contraption.detach_seat();
        if let Some(hostname) = &seat {
            console_log!("contraption {} detached from {}", id, hostname);
        }
        Ok(seat)
    }

    pub fn serialize(&self, id: ContraptionId) -> Option<ContraptionData> {
        self.get(id).map(|craft| craft.contraption.serialize())
    }

    pub fn len(&self) -> usize {
        self.crafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crafts.is_empty()
    }

    pub fn component_count(&self) -> usize {
        self.crafts.iter().map(|c| c.contraption.len()).sum()
    }

    pub fn component_ids(&self) -> &ComponentIds {
        &self.component_ids
    }

    /// Remove all crafts (used by SimulationCore::clear()).
    pub fn clear(&mut self) {
        self.crafts.clear();
        self.lookup.clear();
        self.component_ids = ComponentIds::new();
        self.next_id = 1;
    }

    pub fn crafts(&self) -> &[Craft] {
        &self.crafts
    }

    pub fn crafts_mut(&mut self) -> &mut [Craft] {
        &mut self.crafts
    }
}

impl Default for ContraptionSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parts::PartKind;

    fn two_blocks() -> ContraptionData {
        ContraptionData::new(vec![
            ComponentData::new(PartKind::Block, [0.0, 0.0, 0.0], 0),
            ComponentData::new(PartKind::Block, [1.0, 0.0, 0.0], 0),
        ])
    }

    #[test]
    fn spawn_assigns_ids_and_back_references() {
        let mut sys = ContraptionSystem::new();
        let a = sys.spawn(&two_blocks(), DVec3::ZERO, DQuat::IDENTITY).unwrap();
        let b = sys.spawn(&two_blocks(), DVec3::new(10.0, 0.0, 0.0), DQuat::IDENTITY).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(sys.component_count(), 4);

        let craft = sys.get(b.id).unwrap();
        let component = &craft.contraption.components()[0];
        assert_eq!(sys.contraption_of(component).map(|c| c.id()), Some(b.id));
        // component ids are unique across the world
        assert_eq!(component.id(), 3);
    }

    #[test]
    fn failed_spawn_leaves_no_trace() {
        let mut sys = ContraptionSystem::new();
        let mut bad = two_blocks();
        bad.components[1].position = [0.0, 0.0, 0.0];
        assert!(matches!(
            sys.spawn(&bad, DVec3::ZERO, DQuat::IDENTITY),
            Err(LoadError::CellOccupied { .. })
        ));
        assert!(sys.is_empty());
        assert_eq!(sys.component_ids().live_count(), 0);
        let ok = sys.spawn(&two_blocks(), DVec3::ZERO, DQuat::IDENTITY).unwrap();
        assert_eq!(ok.id, 1);
    }

    #[test]
    fn remove_keeps_lookup_consistent() {
        let mut sys = ContraptionSystem::new();
        for _ in 0..3 {
            sys.spawn(&two_blocks(), DVec3::ZERO, DQuat::IDENTITY).unwrap();
        }
        assert!(sys.remove(1).is_some());
        assert!(sys.remove(1).is_none());
        assert_eq!(sys.get(3).map(|c| c.id()), Some(3));
        assert_eq!(sys.get(2).map(|c| c.id()), Some(2));
        assert_eq!(sys.component_ids().live_count(), 4);
    }

    #[test]
    fn unknown_contraption_is_reported() {
        let mut sys = ContraptionSystem::new();
        let data = ComponentData::new(PartKind::Block, [0.0; 3], 0);
        assert_eq!(sys.add_component(9, &data), Err(LoadError::UnknownContraption(9)));
        assert!(!sys.set_input(9, ControlInput::default()));
        assert!(sys.serialize(9).is_none());
    }

    #[test]
    fn detach_clears_input() {
        let mut sys = ContraptionSystem::new();
        let mut data = two_blocks();
        data.components.push(ComponentData::new(PartKind::Seat, [0.0, 1.0, 0.0], 0));
        let id = sys.spawn(&data, DVec3::ZERO, DQuat::IDENTITY).unwrap().id;
        sys.bind_seat(id, "seat_0").unwrap();
        sys.set_input(id, ControlInput::linear(DVec3::X));
        assert_eq!(sys.detach_seat(id).unwrap(), Some("seat_0".to_string()));
        assert_eq!(sys.get(id).unwrap().input, ControlInput::default());
    }
}
