use std::collections::HashMap;

use glam::{DQuat, DVec3, IVec3};

use crate::domain::component::{Component, ComponentData};
use crate::domain::errors::LoadError;
use crate::domain::ids::{ComponentId, ComponentIds, ContraptionId};
use crate::domain::network::Network;
use crate::domain::parts::PartKind;
use crate::domain::save::SeatLink;
use crate::systems::control::{GyroManager, ThrustManager};
use crate::systems::rigid_body::{BoxShape, RigidBody};

/// Components simulated together as one rigid body
///
/// The contraption does not own its body; `ContraptionSystem` keeps the pair
/// together and every operation that touches physics takes the body explicitly.
#[derive(Clone, Debug)]
pub struct Contraption {
    pub(super) id: ContraptionId,

    // === Components ===
    /// Load order, kept for serialization
    pub(super) components: Vec<Component>,
    pub(super) index: HashMap<ComponentId, usize>,
    pub(super) occupied: HashMap<IVec3, ComponentId>,
    pub(super) network: Network,
    /// Network state of every seat: the actuators it drives
    pub(super) seat_links: HashMap<ComponentId, SeatLink>,

    // === Pose relative to the body origin ===
    pub(super) position_offset: DVec3,
    pub(super) quaternion: DQuat,

    // === Control ===
    pub(super) thrust: ThrustManager,
    pub(super) gyro: GyroManager,
    /// Hostname of the seat currently driving the managers
    pub(super) pilot_seat: Option<String>,
}

impl Contraption {
    pub fn new(id: ContraptionId, quaternion: DQuat) -> Self {
        Self {
            id,
            components: Vec::new(),
            index: HashMap::new(),
            occupied: HashMap::new(),
            network: Network::new(),
            seat_links: HashMap::new(),
            position_offset: DVec3::ZERO,
            quaternion: quaternion.normalize(),
            thrust: ThrustManager::new(),
            gyro: GyroManager::new(),
            pilot_seat: None,
        }
    }

    #[inline]
    pub fn id(&self) -> ContraptionId {
        self.id
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.index.get(&id).map(|&i| &self.components[i])
    }

    pub fn component_by_hostname(&self, hostname: &str) -> Option<&Component> {
        let id = self.network.get_component(hostname).ok()?;
        self.component(id)
    }

    pub fn component_at(&self, cell: IVec3) -> Option<&Component> {
        self.occupied.get(&cell).and_then(|id| self.component(*id))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    #[inline]
    pub fn position_offset(&self) -> DVec3 {
        self.position_offset
    }

    #[inline]
    pub fn quaternion(&self) -> DQuat {
        self.quaternion
    }

    pub fn thrust(&self) -> &ThrustManager {
        &self.thrust
    }

    pub fn gyro(&self) -> &GyroManager {
        &self.gyro
    }

    pub fn total_mass(&self) -> f64 {
        self.components.iter().map(|c| c.mass()).sum()
    }

    /// Validate `data` and attach the component to `body`.
    ///
    /// Nothing is mutated (ids, body, network) unless every check passes.
    /// Bulk loads pass `recompute_mass = false` and call `recompute_mass` once.
    pub fn load_component(
        &mut self,
        body: &mut RigidBody,
        data: &ComponentData,
        ids: &mut ComponentIds,
        recompute_mass: bool,
    ) -> Result<ComponentId, LoadError> {
        let id = match data.id {
            Some(id) if ids.is_live(id) => return Err(LoadError::DuplicateId(id)),
            Some(id) => id,
            None => ids.peek(),
        };
        let component = Component::from_data(data, id)?;

        let cell = component.cell();
        if let Some(by) = self.occupied.get(&cell) {
            return Err(LoadError::CellOccupied {
                cell: cell.to_array(),
                by: *by,
            });
        }
        self.network.check(&component)?;

        ids.claim(id)?;
        self.attach(body, component)?;
        if recompute_mass {
            self.recompute_mass(body);
        }
        Ok(id)
    }

    fn attach(&mut self, body: &mut RigidBody, mut component: Component) -> Result<(), LoadError> {
        let props = component.kind().props();
        let shape = BoxShape::new(props.bounding_box.half_extents(), props.mass);
        let offset = self.quaternion * component.center() + self.position_offset;
        let orientation = self.quaternion * component.rotation().quaternion();
        let shape_id = body.add_shape(shape, offset, orientation);

        component.set_parent(self.id);
        component.set_shape(shape_id);
        self.network.connect(&mut component)?;
        if component.kind() == PartKind::Seat {
            self.seat_links.entry(component.id()).or_default();
        }

        let id = component.id();
        self.occupied.insert(component.cell(), id);
        self.index.insert(id, self.components.len());
        self.components.push(component);
        Ok(())
    }

    /// Contraption-local point to world space
    pub fn to_world_position(&self, body: &RigidBody, local: DVec3) -> DVec3 {
        body.position + body.quaternion * (self.quaternion * local + self.position_offset)
    }

    /// Contraption-local orientation to world space
    pub fn to_world_quaternion(&self, body: &RigidBody, local: DQuat) -> DQuat {
        body.quaternion * self.quaternion * local
    }

    /// World point to contraption-local space (inverse of `to_world_position`)
    pub fn to_local_position(&self, body: &RigidBody, world: DVec3) -> DVec3 {
        let in_body = body.quaternion.inverse() * (world - body.position);
        self.quaternion.inverse() * (in_body - self.position_offset)
    }

    /// World position of a component's geometric centre
    pub fn component_world_position(&self, body: &RigidBody, id: ComponentId) -> Option<DVec3> {
        self.component(id)
            .map(|c| self.to_world_position(body, c.center()))
    }
}
