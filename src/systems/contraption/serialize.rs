use std::collections::BTreeMap;

use glam::{DQuat, DVec3};

use crate::domain::errors::LoadError;
use crate::domain::ids::{ComponentIds, ContraptionId};
use crate::domain::save::ContraptionData;
use crate::systems::rigid_body::RigidBody;

use super::Contraption;

impl Contraption {
    /// Build a contraption from save data onto a fresh body.
    ///
    /// All-or-nothing: on error every id claimed here is released again. The
    /// caller discards the body.
    pub fn from_data(
        id: ContraptionId,
        body: &mut RigidBody,
        data: &ContraptionData,
        ids: &mut ComponentIds,
    ) -> Result<Contraption, LoadError> {
        if data.components.is_empty() {
            return Err(LoadError::Validation(
                "a contraption needs at least one component".to_string(),
            ));
        }
        let quaternion = DQuat::from_array(data.quaternion);
        if !quaternion.is_finite() || quaternion.length_squared() < 1e-12 {
            return Err(LoadError::Validation(format!(
                "invalid contraption quaternion {:?}",
                data.quaternion
            )));
        }
        let position_offset = DVec3::from_array(data.position_offset);
        if !position_offset.is_finite() {
            return Err(LoadError::Validation(format!(
                "invalid position offset {:?}",
                data.position_offset
            )));
        }

        let mut contraption = Contraption::new(id, quaternion);
        contraption.position_offset = position_offset;
        contraption.network.restore_indexes(&data.network);

        if let Err(err) = contraption.load_all(body, data, ids) {
            for component in contraption.components.iter() {
                ids.release(component.id());
            }
            return Err(err);
        }
        Ok(contraption)
    }

    fn load_all(
        &mut self,
        body: &mut RigidBody,
        data: &ContraptionData,
        ids: &mut ComponentIds,
    ) -> Result<(), LoadError> {
        for component in data.components.iter() {
            self.load_component(body, component, ids, false)?;
        }

        for (hostname, link) in data.network_data.iter() {
            let seat = self.network.get_component(hostname)?;
            for target in link.thrusters.iter().chain(link.gyroscopes.iter()) {
                let target = self.network.get_component(target)?;
                self.assign_to_seat(seat, target)?;
            }
        }

        self.recompute_mass(body);
        Ok(())
    }

    pub fn serialize(&self) -> ContraptionData {
        let mut network_data = BTreeMap::new();
        for (seat, link) in self.seat_links.iter() {
            let Some(hostname) = self.component(*seat).and_then(|c| c.hostname()) else {
                continue;
            };
            network_data.insert(hostname.to_string(), link.clone());
        }

        ContraptionData {
            position_offset: self.position_offset.to_array(),
            quaternion: self.quaternion.to_array(),
            components: self.components.iter().map(|c| c.serialize()).collect(),
            network_data,
            network: self.network.to_data(),
        }
    }

    pub fn to_json(&self) -> String {
        self.serialize().to_json()
    }
}
