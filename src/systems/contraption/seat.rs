//! Control seats
//!
//! A seat's network state names the thrusters and gyroscopes it drives.
//! Binding a seat rebuilds both managers from those hostnames and activates
//! them; detaching deactivates them so stale input stops producing motion.

use crate::domain::errors::{ControlError, LoadError};
use crate::domain::ids::ComponentId;
use crate::domain::parts::PartKind;
use crate::domain::rotation::Axis;
use crate::domain::save::SeatLink;
use crate::systems::control::{ControlInput, GyroManager, GyroOutput, ThrustManager, ThrustOutput};
use crate::systems::rigid_body::RigidBody;

use super::Contraption;

impl Contraption {
    /// Link an actuator to a seat. Takes effect on the next `bind_seat`.
    pub fn assign_to_seat(&mut self, seat: ComponentId, target: ComponentId) -> Result<(), ControlError> {
        let seat_component = self.component(seat).ok_or(ControlError::UnknownComponent(seat))?;
        if seat_component.kind() != PartKind::Seat {
            return Err(ControlError::NotASeat(seat));
        }
        let target_component = self
            .component(target)
            .ok_or(ControlError::UnknownComponent(target))?;
        let kind = target_component.kind();
        let Some(hostname) = target_component.hostname().map(str::to_string) else {
            return Err(ControlError::NotAnActuator { id: target, kind });
        };

        let link = self.seat_links.entry(seat).or_default();
        let list = match kind {
            PartKind::Thruster => &mut link.thrusters,
            PartKind::Gyroscope => &mut link.gyroscopes,
            _ => return Err(ControlError::NotAnActuator { id: target, kind }),
        };
        if list.contains(&hostname) {
            return Err(ControlError::AlreadyAssigned(target));
        }
        list.push(hostname);
        Ok(())
    }

    pub fn seat_link(&self, seat: ComponentId) -> Option<&SeatLink> {
        self.seat_links.get(&seat)
    }

    /// Drive the managers from the seat with this hostname.
    ///
    /// Every linked hostname must resolve; on error the previous binding stays.
    pub fn bind_seat(&mut self, hostname: &str) -> Result<(), LoadError> {
        let seat = self.network.get_component(hostname)?;
        let is_seat = self.component(seat).map(|c| c.kind()) == Some(PartKind::Seat);
        if !is_seat {
            return Err(ControlError::NotASeat(seat).into());
        }
        let link = self.seat_links.get(&seat).cloned().unwrap_or_default();

        let mut thrust = ThrustManager::new();
        thrust.set_sensitivity(self.thrust.sensitivity());
        thrust.set_dampeners(self.thrust.dampeners());
        for name in link.thrusters.iter() {
            let id = self.network.get_component(name)?;
            let component = self.component(id).ok_or(ControlError::UnknownComponent(id))?;
            thrust.add_thruster(component)?;
        }

        let mut gyro = GyroManager::new();
        gyro.set_sensitivity(self.gyro.sensitivity());
        gyro.set_dampeners(self.gyro.dampeners());
        for name in link.gyroscopes.iter() {
            let id = self.network.get_component(name)?;
            let component = self.component(id).ok_or(ControlError::UnknownComponent(id))?;
            gyro.add_gyroscope(component)?;
        }

        thrust.activate();
        gyro.activate();
        self.thrust = thrust;
        self.gyro = gyro;
        self.pilot_seat = Some(hostname.to_string());
        Ok(())
    }

    /// Deactivate both managers. Returns the seat that was bound.
    pub fn detach_seat(&mut self) -> Option<String> {
        self.thrust.deactivate();
        self.gyro.deactivate();
        self.pilot_seat.take()
    }

    pub fn pilot_seat(&self) -> Option<&str> {
        self.pilot_seat.as_deref()
    }

    pub fn set_dampeners(&mut self, enabled: bool) {
        self.thrust.set_dampeners(enabled);
        self.gyro.set_dampeners(enabled);
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        self.thrust.set_sensitivity(sensitivity);
        self.gyro.set_sensitivity(sensitivity);
    }

    /// One control tick: thrust first, then rotation
    pub fn update_controls(
        &mut self,
        body: &mut RigidBody,
        input: &ControlInput,
        tick: f64,
    ) -> (ThrustOutput, GyroOutput) {
        let thrust = self.thrust.update(body, self.quaternion, input.linear, tick);
        let gyro = self.gyro.update(body, self.quaternion, input.angular, tick);
        (thrust, gyro)
    }

    /// Thrust indicator values for the bound seat, one per signed axis
    pub fn thrust_levels(&self) -> [f64; 6] {
        Axis::ALL.map(|axis| self.thrust.throttle(axis))
    }
}
