//! GyroManager - angular control allocator
//!
//! Same role as ThrustManager for rotation: pitch/yaw/roll input becomes an
//! angular velocity change bounded by the assigned gyroscopes' torque. There
//! is no gravity term.

use glam::{DQuat, DVec3};

use crate::domain::component::Component;
use crate::domain::errors::ControlError;
use crate::domain::ids::ComponentId;
use crate::domain::rotation::Axis;
use crate::systems::rigid_body::RigidBody;

use super::buckets::ActuatorBuckets;
use super::{throttle_fraction, ControlOutput};

#[derive(Clone, Debug)]
pub struct GyroManager {
    buckets: ActuatorBuckets,
    sensitivity: f64,
    dampeners: bool,
    active: bool,
    last_output: ControlOutput,
    last_max_positive: DVec3,
    last_max_negative: DVec3,
}

impl GyroManager {
    pub fn new() -> Self {
        Self {
            buckets: ActuatorBuckets::double_sided(),
            sensitivity: 1.0,
            dampeners: true,
            active: false,
            last_output: ControlOutput::default(),
            last_max_positive: DVec3::ZERO,
            last_max_negative: DVec3::ZERO,
        }
    }

    /// Assign a gyroscope to the bucket of its facing axis. Its rated torque is
    /// available in both senses about that axis.
    pub fn add_gyroscope(&mut self, component: &Component) -> Result<(), ControlError> {
        let Some(torque) = component.kind().props().torque else {
            return Err(ControlError::NotAnActuator {
                id: component.id(),
                kind: component.kind(),
            });
        };
        if self.buckets.contains(component.id()) {
            return Err(ControlError::AlreadyAssigned(component.id()));
        }
        self.buckets
            .insert(component.rotation().facing(), component.id(), torque);
        Ok(())
    }

    pub fn remove_gyroscope(&mut self, id: ComponentId) -> bool {
        self.buckets.remove(id)
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.last_output = ControlOutput::default();
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.buckets.contains(id)
    }

    pub fn bucket(&self, axis: Axis) -> Vec<ComponentId> {
        self.buckets.ids(axis)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// N·m
    pub fn max_positive(&self) -> DVec3 {
        self.buckets.max_positive()
    }

    pub fn max_negative(&self) -> DVec3 {
        self.buckets.max_negative()
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.last_output = ControlOutput::default();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        self.sensitivity = if sensitivity.is_finite() {
            sensitivity.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    pub fn set_dampeners(&mut self, enabled: bool) {
        self.dampeners = enabled;
    }

    pub fn dampeners(&self) -> bool {
        self.dampeners
    }

    pub fn last_output(&self) -> ControlOutput {
        self.last_output
    }

    pub fn throttle(&self, axis: Axis) -> f64 {
        throttle_fraction(
            axis,
            self.last_output.logical,
            self.last_max_positive,
            self.last_max_negative,
        )
    }

    /// Run one tick. `frame` is the orientation of the contraption the
    /// gyroscopes are mounted in, relative to the body. `input` is (pitch, yaw,
    /// roll) about that frame's X, Y, Z in [-1, 1].
    pub fn update(
        &mut self,
        body: &mut RigidBody,
        frame: DQuat,
        input: DVec3,
        tick: f64,
    ) -> ControlOutput {
        if !self.active || tick <= 0.0 || body.mass <= 0.0 {
            self.last_output = ControlOutput::default();
            return self.last_output;
        }
        let input = input.clamp(DVec3::splat(-1.0), DVec3::splat(1.0));

        // Torque capacity -> achievable angular velocity change this tick
        let inv_inertia = body.inv_inertia_in(frame);
        let max_pos = self.buckets.max_positive() * tick * inv_inertia;
        let max_neg = self.buckets.max_negative() * tick * inv_inertia;
        self.last_max_positive = max_pos;
        self.last_max_negative = max_neg;

        let mut desired = DVec3::ZERO;
        for i in 0..3 {
            let limit = if input[i] > 0.0 { max_pos[i] } else { max_neg[i] };
            desired[i] = input[i].abs() * self.sensitivity * limit;
        }

        if self.dampeners {
            let local_angular = body.angular_velocity_in(frame);
            for i in 0..3 {
                if input[i] == 0.0 {
                    desired[i] = -local_angular[i];
                }
            }
        }

        let logical = desired.clamp(max_neg, max_pos);
        body.angular_velocity += body.quaternion * frame * logical;

        let output = ControlOutput {
            logical,
            effective: logical,
        };
        self.last_output = output;
        output
    }
}

impl Default for GyroManager {
    fn default() -> Self {
        Self::new()
    }
}
