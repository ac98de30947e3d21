use glam::{DMat3, DQuat, DVec3};

use crate::core::math::diagonal;

use super::shape::{BoxShape, ShapeId};

/// Rigid Body - moves as a single unit
#[derive(Clone, Debug)]
pub struct RigidBody {
    /// Unique ID for this body
    pub id: u32,

    // === Physics State ===
    /// World position of the body origin (centre of mass)
    pub position: DVec3,
    /// m/s
    pub velocity: DVec3,
    pub quaternion: DQuat,
    /// rad/s, world frame
    pub angular_velocity: DVec3,
    /// Sum of shape masses
    pub mass: f64,
    pub inv_mass: f64,
    /// Body-frame inertia tensor about the origin
    pub inertia: DMat3,
    pub inv_inertia: DMat3,

    /// Gravity accumulated this tick (m/s²). Control managers may consume part of it;
    /// `integrate` applies the remainder and clears it.
    pub total_gravity: DVec3,

    // === Shape Definition ===
    pub shapes: Vec<BoxShape>,
    pub bounding_radius: f64,
}

impl RigidBody {
    pub fn new(position: DVec3, quaternion: DQuat) -> Self {
        Self {
            id: 0,
            position,
            velocity: DVec3::ZERO,
            quaternion: quaternion.normalize(),
            angular_velocity: DVec3::ZERO,
            mass: 0.0,
            inv_mass: 0.0,
            inertia: DMat3::ZERO,
            inv_inertia: DMat3::ZERO,
            total_gravity: DVec3::ZERO,
            shapes: Vec::new(),
            bounding_radius: 0.0,
        }
    }

    /// Attach a shape at a body-frame pose. Mass properties are not refreshed;
    /// call `update_mass_properties` once the shape set is final.
    pub fn add_shape(&mut self, mut shape: BoxShape, offset: DVec3, orientation: DQuat) -> ShapeId {
        shape.offset = offset;
        shape.orientation = orientation;
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    pub fn shape(&self, id: ShapeId) -> Option<&BoxShape> {
        self.shapes.get(id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut BoxShape> {
        self.shapes.get_mut(id)
    }

    /// World position of a shape's centre
    pub fn shape_world_position(&self, id: ShapeId) -> Option<DVec3> {
        self.shapes
            .get(id)
            .map(|s| self.position + self.quaternion * s.offset)
    }

    pub fn update_mass_properties(&mut self) {
        self.mass = self.shapes.iter().map(|s| s.mass).sum();
        self.inv_mass = if self.mass > 0.0 { 1.0 / self.mass } else { 0.0 };

        self.inertia = self
            .shapes
            .iter()
            .fold(DMat3::ZERO, |acc, s| acc + s.inertia_about_origin());
        self.inv_inertia = if self.inertia.determinant().abs() > f64::EPSILON {
            self.inertia.inverse()
        } else {
            DMat3::ZERO
        };
    }

    pub fn update_bounding_radius(&mut self) {
        self.bounding_radius = self.shapes.iter().map(|s| s.reach()).fold(0.0, f64::max);
    }

    /// World-space inverse inertia: R * I^-1 * R^T
    pub fn inv_inertia_world(&self) -> DMat3 {
        let r = DMat3::from_quat(self.quaternion);
        r * self.inv_inertia * r.transpose()
    }

    /// Apply impulse at centre of mass (world frame, N·s)
    pub fn apply_impulse(&mut self, impulse: DVec3) {
        self.velocity += impulse * self.inv_mass;
    }

    /// Apply angular impulse (world frame, N·m·s)
    pub fn apply_angular_impulse(&mut self, impulse: DVec3) {
        self.angular_velocity += self.inv_inertia_world() * impulse;
    }

    /// Velocity seen from a frame fixed to the body. `frame` is relative to the body axes.
    pub fn velocity_in(&self, frame: DQuat) -> DVec3 {
        (self.quaternion * frame).inverse() * self.velocity
    }

    pub fn angular_velocity_in(&self, frame: DQuat) -> DVec3 {
        (self.quaternion * frame).inverse() * self.angular_velocity
    }

    /// Diagonal of the inverse inertia tensor expressed in `frame`
    pub fn inv_inertia_in(&self, frame: DQuat) -> DVec3 {
        let r = DMat3::from_quat(frame);
        diagonal(&(r.transpose() * self.inv_inertia * r))
    }

    /// Semi-implicit Euler step. Applies the remaining gravity and clears the accumulator.
    pub fn integrate(&mut self, dt: f64) {
        if self.inv_mass > 0.0 {
            self.velocity += self.total_gravity * dt;
        }
        self.total_gravity = DVec3::ZERO;

        self.position += self.velocity * dt;
        let spin = DQuat::from_scaled_axis(self.angular_velocity * dt);
        self.quaternion = (spin * self.quaternion).normalize();
    }
}
