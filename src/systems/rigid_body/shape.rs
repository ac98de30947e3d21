use glam::{DMat3, DQuat, DVec3};

/// Index of a shape inside `RigidBody::shapes`
pub type ShapeId = usize;

/// Solid box attached to a rigid body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxShape {
    pub half_extents: DVec3,
    pub mass: f64,
    /// Position relative to the body origin (body frame)
    pub offset: DVec3,
    /// Orientation relative to the body (body frame)
    pub orientation: DQuat,
}

impl BoxShape {
    pub fn new(half_extents: DVec3, mass: f64) -> Self {
        Self {
            half_extents,
            mass,
            offset: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }

    /// Principal moments about the box centre, in the box frame
    pub fn principal_inertia(&self) -> DVec3 {
        let dims = self.half_extents * 2.0;
        let x2 = dims.x * dims.x;
        let y2 = dims.y * dims.y;
        let z2 = dims.z * dims.z;
        DVec3::new(y2 + z2, x2 + z2, x2 + y2) * (self.mass / 12.0)
    }

    /// Inertia about the body origin, in the body frame (parallel axis theorem)
    pub fn inertia_about_origin(&self) -> DMat3 {
        let r = DMat3::from_quat(self.orientation);
        let local = r * DMat3::from_diagonal(self.principal_inertia()) * r.transpose();
        let d = self.offset;
        let shift = DMat3::from_diagonal(DVec3::splat(d.length_squared()))
            - DMat3::from_cols(d * d.x, d * d.y, d * d.z);
        local + shift * self.mass
    }

    /// Distance from the body origin to the farthest corner
    pub fn reach(&self) -> f64 {
        self.offset.length() + self.half_extents.length()
    }
}
