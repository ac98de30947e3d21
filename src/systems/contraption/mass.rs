//! Mass-property recompute
//!
//! Keeps the body origin on the structure's centre of mass. Every shape is
//! re-seated around the new centre and the body is translated by the same
//! delta, so nothing moves in world space:
//!
//! 1. `C_new = Σ (p + o) m / M` in contraption-local space
//! 2. shape offset = `q * ((p + o) - C_new)`
//! 3. `C_old = -(q⁻¹ * position_offset)`, `Δ = C_new - C_old`
//! 4. body position += `body.q * q * Δ`
//! 5. `position_offset = -(q * C_new)`
//! 6. refresh inertia and bounding radius

use glam::DVec3;

use crate::systems::rigid_body::RigidBody;

use super::Contraption;

impl Contraption {
    /// Mass-weighted centre of the components, contraption-local
    pub fn center_of_mass(&self) -> Option<DVec3> {
        let total = self.total_mass();
        if self.components.is_empty() || total <= 0.0 {
            return None;
        }
        let weighted = self
            .components
            .iter()
            .fold(DVec3::ZERO, |acc, c| acc + c.center() * c.mass());
        Some(weighted / total)
    }

    /// Panics on a contraption without mass; a contraption always has at least
    /// one component.
    pub fn recompute_mass(&mut self, body: &mut RigidBody) {
        let Some(c_new) = self.center_of_mass() else {
            panic!("mass recompute on contraption {} with no mass", self.id);
        };

        for component in self.components.iter() {
            let Some(shape) = component.shape().and_then(|s| body.shape_mut(s)) else {
                continue;
            };
            shape.offset = self.quaternion * (component.center() - c_new);
        }

        let c_old = -(self.quaternion.inverse() * self.position_offset);
        let delta = c_new - c_old;
        body.position += body.quaternion * (self.quaternion * delta);
        self.position_offset = -(self.quaternion * c_new);

        body.update_mass_properties();
        body.update_bounding_radius();
    }
}
