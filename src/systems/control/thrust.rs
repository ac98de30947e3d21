//! ThrustManager - linear control allocator
//!
//! Turns a directional input into a per-tick velocity change bounded by what
//! the assigned thrusters can deliver. With dampeners on it also cancels drift
//! on axes without input and compensates gravity, splitting the result into:
//! - logical: what the thrusters were commanded to produce (thrust indicators)
//! - effective: the part that changed the body's net motion
//!
//! Gravity the thrusters could not cancel is written back to the body's
//! accumulator so the integrator applies it exactly once.

use glam::{DQuat, DVec3};

use crate::core::math::sign;
use crate::domain::component::Component;
use crate::domain::errors::ControlError;
use crate::domain::ids::ComponentId;
use crate::domain::rotation::Axis;
use crate::systems::rigid_body::RigidBody;

use super::buckets::ActuatorBuckets;
use super::{throttle_fraction, ControlOutput};

#[derive(Clone, Debug)]
pub struct ThrustManager {
    buckets: ActuatorBuckets,
    sensitivity: f64,
    dampeners: bool,
    active: bool,
    last_output: ControlOutput,
    /// Per-tick velocity capacity seen by the last update
    last_max_positive: DVec3,
    last_max_negative: DVec3,
}

impl ThrustManager {
    pub fn new() -> Self {
        Self {
            buckets: ActuatorBuckets::single_sided(),
            sensitivity: 1.0,
            dampeners: true,
            active: false,
            last_output: ControlOutput::default(),
            last_max_positive: DVec3::ZERO,
            last_max_negative: DVec3::ZERO,
        }
    }

    /// Assign a thruster to the bucket of its facing axis
    pub fn add_thruster(&mut self, component: &Component) -> Result<(), ControlError> {
        let Some(thrust) = component.kind().props().thrust else {
            return Err(ControlError::NotAnActuator {
                id: component.id(),
                kind: component.kind(),
            });
        };
        if self.buckets.contains(component.id()) {
            return Err(ControlError::AlreadyAssigned(component.id()));
        }
        self.buckets
            .insert(component.rotation().facing(), component.id(), thrust);
        Ok(())
    }

    pub fn remove_thruster(&mut self, id: ComponentId) -> bool {
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

    /// N, per body axis
    pub fn max_positive(&self) -> DVec3 {
        self.buckets.max_positive()
    }

    /// N, per body axis (negative values)
    pub fn max_negative(&self) -> DVec3 {
        self.buckets.max_negative()
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop producing motion. Input sent after this is ignored.
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

    /// Fraction (0..=1) of the capacity on `axis` the last logical output used
    pub fn throttle(&self, axis: Axis) -> f64 {
        throttle_fraction(
            axis,
            self.last_output.logical,
            self.last_max_positive,
            self.last_max_negative,
        )
    }

    /// Run one tick. `frame` is the orientation of the contraption the
    /// thrusters are mounted in, relative to the body. `input` is a direction in
    /// that frame, each axis in [-1, 1].
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

        // Force capacity -> achievable velocity change this tick
        let max_pos = self.buckets.max_positive() * tick * body.inv_mass;
        let max_neg = self.buckets.max_negative() * tick * body.inv_mass;
        self.last_max_positive = max_pos;
        self.last_max_negative = max_neg;

        let mut desired = DVec3::ZERO;
        for i in 0..3 {
            let limit = if input[i] > 0.0 { max_pos[i] } else { max_neg[i] };
            desired[i] = input[i].abs() * self.sensitivity * limit;
        }

        let output = if self.dampeners {
            let orientation = body.quaternion * frame;
            let to_local = orientation.inverse();
            let local_velocity = body.velocity_in(frame);
            for i in 0..3 {
                if input[i] == 0.0 {
                    desired[i] = -local_velocity[i];
                }
            }

            let gravity = to_local * body.total_gravity * tick;
            let logical = (desired - gravity).clamp(max_neg, max_pos);
            let actual = gravity + logical;

            let mut effective = DVec3::ZERO;
            let mut remaining = DVec3::ZERO;
            for i in 0..3 {
                if sign(actual[i]) != sign(gravity[i]) {
                    // gravity fully cancelled on this axis
                    effective[i] = actual[i];
                } else {
                    remaining[i] = actual[i];
                }
            }
            body.total_gravity = (orientation * remaining) / tick;

            ControlOutput { logical, effective }
        } else {
            ControlOutput {
                logical: desired,
                effective: desired,
            }
        };

        body.apply_impulse(body.quaternion * frame * output.effective * body.mass);
        self.last_output = output;
        output
    }
}

impl Default for ThrustManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use glam::{DQuat, DVec3};

    use super::*;
    use crate::domain::parts::PartKind;
    use crate::domain::rotation::CubeRotation;
    use crate::systems::rigid_body::BoxShape;

    const TICK: f64 = 1.0 / 60.0;

    // rotation values whose local +Y lands on each axis
    const FACE_POS_X: u8 = 8;
    const FACE_NEG_X: u8 = 12;
    const FACE_POS_Y: u8 = 0;
    const FACE_NEG_Y: u8 = 4;

    fn body(mass: f64) -> RigidBody {
        let mut body = RigidBody::new(DVec3::ZERO, DQuat::IDENTITY);
        body.add_shape(BoxShape::new(DVec3::splat(0.5), mass), DVec3::ZERO, DQuat::IDENTITY);
        body.update_mass_properties();
        body
    }

    fn thruster(id: ComponentId, rotation: u8) -> Component {
        Component::new(
            id,
            PartKind::Thruster,
            DVec3::ZERO,
            CubeRotation::new(rotation).unwrap(),
        )
    }

    fn manager(rotations: &[u8]) -> ThrustManager {
        let mut m = ThrustManager::new();
        for (i, r) in rotations.iter().enumerate() {
            m.add_thruster(&thruster(i as ComponentId + 1, *r)).unwrap();
        }
        m.activate();
        m
    }

    #[test]
    fn facing_picks_the_bucket() {
        let m = manager(&[FACE_POS_X, FACE_NEG_X, FACE_NEG_Y]);
        assert_eq!(m.bucket(Axis::PosX), vec![1]);
        assert_eq!(m.bucket(Axis::NegX), vec![2]);
        assert_eq!(m.bucket(Axis::NegY), vec![3]);
        assert_eq!(m.max_positive(), DVec3::new(2000.0, 0.0, 0.0));
        assert_eq!(m.max_negative(), DVec3::new(-2000.0, -2000.0, 0.0));
    }

    #[test]
    fn removing_a_thruster_drops_its_capacity() {
        let mut m = manager(&[FACE_POS_X, FACE_POS_X, FACE_NEG_Y]);
        assert_eq!(m.max_positive().x, 4000.0);
        assert!(m.remove_thruster(1));
        assert!(!m.remove_thruster(1));
        assert_eq!(m.bucket(Axis::PosX), vec![2]);
        assert_eq!(m.max_positive().x, 2000.0);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn rejects_non_thrusters_and_double_assignment() {
        let mut m = ThrustManager::new();
        let block = Component::new(5, PartKind::Block, DVec3::ZERO, CubeRotation::IDENTITY);
        assert!(matches!(m.add_thruster(&block), Err(ControlError::NotAnActuator { .. })));
        let t = thruster(6, FACE_POS_X);
        m.add_thruster(&t).unwrap();
        assert_eq!(m.add_thruster(&t), Err(ControlError::AlreadyAssigned(6)));
        assert_eq!(m.max_positive().x, 2000.0);
    }

    #[test]
    fn full_forward_input_without_dampeners() {
        let mut m = manager(&[FACE_POS_X, FACE_NEG_X]);
        m.set_dampeners(false);
        let mut b = body(10.0);
        let out = m.update(&mut b, DQuat::IDENTITY, DVec3::X, TICK);
        let expected = 2000.0 * TICK / 10.0;
        assert!((b.velocity.x - expected).abs() < 1e-9);
        assert!((b.velocity.x - 3.333).abs() < 1e-3);
        assert_eq!(out.logical, out.effective);
        assert!((m.throttle(Axis::PosX) - 1.0).abs() < 1e-12);
        assert_eq!(m.throttle(Axis::NegX), 0.0);
    }

    #[test]
    fn no_input_no_dampeners_changes_nothing() {
        let mut m = manager(&[FACE_POS_X, FACE_NEG_X, FACE_POS_Y, FACE_NEG_Y]);
        m.set_dampeners(false);
        let mut b = body(10.0);
        b.velocity = DVec3::new(3.0, -1.0, 2.0);
        b.total_gravity = DVec3::new(0.0, -9.82, 0.0);
        let out = m.update(&mut b, DQuat::IDENTITY, DVec3::ZERO, TICK);
        assert_eq!(b.velocity, DVec3::new(3.0, -1.0, 2.0));
        assert_eq!(out, ControlOutput::default());
        assert_eq!(b.total_gravity, DVec3::new(0.0, -9.82, 0.0));
    }

    #[test]
    fn dampeners_stop_drift_without_overshoot() {
        let mut m = manager(&[FACE_POS_X, FACE_NEG_X]);
        let mut b = body(10.0);
        // max decel per tick is 3.33 m/s
        b.velocity = DVec3::new(5.0, 0.0, 0.0);
        m.update(&mut b, DQuat::IDENTITY, DVec3::ZERO, TICK);
        assert!((b.velocity.x - (5.0 - 2000.0 * TICK / 10.0)).abs() < 1e-9);
        m.update(&mut b, DQuat::IDENTITY, DVec3::ZERO, TICK);
        assert!(b.velocity.x.abs() < 1e-9);
        m.update(&mut b, DQuat::IDENTITY, DVec3::ZERO, TICK);
        assert!(b.velocity.x.abs() < 1e-9);
    }

    #[test]
    fn dampeners_converge_monotonically() {
        let mut m = manager(&[FACE_POS_X, FACE_NEG_X]);
        let mut b = body(500.0);
        b.velocity = DVec3::new(-4.0, 0.0, 0.0);
        let mut last = b.velocity.x.abs();
        for _ in 0..120 {
            m.update(&mut b, DQuat::IDENTITY, DVec3::ZERO, TICK);
            assert!(b.velocity.x <= 1e-12, "overshot past zero");
            assert!(b.velocity.x.abs() <= last + 1e-12);
            last = b.velocity.x.abs();
        }
        assert!(last < 1e-9);
    }

    #[test]
    fn hover_cancels_gravity() {
        let mut m = manager(&[FACE_POS_X, FACE_NEG_X, FACE_POS_Y, FACE_POS_Y]);
        let mut b = body(10.0);
        b.total_gravity = DVec3::new(0.0, -9.82, 0.0);
        let out = m.update(&mut b, DQuat::IDENTITY, DVec3::ZERO, TICK);
        assert_eq!(b.total_gravity.y, 0.0);
        assert!(out.logical.y > 0.0);
        assert!((out.logical.y - 9.82 * TICK).abs() < 1e-12);
        b.integrate(TICK);
        assert!(b.velocity.length() < 1e-12);
    }

    #[test]
    fn no_effective_thrust_without_capacity() {
        // only horizontal thrusters, so gravity on Y stays untouched
        let mut m = manager(&[FACE_POS_X, FACE_NEG_X]);
        let mut b = body(10.0);
        b.total_gravity = DVec3::new(0.0, -9.82, 0.0);
        let out = m.update(&mut b, DQuat::IDENTITY, DVec3::ZERO, TICK);
        assert_eq!(out.effective.y, 0.0);
        assert_eq!(out.logical.y, 0.0);
        assert!((b.total_gravity.y + 9.82).abs() < 1e-9);
        assert_eq!(b.velocity, DVec3::ZERO);
    }

    #[test]
    fn weak_thrusters_leave_the_gravity_remainder() {
        let mut m = manager(&[FACE_POS_Y]);
        // 2000 N against 1000 kg * 9.82 m/s²
        let mut b = body(1000.0);
        b.total_gravity = DVec3::new(0.0, -9.82, 0.0);
        let out = m.update(&mut b, DQuat::IDENTITY, DVec3::ZERO, TICK);
        assert_eq!(out.effective.y, 0.0);
        assert!((out.logical.y - 2000.0 * TICK / 1000.0).abs() < 1e-12);
        assert!((b.total_gravity.y - (-9.82 + 2.0)).abs() < 1e-9);
        b.integrate(TICK);
        assert!((b.velocity.y - (-7.82 * TICK)).abs() < 1e-9);
    }

    #[test]
    fn thrust_is_applied_in_body_frame() {
        let mut m = manager(&[FACE_POS_X]);
        m.set_dampeners(false);
        let mut b = body(10.0);
        b.quaternion = DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2);
        m.update(&mut b, DQuat::IDENTITY, DVec3::X, TICK);
        // body +X points along world +Y
        assert!(b.velocity.x.abs() < 1e-9);
        assert!((b.velocity.y - 2000.0 * TICK / 10.0).abs() < 1e-9);
    }

    #[test]
    fn mounting_frame_turns_thrust_and_gravity() {
        let mut m = manager(&[FACE_POS_X, FACE_NEG_X]);
        let mut b = body(1000.0);
        // thruster +X points along body +Y
        let frame = DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2);
        b.total_gravity = DVec3::new(0.0, -1.0, 0.0);
        let out = m.update(&mut b, frame, DVec3::ZERO, TICK);
        assert!((out.logical.x - TICK).abs() < 1e-12);
        assert!(b.total_gravity.length() < 1e-9);

        m.set_dampeners(false);
        m.update(&mut b, frame, DVec3::X, TICK);
        assert!(b.velocity.x.abs() < 1e-9);
        assert!((b.velocity.y - 2000.0 * TICK / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn sensitivity_scales_requested_thrust() {
        let mut m = manager(&[FACE_POS_X]);
        m.set_dampeners(false);
        m.set_sensitivity(0.25);
        let mut b = body(10.0);
        m.update(&mut b, DQuat::IDENTITY, DVec3::X, TICK);
        assert!((b.velocity.x - 0.25 * 2000.0 * TICK / 10.0).abs() < 1e-9);
        m.set_sensitivity(7.0);
        assert_eq!(m.sensitivity(), 1.0);
    }

    #[test]
    fn inactive_manager_does_nothing() {
        let mut m = manager(&[FACE_POS_X]);
        m.set_dampeners(false);
        m.deactivate();
        let mut b = body(10.0);
        let out = m.update(&mut b, DQuat::IDENTITY, DVec3::X, TICK);
        assert_eq!(out, ControlOutput::default());
        assert_eq!(b.velocity, DVec3::ZERO);
    }
}
