//! Control allocation - turns pilot intent into bounded velocity changes
//!
//! - ThrustManager: linear motion, gravity compensation, dampeners
//! - GyroManager: angular motion, dampeners
//!
//! Input is an explicit per-tick snapshot; managers never hold on to callbacks.

mod buckets;
mod gyro;
mod thrust;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::domain::rotation::Axis;

pub use buckets::ActuatorBuckets;
pub use gyro::GyroManager;
pub use thrust::ThrustManager;

/// Pilot input for one tick in the contraption frame, each axis in [-1, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub linear: DVec3,
    /// pitch, yaw, roll about contraption X, Y, Z
    pub angular: DVec3,
}

impl ControlInput {
    pub fn new(linear: DVec3, angular: DVec3) -> Self {
        Self { linear, angular }
    }

    pub fn linear(linear: DVec3) -> Self {
        Self {
            linear,
            angular: DVec3::ZERO,
        }
    }
}

/// Per-tick velocity change in the contraption frame (m/s or rad/s)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlOutput {
    /// What the actuators were commanded to produce
    pub logical: DVec3,
    /// What changed the body's net motion
    pub effective: DVec3,
}

pub type ThrustOutput = ControlOutput;
pub type GyroOutput = ControlOutput;

pub(crate) fn throttle_fraction(
    axis: Axis,
    logical: DVec3,
    max_positive: DVec3,
    max_negative: DVec3,
) -> f64 {
    let c = axis.component();
    let limit = if axis.is_positive() {
        max_positive[c]
    } else {
        max_negative[c]
    };
    if limit == 0.0 {
        return 0.0;
    }
    (logical[c] / limit).clamp(0.0, 1.0)
}
