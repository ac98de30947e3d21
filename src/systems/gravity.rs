//! Gravity sources and the per-body gravity accumulator
//!
//! Each tick the field is evaluated at every body's position and written to
//! `RigidBody::total_gravity` before control managers run. ThrustManager may
//! consume part of it; the integrator applies whatever remains.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::rigid_body::RigidBody;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GravitySource {
    /// Constant acceleration, e.g. `[0, -9.82, 0]`
    Uniform { acceleration: [f64; 3] },
    /// Point mass: a = -mu * r̂ / r², `r` clamped to `min_radius`
    PointMass {
        center: [f64; 3],
        mu: f64,
        #[serde(default, rename = "minRadius")]
        min_radius: f64,
    },
}

impl GravitySource {
    pub fn uniform(acceleration: DVec3) -> Self {
        GravitySource::Uniform {
            acceleration: acceleration.to_array(),
        }
    }

    pub fn point_mass(center: DVec3, mu: f64, min_radius: f64) -> Self {
        GravitySource::PointMass {
            center: center.to_array(),
            mu,
            min_radius,
        }
    }

    pub fn eval(&self, p: DVec3) -> DVec3 {
        match *self {
            GravitySource::Uniform { acceleration } => DVec3::from_array(acceleration),
            GravitySource::PointMass {
                center,
                mu,
                min_radius,
            } => {
                let r = p - DVec3::from_array(center);
                let r2 = r.length_squared().max(min_radius * min_radius);
                if r2 == 0.0 {
                    return DVec3::ZERO;
                }
                let inv_r3 = 1.0 / (r2 * r2.sqrt());
                -r * (mu * inv_r3)
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GravityField {
    sources: Vec<GravitySource>,
}

impl GravityField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, source: GravitySource) {
        self.sources.push(source);
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sources(&self) -> &[GravitySource] {
        &self.sources
    }

    pub fn eval(&self, p: DVec3) -> DVec3 {
        self.sources.iter().fold(DVec3::ZERO, |acc, s| acc + s.eval(p))
    }

    /// Add this tick's gravity at the body's position to its accumulator
    pub fn accumulate(&self, body: &mut RigidBody) {
        body.total_gravity += self.eval(body.position);
    }
}
