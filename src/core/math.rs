//! Math helpers on top of glam's double precision types

use glam::{DMat3, DVec3, IVec3};

/// Three-way sign: -1, 0 or 1. Unlike `f64::signum`, zero maps to 0.
#[inline]
pub fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Grid cell that a (possibly fractional) grid coordinate falls into
#[inline]
pub fn grid_cell(position: DVec3) -> IVec3 {
    position.round().as_ivec3()
}

/// Diagonal of a matrix as a vector
#[inline]
pub fn diagonal(m: &DMat3) -> DVec3 {
    DVec3::new(m.x_axis.x, m.y_axis.y, m.z_axis.z)
}
