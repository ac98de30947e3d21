//! RigidBody - the body a contraption is simulated as
//!
//! The body stores its collision shapes in local coordinates (relative to its
//! origin, which mass recompute keeps on the centre of mass) and transforms
//! them to world space using position and quaternion.

mod body;
mod shape;

pub use body::RigidBody;
pub use shape::{BoxShape, ShapeId};
