//! Systems operating on contraptions and their bodies
//!
//! - rigid_body: shapes, mass properties, integration
//! - gravity: sources and the per-body accumulator
//! - control: thrust and gyro allocators
//! - contraption: component assembly, mass recompute, seats, persistence
//! - contraption_system: arena of crafts keyed by ContraptionId

pub mod contraption;
pub mod contraption_system;
pub mod control;
pub mod gravity;
pub mod rigid_body;
