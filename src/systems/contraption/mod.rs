//! Contraption - discrete components assembled into one rigid body
//!
//! - contraption.rs: component loading, lookups, local/world transforms
//! - mass.rs: centre-of-mass recompute and body re-seating
//! - seat.rs: control seat wiring and the per-tick control update
//! - serialize.rs: save data in and out

mod contraption;
mod mass;
mod seat;
mod serialize;

pub use contraption::Contraption;
