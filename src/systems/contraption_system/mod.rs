//! ContraptionSystem - every simulated contraption and its rigid body
//!
//! Crafts live in a dense Vec; `ContraptionId -> index` lookups resolve the
//! back-references components carry. The system also owns the world-unique
//! component id allocator.
//!
//! Spawning is atomic: a craft is only inserted once all of its components and
//! seat references validated.

mod system;

pub use system::{ContraptionSystem, Craft, SpawnResult};
