//! Domain model: rotations, parts catalog, components, hostname network,
//! persistence records and the error taxonomy.

pub mod bounds;
pub mod component;
pub mod errors;
pub mod ids;
pub mod network;
pub mod parts;
pub mod rotation;
pub mod save;

pub use bounds::BoundingBox;
pub use component::{Component, ComponentData};
pub use errors::{ControlError, LoadError, NetworkError};
pub use ids::{ComponentId, ComponentIds, ContraptionId};
pub use network::Network;
pub use parts::{PartKind, PartProps};
pub use rotation::{Axis, CubeRotation};
pub use save::{ContraptionData, NetworkData, SeatLink};
