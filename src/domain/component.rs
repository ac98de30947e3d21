//! Component - a single buildable part placed on the contraption grid
//!
//! Rotation is immutable after construction, so the rotated bounding box and
//! offset are computed once and cached.

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};

use crate::core::math::grid_cell;
use crate::systems::rigid_body::ShapeId;

use super::bounds::BoundingBox;
use super::errors::LoadError;
use super::ids::{ComponentId, ContraptionId};
use super::parts::PartKind;
use super::rotation::CubeRotation;

/// Serialized form: `{ type, id?, position, rotation, hostname? }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentData {
    #[serde(rename = "type")]
    pub kind: PartKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ComponentId>,
    pub position: [f64; 3],
    pub rotation: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl ComponentData {
    pub fn new(kind: PartKind, position: [f64; 3], rotation: u8) -> Self {
        Self {
            kind,
            id: None,
            position,
            rotation,
            hostname: None,
        }
    }

    pub fn with_id(mut self, id: ComponentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Debug)]
pub struct Component {
    id: ComponentId,
    kind: PartKind,
    position: DVec3,
    rotation: CubeRotation,
    /// Rotated bounding box (cached)
    bounding_box: BoundingBox,
    /// Rotated grid-cell-to-centre offset (cached)
    offset: DVec3,
    /// Owning contraption, resolved through `ContraptionSystem`
    contraption: Option<ContraptionId>,
    /// Collision shape on the parent rigid body
    shape: Option<ShapeId>,
    hostname: Option<String>,
}

impl Component {
    pub fn new(id: ComponentId, kind: PartKind, position: DVec3, rotation: CubeRotation) -> Self {
        let props = kind.props();
        Self {
            id,
            kind,
            position,
            rotation,
            bounding_box: rotation.rotate_bounding_box(&props.bounding_box),
            offset: rotation.rotate_vec(props.offset),
            contraption: None,
            shape: None,
            hostname: None,
        }
    }

    /// Validate serialized data and build the component under `id`.
    ///
    /// Fails before anything outside the returned value is touched.
    pub fn from_data(data: &ComponentData, id: ComponentId) -> Result<Self, LoadError> {
        let rotation = CubeRotation::new(data.rotation)?;
        if data.position.iter().any(|v| !v.is_finite()) {
            return Err(LoadError::Validation(format!(
                "component position must be finite, got {:?}",
                data.position
            )));
        }
        let mut component = Self::new(id, data.kind, DVec3::from_array(data.position), rotation);
        if let Some(hostname) = &data.hostname {
            if !data.kind.is_networked() {
                return Err(LoadError::Validation(format!(
                    "{} components cannot carry a hostname ({:?})",
                    data.kind.key(),
                    hostname
                )));
            }
            if hostname.is_empty() {
                return Err(LoadError::Validation("hostname must not be empty".to_string()));
            }
            component.hostname = Some(hostname.clone());
        }
        Ok(component)
    }

    #[inline]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> PartKind {
        self.kind
    }

    #[inline]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> CubeRotation {
        self.rotation
    }

    #[inline]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    #[inline]
    pub fn offset(&self) -> DVec3 {
        self.offset
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.kind.props().mass
    }

    /// Geometric centre in contraption-local grid space
    #[inline]
    pub fn center(&self) -> DVec3 {
        self.position + self.offset
    }

    #[inline]
    pub fn cell(&self) -> IVec3 {
        grid_cell(self.position)
    }

    #[inline]
    pub fn contraption(&self) -> Option<ContraptionId> {
        self.contraption
    }

    #[inline]
    pub fn shape(&self) -> Option<ShapeId> {
        self.shape
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    pub(crate) fn set_parent(&mut self, contraption: ContraptionId) {
        self.contraption = Some(contraption);
    }

    pub(crate) fn set_shape(&mut self, shape: ShapeId) {
        self.shape = Some(shape);
    }

    pub(crate) fn set_hostname(&mut self, hostname: String) {
        self.hostname = Some(hostname);
    }

    pub fn serialize(&self) -> ComponentData {
        ComponentData {
            kind: self.kind,
            id: Some(self.id),
            position: self.position.to_array(),
            rotation: self.rotation.value(),
            hostname: self.hostname.clone(),
        }
    }
}
