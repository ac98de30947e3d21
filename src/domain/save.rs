//! Persistence records for contraptions
//!
//! ```text
//! { positionOffset, quaternion, components: [...],
//!   networkData: { <hostname>: { thrusters, gyroscopes } },
//!   network: { hostnameIndexes: { <prefix>: n } } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::component::ComponentData;
use super::errors::LoadError;

fn identity_quaternion() -> [f64; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkData {
    #[serde(default)]
    pub hostname_indexes: BTreeMap<String, u32>,
}

/// Network state of a control seat: hostnames of the actuators it drives
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatLink {
    #[serde(default)]
    pub thrusters: Vec<String>,
    #[serde(default)]
    pub gyroscopes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContraptionData {
    #[serde(default)]
    pub position_offset: [f64; 3],
    /// `[x, y, z, w]`
    #[serde(default = "identity_quaternion")]
    pub quaternion: [f64; 4],
    pub components: Vec<ComponentData>,
    #[serde(default)]
    pub network_data: BTreeMap<String, SeatLink>,
    #[serde(default)]
    pub network: NetworkData,
}

impl ContraptionData {
    pub fn new(components: Vec<ComponentData>) -> Self {
        Self {
            position_offset: [0.0; 3],
            quaternion: identity_quaternion(),
            components,
            network_data: BTreeMap::new(),
            network: NetworkData::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parts::PartKind;

    #[test]
    fn optional_sections_default() {
        let data = ContraptionData::from_json(
            r#"{"components":[{"type":"block","position":[0,0,0],"rotation":0}]}"#,
        )
        .unwrap();
        assert_eq!(data.quaternion, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(data.position_offset, [0.0; 3]);
        assert!(data.network_data.is_empty());
        assert_eq!(data.components[0].kind, PartKind::Block);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let mut data = ContraptionData::new(vec![]);
        data.network.hostname_indexes.insert("thruster".to_string(), 2);
        data.network_data.insert(
            "seat_0".to_string(),
            SeatLink {
                thrusters: vec!["thruster_0".to_string()],
                gyroscopes: vec![],
            },
        );
        let json = data.to_json();
        assert!(json.contains("\"positionOffset\""));
        assert!(json.contains("\"networkData\""));
        assert!(json.contains("\"hostnameIndexes\":{\"thruster\":2}"));
        assert_eq!(ContraptionData::from_json(&json).unwrap(), data);
    }

    #[test]
    fn wrong_quaternion_shape_is_rejected() {
        let err = ContraptionData::from_json(r#"{"quaternion":[0,0,1],"components":[]}"#);
        assert!(matches!(err, Err(LoadError::Validation(_))));
    }
}
