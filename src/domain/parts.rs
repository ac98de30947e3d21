//! Parts catalog - per-kind constants for every buildable component
//!
//! Kinds are string-tagged in save data (`"block"`, `"thruster"`, ...).
//! Bounding boxes and offsets are pre-rotation; `Component` caches the rotated form.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::bounds::BoundingBox;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    Block,
    Thruster,
    Gyroscope,
    Seat,
}

/// Static properties shared by every component of a kind
#[derive(Clone, Copy, Debug)]
pub struct PartProps {
    /// kg
    pub mass: f64,
    pub bounding_box: BoundingBox,
    /// Grid cell to geometric centre
    pub offset: DVec3,
    /// N along the facing axis
    pub thrust: Option<f64>,
    /// N·m about the facing axis, both senses
    pub torque: Option<f64>,
    /// Networked kinds get hostnames `{prefix}_{n}`
    pub hostname_prefix: Option<&'static str>,
}

static PART_DATA: [PartProps; 4] = [
    // block
    PartProps {
        mass: 100.0,
        bounding_box: BoundingBox::new(DVec3::new(-0.5, -0.5, -0.5), DVec3::new(0.5, 0.5, 0.5)),
        offset: DVec3::ZERO,
        thrust: None,
        torque: None,
        hostname_prefix: None,
    },
    // thruster: nozzle hangs half a cell below the mount
    PartProps {
        mass: 50.0,
        bounding_box: BoundingBox::new(
            DVec3::new(-0.5, -0.75, -0.5),
            DVec3::new(0.5, 0.75, 0.5),
        ),
        offset: DVec3::new(0.0, -0.25, 0.0),
        thrust: Some(2000.0),
        torque: None,
        hostname_prefix: Some("thruster"),
    },
    // gyroscope
    PartProps {
        mass: 80.0,
        bounding_box: BoundingBox::new(DVec3::new(-0.5, -0.5, -0.5), DVec3::new(0.5, 0.5, 0.5)),
        offset: DVec3::ZERO,
        thrust: None,
        torque: Some(500.0),
        hostname_prefix: Some("gyroscope"),
    },
    // seat
    PartProps {
        mass: 60.0,
        bounding_box: BoundingBox::new(DVec3::new(-0.5, -0.5, -0.5), DVec3::new(0.5, 0.5, 0.5)),
        offset: DVec3::ZERO,
        thrust: None,
        torque: None,
        hostname_prefix: Some("seat"),
    },
];

impl PartKind {
    pub const ALL: [PartKind; 4] = [
        PartKind::Block,
        PartKind::Thruster,
        PartKind::Gyroscope,
        PartKind::Seat,
    ];

    #[inline]
    pub fn props(self) -> &'static PartProps {
        &PART_DATA[self as usize]
    }

    pub fn key(self) -> &'static str {
        match self {
            PartKind::Block => "block",
            PartKind::Thruster => "thruster",
            PartKind::Gyroscope => "gyroscope",
            PartKind::Seat => "seat",
        }
    }

    pub fn from_key(key: &str) -> Option<PartKind> {
        PartKind::ALL.into_iter().find(|k| k.key() == key)
    }

    #[inline]
    pub fn is_networked(self) -> bool {
        self.props().hostname_prefix.is_some()
    }

    #[inline]
    pub fn hostname_prefix(self) -> Option<&'static str> {
        self.props().hostname_prefix
    }
}

/// JSON description of the catalog for the build UI
pub fn manifest_json() -> String {
    let parts: Vec<PartManifestEntry> = PartKind::ALL
        .iter()
        .map(|&kind| {
            let p = kind.props();
            PartManifestEntry {
                key: kind.key(),
                mass: p.mass,
                bounding_box: [p.bounding_box.min.to_array(), p.bounding_box.max.to_array()],
                offset: p.offset.to_array(),
                thrust: p.thrust,
                torque: p.torque,
                networked: kind.is_networked(),
            }
        })
        .collect();
    let out = PartManifest {
        format_version: 1,
        parts,
    };
    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PartManifest {
    format_version: u32,
    parts: Vec<PartManifestEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PartManifestEntry {
    key: &'static str,
    mass: f64,
    bounding_box: [[f64; 3]; 2],
    offset: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    thrust: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    torque: Option<f64>,
    networked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_serde() {
        for kind in PartKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.key()));
            assert_eq!(PartKind::from_key(kind.key()), Some(kind));
        }
        assert!(serde_json::from_str::<PartKind>("\"warp_drive\"").is_err());
    }

    #[test]
    fn only_blocks_are_not_networked() {
        assert!(!PartKind::Block.is_networked());
        assert_eq!(PartKind::Thruster.hostname_prefix(), Some("thruster"));
        assert_eq!(PartKind::Gyroscope.hostname_prefix(), Some("gyroscope"));
        assert_eq!(PartKind::Seat.hostname_prefix(), Some("seat"));
    }

    #[test]
    fn actuators_carry_ratings() {
        assert!(PartKind::Thruster.props().thrust.is_some());
        assert!(PartKind::Gyroscope.props().torque.is_some());
        assert!(PartKind::Block.props().thrust.is_none());
        for kind in PartKind::ALL {
            assert!(kind.props().mass > 0.0);
        }
    }

    #[test]
    fn manifest_lists_every_part() {
        let v: serde_json::Value = serde_json::from_str(&manifest_json()).unwrap();
        assert_eq!(v["formatVersion"], 1);
        assert_eq!(v["parts"].as_array().unwrap().len(), PartKind::ALL.len());
        assert_eq!(v["parts"][1]["thrust"], 2000.0);
    }
}
