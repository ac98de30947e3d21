//! CubeRotation - the 24 proper rotations of a cube
//!
//! Components snap to the grid in 90 degree increments, so their orientation is one
//! of 24 values instead of a free quaternion. Value `r` encodes `facing * 4 + spin`:
//! - facing: where the component's local +Y ends up (+Y, -Y, +X, -X, +Z, -Z)
//! - spin: quarter turns about local +Y, applied before facing
//!
//! Every value maps to an axis permutation plus a sign triple, so rotating a vector
//! or a bounding box is a table lookup: `rotated[i] = sign[i] * v[perm[i]]`.

use std::sync::OnceLock;

use glam::{DMat3, DQuat, DVec3};

use super::bounds::BoundingBox;
use super::errors::LoadError;

pub const ROTATION_COUNT: usize = 24;

/// Signed local axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::PosX,
        Axis::NegX,
        Axis::PosY,
        Axis::NegY,
        Axis::PosZ,
        Axis::NegZ,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Vector component this axis lies on (0 = x, 1 = y, 2 = z)
    #[inline]
    pub fn component(self) -> usize {
        self.index() / 2
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.index() % 2 == 0
    }

    pub fn unit(self) -> DVec3 {
        let mut v = DVec3::ZERO;
        v[self.component()] = if self.is_positive() { 1.0 } else { -1.0 };
        v
    }
}

#[derive(Clone, Copy, Debug)]
struct RotationEntry {
    perm: [usize; 3],
    sign: [f64; 3],
}

impl RotationEntry {
    const fn new(perm: [usize; 3], sign: [f64; 3]) -> Self {
        Self { perm, sign }
    }

    fn matrix(&self) -> DMat3 {
        let mut cols = [[0.0f64; 3]; 3];
        for i in 0..3 {
            cols[self.perm[i]][i] = self.sign[i];
        }
        DMat3::from_cols_array_2d(&cols)
    }
}

const P: f64 = 1.0;
const N: f64 = -1.0;

/// `facing * 4 + spin`; spin k turns k * 90 degrees about local +Y.
static ROTATION_TABLE: [RotationEntry; ROTATION_COUNT] = [
    // facing +Y
    RotationEntry::new([0, 1, 2], [P, P, P]),
    RotationEntry::new([2, 1, 0], [P, P, N]),
    RotationEntry::new([0, 1, 2], [N, P, N]),
    RotationEntry::new([2, 1, 0], [N, P, P]),
    // facing -Y
    RotationEntry::new([0, 1, 2], [P, N, N]),
    RotationEntry::new([2, 1, 0], [P, N, P]),
    RotationEntry::new([0, 1, 2], [N, N, P]),
    RotationEntry::new([2, 1, 0], [N, N, N]),
    // facing +X
    RotationEntry::new([1, 0, 2], [P, N, P]),
    RotationEntry::new([1, 2, 0], [P, N, N]),
    RotationEntry::new([1, 0, 2], [P, P, N]),
    RotationEntry::new([1, 2, 0], [P, P, P]),
    // facing -X
    RotationEntry::new([1, 0, 2], [N, P, P]),
    RotationEntry::new([1, 2, 0], [N, P, N]),
    RotationEntry::new([1, 0, 2], [N, N, N]),
    RotationEntry::new([1, 2, 0], [N, N, P]),
    // facing +Z
    RotationEntry::new([0, 2, 1], [P, N, P]),
    RotationEntry::new([2, 0, 1], [P, P, P]),
    RotationEntry::new([0, 2, 1], [N, P, P]),
    RotationEntry::new([2, 0, 1], [N, N, P]),
    // facing -Z
    RotationEntry::new([0, 2, 1], [P, P, N]),
    RotationEntry::new([2, 0, 1], [P, N, N]),
    RotationEntry::new([0, 2, 1], [N, N, N]),
    RotationEntry::new([2, 0, 1], [N, P, N]),
];

static FACING: [Axis; 6] = [
    Axis::PosY,
    Axis::NegY,
    Axis::PosX,
    Axis::NegX,
    Axis::PosZ,
    Axis::NegZ,
];

fn quaternion_table() -> &'static [DQuat; ROTATION_COUNT] {
    static TABLE: OnceLock<[DQuat; ROTATION_COUNT]> = OnceLock::new();
    TABLE.get_or_init(|| {
        std::array::from_fn(|r| DQuat::from_mat3(&ROTATION_TABLE[r].matrix()).normalize())
    })
}

/// One of the 24 grid-aligned orientations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CubeRotation(u8);

impl CubeRotation {
    pub const IDENTITY: CubeRotation = CubeRotation(0);

    pub fn new(value: u8) -> Result<Self, LoadError> {
        if (value as usize) < ROTATION_COUNT {
            Ok(CubeRotation(value))
        } else {
            Err(LoadError::Validation(format!(
                "rotation must be in 0..{}, got {}",
                ROTATION_COUNT, value
            )))
        }
    }

    pub fn all() -> impl Iterator<Item = CubeRotation> {
        (0..ROTATION_COUNT as u8).map(CubeRotation)
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    #[inline]
    fn entry(self) -> &'static RotationEntry {
        &ROTATION_TABLE[self.0 as usize]
    }

    /// Direction the component's local +Y points after rotation
    #[inline]
    pub fn facing(self) -> Axis {
        FACING[(self.0 / 4) as usize]
    }

    #[inline]
    pub fn spin(self) -> u8 {
        self.0 % 4
    }

    pub fn rotate_vec(self, v: DVec3) -> DVec3 {
        let e = self.entry();
        DVec3::new(
            e.sign[0] * v[e.perm[0]],
            e.sign[1] * v[e.perm[1]],
            e.sign[2] * v[e.perm[2]],
        )
    }

    pub fn rotate_bounding_box(self, bbox: &BoundingBox) -> BoundingBox {
        let e = self.entry();
        let mut min = DVec3::ZERO;
        let mut max = DVec3::ZERO;
        for i in 0..3 {
            let j = e.perm[i];
            if e.sign[i] > 0.0 {
                min[i] = bbox.min[j];
                max[i] = bbox.max[j];
            } else {
                min[i] = -bbox.max[j];
                max[i] = -bbox.min[j];
            }
        }
        BoundingBox::new(min, max)
    }

    /// Rotation equivalent to applying `rhs` first, then `self`
    pub fn compose(self, rhs: CubeRotation) -> CubeRotation {
        let a = self.entry();
        let b = rhs.entry();
        let mut perm = [0usize; 3];
        let mut sign = [0.0f64; 3];
        for i in 0..3 {
            perm[i] = b.perm[a.perm[i]];
            sign[i] = a.sign[i] * b.sign[a.perm[i]];
        }
        let idx = ROTATION_TABLE
            .iter()
            .position(|e| e.perm == perm && e.sign == sign)
            .unwrap_or_else(|| unreachable!("cube rotations are closed under composition"));
        CubeRotation(idx as u8)
    }

    pub fn matrix(self) -> DMat3 {
        self.entry().matrix()
    }

    pub fn quaternion(self) -> DQuat {
        quaternion_table()[self.0 as usize]
    }
}
