use glam::DVec3;

/// Axis-aligned box, relative to a component's geometric centre
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Box centred on the origin
    pub fn centered(half_extents: DVec3) -> Self {
        Self {
            min: -half_extents,
            max: half_extents,
        }
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn half_extents(&self) -> DVec3 {
        self.size() * 0.5
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn approx_eq(&self, other: &BoundingBox, eps: f64) -> bool {
        self.min.abs_diff_eq(other.min, eps) && self.max.abs_diff_eq(other.max, eps)
    }
}
