use glam::DVec3;

use crate::domain::ids::ComponentId;
use crate::domain::rotation::Axis;

#[derive(Clone, Copy, Debug)]
struct Entry {
    id: ComponentId,
    rating: f64,
}

/// Six signed-axis buckets of actuators plus their aggregate capacity
///
/// `max_negative` is stored as negative numbers so clamping is range-symmetric.
/// A single-sided actuator (thruster) only adds to the side its bucket names;
/// a double-sided one (gyroscope) adds its rating to both.
#[derive(Clone, Debug)]
pub struct ActuatorBuckets {
    buckets: [Vec<Entry>; 6],
    double_sided: bool,
    max_positive: DVec3,
    max_negative: DVec3,
}

impl ActuatorBuckets {
    pub fn single_sided() -> Self {
        Self::new(false)
    }

    pub fn double_sided() -> Self {
        Self::new(true)
    }

    fn new(double_sided: bool) -> Self {
        Self {
            buckets: Default::default(),
            double_sided,
            max_positive: DVec3::ZERO,
            max_negative: DVec3::ZERO,
        }
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.buckets.iter().any(|b| b.iter().any(|e| e.id == id))
    }

    /// Caller checks `contains` first; an id must sit in exactly one bucket.
    pub fn insert(&mut self, axis: Axis, id: ComponentId, rating: f64) {
        self.buckets[axis.index()].push(Entry { id, rating });
        self.refresh_totals();
    }

    pub fn remove(&mut self, id: ComponentId) -> bool {
        for bucket in self.buckets.iter_mut() {
            if let Some(pos) = bucket.iter().position(|e| e.id == id) {
                bucket.remove(pos);
                self.refresh_totals();
                return true;
            }
        }
        false
    }

    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.max_positive = DVec3::ZERO;
        self.max_negative = DVec3::ZERO;
    }

    pub fn ids(&self, axis: Axis) -> Vec<ComponentId> {
        self.buckets[axis.index()].iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn max_positive(&self) -> DVec3 {
        self.max_positive
    }

    #[inline]
    pub fn max_negative(&self) -> DVec3 {
        self.max_negative
    }

    // Totals are re-summed from the entries so they never drift from the
    // assigned set after removals.
    fn refresh_totals(&mut self) {
        let mut pos = DVec3::ZERO;
        let mut neg = DVec3::ZERO;
        for axis in Axis::ALL {
            let c = axis.component();
            for e in self.buckets[axis.index()].iter() {
                if self.double_sided {
                    pos[c] += e.rating;
                    neg[c] -= e.rating;
                } else if axis.is_positive() {
                    pos[c] += e.rating;
                } else {
                    neg[c] -= e.rating;
                }
            }
        }
        self.max_positive = pos;
        self.max_negative = neg;
    }
}
