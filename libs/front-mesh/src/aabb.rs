//! # Axis-Aligned Bounding Box
//!
//! Cached per-front extents used to prune merge scans, and the clipping box
//! of bounded implicit surfaces.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// Creates a box from two corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Creates an empty box (contains nothing, grows with [`Aabb::include`]).
    pub fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Creates a box from `[xmax, xmin, ymax, ymin, zmax, zmin]`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use front_mesh::Aabb;
    /// use glam::DVec3;
    ///
    /// let b = Aabb::from_extents([1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
    /// assert_eq!(b.max, DVec3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn from_extents(extents: [f64; 6]) -> Self {
        let [xmax, xmin, ymax, ymin, zmax, zmin] = extents;
        Self::new(DVec3::new(xmin, ymin, zmin), DVec3::new(xmax, ymax, zmax))
    }

    /// Computes the box around a set of points.
    pub fn from_points<I: IntoIterator<Item = DVec3>>(points: I) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.include(p);
        }
        aabb
    }

    /// Returns true if no point has been included.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Grows the box to contain `point`.
    #[inline]
    pub fn include(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Returns true if `point` lies inside the box grown by `padding` on
    /// every side (strict comparison).
    #[inline]
    pub fn contains_padded(&self, point: DVec3, padding: f64) -> bool {
        point.cmpgt(self.min - padding).all() && point.cmplt(self.max + padding).all()
    }

    /// Returns true if `point` lies inside the closed box.
    #[inline]
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Clamps `point` into the closed box.
    #[inline]
    pub fn clamp(&self, point: DVec3) -> DVec3 {
        point.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box_contains_nothing() {
        let b = Aabb::empty();
        assert!(b.is_empty());
        assert!(!b.contains_padded(DVec3::ZERO, 1.0));
    }

    #[test]
    fn test_from_points() {
        let b = Aabb::from_points([DVec3::new(1.0, -2.0, 0.5), DVec3::new(-1.0, 3.0, 0.0)]);
        assert_eq!(b.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(b.max, DVec3::new(1.0, 3.0, 0.5));
    }

    #[test]
    fn test_padding_extends_box() {
        let b = Aabb::new(DVec3::ZERO, DVec3::ONE);
        let outside = DVec3::new(1.5, 0.5, 0.5);
        assert!(!b.contains_padded(outside, 0.2));
        assert!(b.contains_padded(outside, 0.6));
    }

    #[test]
    fn test_clamp() {
        let b = Aabb::from_extents([1.0, -1.0, 1.0, -1.0, 1.0, -1.0]);
        assert_eq!(b.clamp(DVec3::new(2.0, -3.0, 0.25)), DVec3::new(1.0, -1.0, 0.25));
    }
}
