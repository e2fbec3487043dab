// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes in f64 precision.
//!
//! Host-wall detection scores candidate walls by the volume of the
//! intersection between the door's expanded box and the wall's box, so
//! `expand`, `intersection`, and `volume` are the load-bearing operations
//! here.

use nalgebra::Point3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a bounding box from min/max corners
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Build the bounding box of a point set. Returns `None` for an empty set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Aabb::new(first, first);
        for p in iter {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.min.z = bbox.min.z.min(p.z);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
            bbox.max.z = bbox.max.z.max(p.z);
        }
        Some(bbox)
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: Point3::new(self.min.x - margin, self.min.y - margin, self.min.z - margin),
            max: Point3::new(self.max.x + margin, self.max.y + margin, self.max.z + margin),
        }
    }

    /// Intersection region with another box, `None` when disjoint
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let min = Point3::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Point3::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        if min.x < max.x && min.y < max.y && min.z < max.z {
            Some(Aabb { min, max })
        } else {
            None
        }
    }

    /// Box volume. Degenerate boxes have zero volume.
    #[inline]
    pub fn volume(&self) -> f64 {
        let e = self.extents();
        (e.0.max(0.0)) * (e.1.max(0.0)) * (e.2.max(0.0))
    }

    /// Edge lengths along X, Y, Z
    #[inline]
    pub fn extents(&self) -> (f64, f64, f64) {
        (
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    /// Geometric center
    #[inline]
    pub fn center(&self) -> Point3<f64> {
        Point3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Check whether a point lies inside (inclusive)
    #[inline]
    pub fn contains_point(&self, p: &Point3<f64>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// The eight corner points
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn intersection_volume() {
        let a = unit_box();
        let b = Aabb::new(Point3::new(0.5, 0.5, 0.5), Point3::new(2.0, 2.0, 2.0));
        let inter = a.intersection(&b).unwrap();
        assert!((inter.volume() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn disjoint_boxes_do_not_intersect() {
        let a = unit_box();
        let b = Aabb::new(Point3::new(2.0, 0.0, 0.0), Point3::new(3.0, 1.0, 1.0));
        assert!(a.intersection(&b).is_none());
        // Touching faces count as disjoint (zero-volume intersection)
        let c = Aabb::new(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
        assert!(a.intersection(&c).is_none());
    }

    #[test]
    fn expanded_reaches_nearby_box() {
        let a = unit_box();
        let b = Aabb::new(Point3::new(1.2, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
        assert!(a.intersection(&b).is_none());
        assert!(a.expanded(0.3).intersection(&b).is_some());
    }

    #[test]
    fn from_points_roundtrip() {
        let pts = vec![
            Point3::new(1.0, -2.0, 3.0),
            Point3::new(-1.0, 4.0, 0.0),
            Point3::new(0.0, 0.0, 5.0),
        ];
        let bbox = Aabb::from_points(pts).unwrap();
        assert_eq!(bbox.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.max, Point3::new(1.0, 4.0, 5.0));
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }
}
