// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Near/far depth clipping in NDC.
//!
//! Plan views section the model at the cut height: projected geometry
//! above the cut lands outside the NDC depth range and must be removed,
//! with partially-outside segments shortened by linear interpolation.
//! Elevation views are framed tightly enough that no clipping is needed.

use nalgebra::Point3;

/// NDC near plane depth
pub const NEAR: f64 = -1.0;
/// NDC far plane depth
pub const FAR: f64 = 1.0;

/// Clip a projected segment against the near (z = -1) and far (z = +1)
/// NDC planes.
///
/// Returns `None` when the segment lies fully outside. Segments already
/// inside are returned unchanged, so clipping is idempotent.
pub fn clip_segment(a: Point3<f64>, b: Point3<f64>) -> Option<(Point3<f64>, Point3<f64>)> {
    let mut a = a;
    let mut b = b;

    // Fully outside on the same side
    if (a.z < NEAR && b.z < NEAR) || (a.z > FAR && b.z > FAR) {
        return None;
    }

    if a.z < NEAR {
        a = lerp_to_depth(&a, &b, NEAR);
    } else if a.z > FAR {
        a = lerp_to_depth(&a, &b, FAR);
    }
    if b.z < NEAR {
        b = lerp_to_depth(&a, &b, NEAR);
    } else if b.z > FAR {
        b = lerp_to_depth(&a, &b, FAR);
    }

    Some((a, b))
}

/// Point on segment `a`-`b` at the given depth
fn lerp_to_depth(a: &Point3<f64>, b: &Point3<f64>, depth: f64) -> Point3<f64> {
    let dz = b.z - a.z;
    if dz.abs() < 1e-12 {
        return *a;
    }
    let t = (depth - a.z) / dz;
    Point3::new(
        a.x + (b.x - a.x) * t,
        a.y + (b.y - a.y) * t,
        depth,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn inside_segment_unchanged() {
        let a = Point3::new(0.1, 0.2, -0.5);
        let b = Point3::new(0.3, 0.4, 0.5);
        let (ca, cb) = clip_segment(a, b).unwrap();
        assert_eq!(ca, a);
        assert_eq!(cb, b);
        // Idempotent
        let (ca2, cb2) = clip_segment(ca, cb).unwrap();
        assert_eq!(ca2, ca);
        assert_eq!(cb2, cb);
    }

    #[test]
    fn fully_outside_dropped() {
        let a = Point3::new(0.0, 0.0, -2.0);
        let b = Point3::new(1.0, 0.0, -1.5);
        assert!(clip_segment(a, b).is_none());
        let c = Point3::new(0.0, 0.0, 1.2);
        let d = Point3::new(1.0, 0.0, 3.0);
        assert!(clip_segment(c, d).is_none());
    }

    #[test]
    fn crossing_near_plane_is_shortened() {
        let a = Point3::new(0.0, 0.0, -2.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let (ca, cb) = clip_segment(a, b).unwrap();
        assert_relative_eq!(ca.z, NEAR, epsilon = 1e-12);
        assert_relative_eq!(ca.x, 0.5, epsilon = 1e-12);
        assert_eq!(cb, b);
    }

    #[test]
    fn crossing_both_planes() {
        let a = Point3::new(0.0, 0.0, -3.0);
        let b = Point3::new(4.0, 0.0, 3.0);
        let (ca, cb) = clip_segment(a, b).unwrap();
        assert_relative_eq!(ca.z, NEAR, epsilon = 1e-12);
        assert_relative_eq!(cb.z, FAR, epsilon = 1e-12);
        assert!(ca.x < cb.x);
    }
}
