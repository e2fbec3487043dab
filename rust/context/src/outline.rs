// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room/space floor-outline extraction.
//!
//! Harvests the mesh vertices sitting on the floor (within 10 cm of the
//! lowest Z), projects them to the horizontal plane, and takes their 2D
//! convex hull. Degenerate hulls (< 3 points) and mesh-less spaces fall
//! back to the bounding-box rectangle; the result records which method
//! produced it because a drawing must distinguish a measured outline from
//! an approximation.

use nalgebra::Point2;
use plan2d_model::Element;

/// Vertical band above the lowest vertex that still counts as "floor"
pub const FLOOR_BAND: f64 = 0.10;

/// How a floor outline was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineMethod {
    /// Convex hull of floor-level mesh vertices
    Geometry,
    /// Bounding-box rectangle fallback
    BoundingBox,
}

/// A 2D floor polygon in counterclockwise order, plus its floor level
#[derive(Debug, Clone)]
pub struct FloorOutline {
    pub polygon: Vec<Point2<f64>>,
    pub floor_level: f64,
    pub method: OutlineMethod,
}

/// Extract the floor outline of a space element.
///
/// Returns `None` only when the element has neither mesh vertices nor a
/// bounding box.
pub fn extract_floor_outline(space: &Element) -> Option<FloorOutline> {
    let vertices: Vec<_> = space
        .meshes
        .iter()
        .flat_map(|m| m.world_vertices())
        .collect();

    if !vertices.is_empty() {
        let floor_level = vertices.iter().map(|p| p.z).fold(f64::INFINITY, f64::min);
        let floor_points: Vec<Point2<f64>> = vertices
            .iter()
            .filter(|p| p.z <= floor_level + FLOOR_BAND)
            .map(|p| Point2::new(p.x, p.y))
            .collect();
        let hull = convex_hull(&floor_points);
        if hull.len() >= 3 {
            return Some(FloorOutline {
                polygon: hull,
                floor_level,
                method: OutlineMethod::Geometry,
            });
        }
    }

    // Fallback: bbox rectangle, counterclockwise
    let bbox = space.bbox?;
    Some(FloorOutline {
        polygon: vec![
            Point2::new(bbox.min.x, bbox.min.y),
            Point2::new(bbox.max.x, bbox.min.y),
            Point2::new(bbox.max.x, bbox.max.y),
            Point2::new(bbox.min.x, bbox.max.y),
        ],
        floor_level: bbox.min.z,
        method: OutlineMethod::BoundingBox,
    })
}

/// 2D convex hull, monotone chain.
///
/// Returns the hull in counterclockwise order without a repeated closing
/// point. Duplicate input points are merged; collinear points on the hull
/// boundary are dropped. Fewer than 3 distinct points yield a degenerate
/// result shorter than 3.
pub fn convex_hull(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut pts: Vec<Point2<f64>> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| a.x == b.x && a.y == b.y);

    if pts.len() < 3 {
        return pts;
    }

    let cross = |o: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>| {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    };

    let mut lower: Vec<Point2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2
            && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2
            && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }

    // Last point of each chain is the first point of the other
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Point-in-convex-polygon test for a counterclockwise polygon.
/// Boundary points count as inside.
pub fn hull_contains(hull: &[Point2<f64>], p: &Point2<f64>) -> bool {
    if hull.len() < 3 {
        return false;
    }
    for i in 0..hull.len() {
        let a = &hull[i];
        let b = &hull[(i + 1) % hull.len()];
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross < -1e-9 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix4, Point3};
    use plan2d_model::{Aabb, Element, TriangleMesh};

    fn signed_area(poly: &[Point2<f64>]) -> f64 {
        let mut area = 0.0;
        for i in 0..poly.len() {
            let a = &poly[i];
            let b = &poly[(i + 1) % poly.len()];
            area += a.x * b.y - b.x * a.y;
        }
        area / 2.0
    }

    #[test]
    fn hull_is_ccw_subset_containing_all_points() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 3.0),
            Point2::new(0.0, 3.0),
            Point2::new(2.0, 1.5), // interior
            Point2::new(1.0, 0.5), // interior
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!(signed_area(&hull) > 0.0);
        // Subset of input
        for h in &hull {
            assert!(points.iter().any(|p| p == h));
        }
        // Contains all input points
        for p in &points {
            assert!(hull_contains(&hull, p));
        }
    }

    #[test]
    fn collinear_points_degenerate() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
        ];
        let hull = convex_hull(&points);
        assert!(hull.len() < 3);
    }

    #[test]
    fn duplicate_points_are_merged() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 0.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 3);
    }

    #[test]
    fn floor_outline_from_geometry() {
        // Room floor at z = 1.0, with a ceiling slab far above that must
        // not contribute to the outline
        let positions = vec![
            0.0, 0.0, 1.0, //
            5.0, 0.0, 1.0, //
            5.0, 4.0, 1.05, // still within the floor band
            0.0, 4.0, 1.0, //
            0.0, 0.0, 4.0, // ceiling
            5.0, 4.0, 4.0,
        ];
        let mesh = TriangleMesh::with_transform(
            positions,
            vec![0.0; 18],
            vec![0, 1, 2, 0, 2, 3],
            Matrix4::identity(),
        );
        let space = Element::new(1, "IfcSpace", vec![mesh]);
        let outline = extract_floor_outline(&space).unwrap();
        assert_eq!(outline.method, OutlineMethod::Geometry);
        assert_eq!(outline.polygon.len(), 4);
        assert!((outline.floor_level - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bbox_fallback_rectangle_matches_extents() {
        let bbox = Aabb::new(Point3::new(1.0, 2.0, 0.0), Point3::new(6.0, 5.0, 3.0));
        let space = Element::from_bbox(1, "IfcSpace", bbox);
        let outline = extract_floor_outline(&space).unwrap();
        assert_eq!(outline.method, OutlineMethod::BoundingBox);
        assert_eq!(outline.polygon.len(), 4);
        assert!(signed_area(&outline.polygon) > 0.0);
        let xs: Vec<f64> = outline.polygon.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = outline.polygon.iter().map(|p| p.y).collect();
        assert_eq!(xs.iter().cloned().fold(f64::INFINITY, f64::min), 1.0);
        assert_eq!(xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max), 6.0);
        assert_eq!(ys.iter().cloned().fold(f64::INFINITY, f64::min), 2.0);
        assert_eq!(ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max), 5.0);
        assert!((outline.floor_level - 0.0).abs() < 1e-12);
    }
}
