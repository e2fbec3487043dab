// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facing-normal estimation for planar elements (doors, walls, devices).
//!
//! A door or wall is a thin box: its facing normal runs along the
//! horizontal axis with the smaller extent. The estimate is made in the
//! element's local frame and rotated into world space, so rotated walls
//! keep an accurate normal. Elements without mesh geometry fall back to
//! comparing world-bbox extents, which is wrong for rotated elements;
//! the result records which method produced it so downstream output can
//! flag the approximation.

use nalgebra::Vector3;
use plan2d_model::Element;

/// How a normal estimate was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalMethod {
    /// Local-frame thickness axis rotated by the mesh's world rotation
    MeshAxis,
    /// World bounding-box extent comparison (inaccurate under rotation)
    BoundingBox,
}

/// A unit facing normal plus the method that produced it
#[derive(Debug, Clone, Copy)]
pub struct EstimatedNormal {
    pub direction: Vector3<f64>,
    pub method: NormalMethod,
}

/// Estimate the facing normal of a thin planar element.
///
/// Returns `None` when the element has neither mesh geometry nor a
/// bounding box. Ties between the two horizontal extents resolve to the
/// local X axis.
pub fn estimate_normal(element: &Element) -> Option<EstimatedNormal> {
    for mesh in &element.meshes {
        let Some(local) = mesh.local_bounds() else {
            continue;
        };
        let (ex, ey, _ez) = local.extents();
        // Smaller horizontal extent is the thickness axis; tie -> X
        let local_normal = if ex <= ey {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let world = mesh.rotation() * local_normal;
        let norm = world.norm();
        if norm > 1e-12 {
            return Some(EstimatedNormal {
                direction: world / norm,
                method: NormalMethod::MeshAxis,
            });
        }
    }

    let bbox = element.bbox?;
    let (ex, ey, _ez) = bbox.extents();
    let direction = if ex <= ey { Vector3::x() } else { Vector3::y() };
    Some(EstimatedNormal {
        direction,
        method: NormalMethod::BoundingBox,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix4, Point3};
    use plan2d_model::{Aabb, Element, TriangleMesh};

    fn thin_panel_mesh(transform: Matrix4<f64>) -> TriangleMesh {
        // 0.1 x 1.0 x 2.0 panel: thin in local X
        TriangleMesh::with_transform(
            vec![
                0.0, 0.0, 0.0, //
                0.1, 0.0, 0.0, //
                0.1, 1.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.0, 0.0, 2.0, //
                0.1, 0.0, 2.0, //
                0.1, 1.0, 2.0, //
                0.0, 1.0, 2.0,
            ],
            vec![0.0; 24],
            vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7],
            transform,
        )
    }

    #[test]
    fn axis_aligned_panel_faces_x() {
        let element = Element::new(1, "IfcDoor", vec![thin_panel_mesh(Matrix4::identity())]);
        let n = estimate_normal(&element).unwrap();
        assert_eq!(n.method, NormalMethod::MeshAxis);
        assert_relative_eq!(n.direction, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn rotated_panel_normal_follows_rotation() {
        let rot = Matrix4::from_euler_angles(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        let element = Element::new(1, "IfcDoor", vec![thin_panel_mesh(rot)]);
        let n = estimate_normal(&element).unwrap();
        assert_eq!(n.method, NormalMethod::MeshAxis);
        assert_relative_eq!(n.direction, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn bbox_fallback_is_flagged() {
        let element = Element::from_bbox(
            1,
            "IfcDoor",
            Aabb::new(Point3::origin(), Point3::new(2.0, 0.2, 2.1)),
        );
        let n = estimate_normal(&element).unwrap();
        assert_eq!(n.method, NormalMethod::BoundingBox);
        assert_relative_eq!(n.direction, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn no_geometry_no_estimate() {
        let element = Element::new(1, "IfcDoor", vec![]);
        assert!(estimate_normal(&element).is_none());
    }
}
